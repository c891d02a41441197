//! Milestone completion action.

use pacer_core::{Goal, MilestoneId, ModelError, Result, Time};
use tracing::debug;

use crate::progress::aggregate_progress;

/// Mark a milestone complete and recompute goal progress.
///
/// Fails with [`ModelError::MilestoneNotFound`] when the id does not
/// belong to the goal, leaving it untouched. On success the returned goal
/// has the target milestone completed at `now` (progress forced to 100),
/// every other milestone unchanged, and `progress` recomputed over the
/// full milestone set.
pub fn complete(goal: &Goal, id: &MilestoneId, now: Time) -> Result<Goal> {
    let index = goal
        .position(id)
        .ok_or_else(|| ModelError::MilestoneNotFound(id.clone()))?;

    let mut updated = goal.clone();
    updated.milestones[index].complete(now);
    updated.progress = aggregate_progress(&updated.milestones);
    debug!("completed milestone {id}, goal progress now {}%", updated.progress);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pacer_core::{Difficulty, GoalCategory, GoalId, Milestone, MilestoneStatus};

    fn goal_with_offsets(offsets: &[(&str, i64, bool)]) -> Goal {
        let now = Utc::now();
        let mut goal = Goal::new(
            GoalId::temp(1),
            "Launch the MVP",
            "",
            GoalCategory::Work,
            now - Duration::days(10),
            now + Duration::days(30),
        )
        .unwrap();
        for (title, offset, completed) in offsets {
            let mut ms = Milestone::new(
                MilestoneId::temp(title),
                *title,
                now + Duration::days(*offset),
                Difficulty::Medium,
            )
            .unwrap();
            if *completed {
                ms.complete(now);
            }
            goal.add_milestone(ms);
        }
        goal
    }

    #[test]
    fn test_complete_recomputes_progress() {
        // Milestones at +2, -5 (already done), +10; completing the +10 one
        // brings completion to 2 of 3.
        let goal = goal_with_offsets(&[
            ("api", 2, false),
            ("kickoff", -5, true),
            ("release", 10, false),
        ]);
        let id = goal.milestones[2].id.clone();

        let updated = complete(&goal, &id, Utc::now()).unwrap();
        assert_eq!(updated.progress, 67);
        assert_eq!(updated.milestones[2].status(), MilestoneStatus::Completed);
        assert_eq!(updated.milestones[2].progress(), 100);
        // untouched sibling
        assert_eq!(updated.milestones[0].status(), MilestoneStatus::Pending);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let goal = goal_with_offsets(&[("api", 2, false)]);
        let err = complete(&goal, &MilestoneId::temp("ghost"), Utc::now()).unwrap_err();
        assert!(matches!(err, ModelError::MilestoneNotFound(_)));
    }

    #[test]
    fn test_repeat_completion_is_idempotent_on_status_and_progress() {
        let goal = goal_with_offsets(&[("api", 2, false)]);
        let id = goal.milestones[0].id.clone();

        let once = complete(&goal, &id, Utc::now()).unwrap();
        let twice = complete(&once, &id, Utc::now()).unwrap();
        assert_eq!(twice.milestones[0].status(), MilestoneStatus::Completed);
        assert_eq!(twice.milestones[0].progress(), 100);
        assert_eq!(twice.progress, once.progress);
    }
}
