//! Adjustment engine - re-planning around a behind-schedule milestone.
//!
//! Two operator-selected modes. Extend shifts the remaining schedule and
//! the deadline forward; squeeze raises the required effort on the
//! trigger milestone instead of moving any dates. Neither mode guards
//! against repeat invocation: extending twice shifts twice, squeezing
//! twice appends the annotation twice.

use chrono::Duration;
use pacer_core::{Difficulty, Goal, MilestoneId, MilestoneState, ModelError, Result};
use tracing::debug;

/// Fixed number of days an extend pushes the schedule forward.
pub const SHIFT_DAYS: i64 = 5;

/// Push the remaining schedule forward by [`SHIFT_DAYS`].
///
/// The trigger milestone is located by its position in the goal's
/// *stored* milestone order, not the date-sorted view; every milestone at
/// that position or later is shifted. If stored order diverges from date
/// order the shifted set follows stored order.
///
/// The trigger additionally has its state reset to pending unless it is
/// already completed (a pending trigger keeps its reported progress; a
/// missed or adjusted one restarts at zero). Other shifted milestones
/// keep their state. The goal deadline moves by the same amount; the
/// start date never does.
pub fn extend(goal: &Goal, id: &MilestoneId) -> Result<Goal> {
    let index = goal
        .position(id)
        .ok_or_else(|| ModelError::MilestoneNotFound(id.clone()))?;

    let mut updated = goal.clone();
    let shift = Duration::days(SHIFT_DAYS);
    for (i, milestone) in updated.milestones.iter_mut().enumerate().skip(index) {
        milestone.target_date += shift;
        if i == index && !milestone.is_completed() {
            let progress = match milestone.state {
                MilestoneState::Pending { progress } => progress,
                _ => 0,
            };
            milestone.state = MilestoneState::Pending { progress };
        }
    }
    updated.deadline += shift;
    debug!(
        "extended schedule: {} milestone(s) and deadline moved {SHIFT_DAYS} days",
        updated.milestones.len() - index
    );
    Ok(updated)
}

/// Compress effort instead of moving dates.
///
/// The trigger milestone's difficulty is forced to the maximum tier (a
/// one-way escalation) and `annotation` - the localized "intensified"
/// string supplied by the caller - is appended to its description. Dates
/// and states are untouched.
pub fn squeeze(goal: &Goal, id: &MilestoneId, annotation: &str) -> Result<Goal> {
    let index = goal
        .position(id)
        .ok_or_else(|| ModelError::MilestoneNotFound(id.clone()))?;

    let mut updated = goal.clone();
    let milestone = &mut updated.milestones[index];
    milestone.difficulty = Difficulty::Large;
    milestone.description = Some(match milestone.description.take() {
        Some(text) => format!("{text} {annotation}"),
        None => annotation.to_string(),
    });
    debug!("squeezed milestone {id}: difficulty escalated to large");
    Ok(updated)
}
