//! Milestone model - the atomic trackable unit of a goal.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::id::MilestoneId;
use crate::Time;

/// A milestone is a dated sub-task of a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    /// Unique identifier
    pub id: MilestoneId,

    /// Display title
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Target completion date
    pub target_date: Time,

    /// Effort weight
    pub difficulty: Difficulty,

    /// Completion state
    pub state: MilestoneState,
}

/// Completion state of a milestone.
///
/// Status, completion instant and progress live in a single variant so
/// that invalid combinations (e.g. completed with progress below 100)
/// cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MilestoneState {
    /// Not yet done; carries reported progress (0-100)
    Pending {
        /// Reported progress, 0-100, non-decreasing
        progress: u8,
    },

    /// Done; carries the completion instant
    Completed {
        /// When the milestone was marked complete
        completed_at: Time,
    },

    /// Assigned by callers when a milestone is given up on
    Missed,

    /// Assigned by callers when a milestone was re-planned
    Adjusted,
}

impl MilestoneState {
    /// The status classification of this state.
    pub fn status(&self) -> MilestoneStatus {
        match self {
            MilestoneState::Pending { .. } => MilestoneStatus::Pending,
            MilestoneState::Completed { .. } => MilestoneStatus::Completed,
            MilestoneState::Missed => MilestoneStatus::Missed,
            MilestoneState::Adjusted => MilestoneStatus::Adjusted,
        }
    }

    /// Progress figure for this state (completed is always 100).
    pub fn progress(&self) -> u8 {
        match self {
            MilestoneState::Pending { progress } => *progress,
            MilestoneState::Completed { .. } => 100,
            MilestoneState::Missed | MilestoneState::Adjusted => 0,
        }
    }

    /// Completion instant, if completed.
    pub fn completed_at(&self) -> Option<Time> {
        match self {
            MilestoneState::Completed { completed_at } => Some(*completed_at),
            _ => None,
        }
    }
}

/// Status classification of a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneStatus {
    /// Not yet done
    Pending,
    /// Done
    Completed,
    /// Given up on
    Missed,
    /// Re-planned
    Adjusted,
}

impl MilestoneStatus {
    /// Lowercase string form, matching the persisted representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneStatus::Pending => "pending",
            MilestoneStatus::Completed => "completed",
            MilestoneStatus::Missed => "missed",
            MilestoneStatus::Adjusted => "adjusted",
        }
    }
}

/// Ordinal effort weight of a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Trivial effort
    Micro,
    /// Small effort
    Small,
    /// Moderate effort
    Medium,
    /// Maximum effort tier
    Large,
}

impl Difficulty {
    /// Lowercase string form, matching the persisted representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Micro => "micro",
            Difficulty::Small => "small",
            Difficulty::Medium => "medium",
            Difficulty::Large => "large",
        }
    }
}

impl Milestone {
    /// Create a pending milestone. The title must not be blank.
    pub fn new(
        id: MilestoneId,
        title: impl Into<String>,
        target_date: Time,
        difficulty: Difficulty,
    ) -> Result<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ModelError::Validation(
                "milestone title must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id,
            title,
            description: None,
            target_date,
            difficulty,
            state: MilestoneState::Pending { progress: 0 },
        })
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Current status classification.
    pub fn status(&self) -> MilestoneStatus {
        self.state.status()
    }

    /// Current progress figure.
    pub fn progress(&self) -> u8 {
        self.state.progress()
    }

    /// Whether the milestone is completed.
    pub fn is_completed(&self) -> bool {
        matches!(self.state, MilestoneState::Completed { .. })
    }

    /// Whether the milestone should display as late: past its target date
    /// and not completed.
    ///
    /// This is a derived display fact layered on top of `state`; nothing
    /// in the engine transitions a late milestone to `Missed` on its own.
    pub fn is_late(&self, now: Time) -> bool {
        now > self.target_date && !self.is_completed()
    }

    /// Mark the milestone complete at `now`. Forces progress to 100.
    pub fn complete(&mut self, now: Time) {
        self.state = MilestoneState::Completed { completed_at: now };
    }

    /// Raise the reported progress of a pending milestone.
    ///
    /// Progress is non-decreasing while pending and capped at 100; reports
    /// against a non-pending milestone are rejected.
    pub fn advance_progress(&mut self, value: u8) -> Result<()> {
        match &mut self.state {
            MilestoneState::Pending { progress } => {
                if value > 100 {
                    return Err(ModelError::Validation(
                        "progress must be between 0 and 100".to_string(),
                    ));
                }
                if value < *progress {
                    return Err(ModelError::Validation(
                        "progress cannot decrease".to_string(),
                    ));
                }
                *progress = value;
                Ok(())
            }
            _ => Err(ModelError::Validation(
                "only a pending milestone can report progress".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn pending(title: &str, target: Time) -> Milestone {
        Milestone::new(MilestoneId::temp(title), title, target, Difficulty::Medium)
            .expect("valid milestone")
    }

    #[test]
    fn test_blank_title_rejected() {
        let err = Milestone::new(
            MilestoneId::temp(1),
            "   ",
            Utc::now(),
            Difficulty::Small,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::Validation(_)));
    }

    #[test]
    fn test_is_late_requires_past_date_and_incomplete() {
        let now = Utc::now();
        let mut ms = pending("write draft", now - Duration::days(2));
        assert!(ms.is_late(now));

        ms.complete(now);
        assert!(!ms.is_late(now));

        let future = pending("review draft", now + Duration::days(2));
        assert!(!future.is_late(now));
    }

    #[test]
    fn test_late_pending_keeps_pending_status() {
        let now = Utc::now();
        let ms = pending("ship it", now - Duration::days(1));
        assert!(ms.is_late(now));
        assert_eq!(ms.status(), MilestoneStatus::Pending);
    }

    #[test]
    fn test_completion_forces_progress_to_100() {
        let now = Utc::now();
        let mut ms = pending("api endpoints", now + Duration::days(2));
        ms.advance_progress(40).unwrap();
        assert_eq!(ms.progress(), 40);

        ms.complete(now);
        assert_eq!(ms.progress(), 100);
        assert_eq!(ms.state.completed_at(), Some(now));
    }

    #[test]
    fn test_progress_is_monotonic_while_pending() {
        let mut ms = pending("beta test", Utc::now());
        ms.advance_progress(60).unwrap();
        assert!(ms.advance_progress(30).is_err());
        assert!(ms.advance_progress(101).is_err());
        ms.advance_progress(60).unwrap();
        assert_eq!(ms.progress(), 60);
    }

    #[test]
    fn test_difficulty_is_ordered() {
        assert!(Difficulty::Micro < Difficulty::Small);
        assert!(Difficulty::Small < Difficulty::Medium);
        assert!(Difficulty::Medium < Difficulty::Large);
    }
}
