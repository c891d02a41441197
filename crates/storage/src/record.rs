//! Persisted record shapes and their mapping to the core models.
//!
//! The historical store persists camelCase documents with status,
//! completion date and progress as three separate fields. The in-memory
//! models keep those coupled in one state variant, so the translation in
//! both directions is written out explicitly here and nowhere else.

use chrono::NaiveDate;
use pacer_core::{
    Difficulty, Goal, GoalCategory, Milestone, MilestoneState, MilestoneStatus,
    NotificationMethod, NotificationPrefs, PersonalityType, Time, UserProfile,
};
use serde::{Deserialize, Serialize};

use crate::trait_::StorageError;

/// Persisted form of a [`Milestone`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneRecord {
    /// Identifier text
    pub id: String,

    /// Display title
    pub title: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Target completion instant
    pub target_date: Time,

    /// Completion instant; present exactly when status is `completed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<Time>,

    /// Status classification
    pub status: MilestoneStatus,

    /// Effort weight
    pub difficulty: Difficulty,

    /// Progress figure, 0-100
    pub progress: u8,
}

impl MilestoneRecord {
    /// Flatten a milestone into its persisted form.
    pub fn from_model(milestone: &Milestone) -> Self {
        Self {
            id: milestone.id.to_string(),
            title: milestone.title.clone(),
            description: milestone.description.clone(),
            target_date: milestone.target_date,
            completed_date: milestone.state.completed_at(),
            status: milestone.status(),
            difficulty: milestone.difficulty,
            progress: milestone.progress(),
        }
    }

    /// Rebuild the milestone, recoupling status, completion date and
    /// progress into one state.
    pub fn into_model(self) -> Result<Milestone, StorageError> {
        let state = match self.status {
            MilestoneStatus::Pending => MilestoneState::Pending {
                progress: self.progress.min(100),
            },
            MilestoneStatus::Completed => {
                let completed_at = self.completed_date.ok_or_else(|| {
                    StorageError::Other(format!(
                        "completed milestone {} has no completedDate",
                        self.id
                    ))
                })?;
                MilestoneState::Completed { completed_at }
            }
            MilestoneStatus::Missed => MilestoneState::Missed,
            MilestoneStatus::Adjusted => MilestoneState::Adjusted,
        };
        Ok(Milestone {
            id: self.id.into(),
            title: self.title,
            description: self.description,
            target_date: self.target_date,
            difficulty: self.difficulty,
            state,
        })
    }
}

/// Persisted form of a [`Goal`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    /// Identifier text
    pub id: String,

    /// Goal title
    pub title: String,

    /// Life category
    pub category: GoalCategory,

    /// Detailed description
    pub description: String,

    /// Start of the schedule
    pub start_date: Time,

    /// Final deadline
    pub deadline: Time,

    /// Milestones in stored order
    pub milestones: Vec<MilestoneRecord>,

    /// Derived goal progress
    pub progress: u8,

    /// Visual theme tag
    pub color: String,
}

impl GoalRecord {
    /// Flatten a goal into its persisted form.
    pub fn from_model(goal: &Goal) -> Self {
        Self {
            id: goal.id.to_string(),
            title: goal.title.clone(),
            category: goal.category,
            description: goal.description.clone(),
            start_date: goal.start_date,
            deadline: goal.deadline,
            milestones: goal.milestones.iter().map(MilestoneRecord::from_model).collect(),
            progress: goal.progress,
            color: goal.color.clone(),
        }
    }

    /// Rebuild the goal and all of its milestones.
    pub fn into_model(self) -> Result<Goal, StorageError> {
        let milestones = self
            .milestones
            .into_iter()
            .map(MilestoneRecord::into_model)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Goal {
            id: self.id.into(),
            title: self.title,
            description: self.description,
            category: self.category,
            start_date: self.start_date,
            deadline: self.deadline,
            milestones,
            progress: self.progress,
            color: self.color,
        })
    }
}

/// Persisted notification preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    /// Whether any notifications are delivered
    pub enabled: bool,

    /// Delivery channel
    pub method: NotificationMethod,

    /// Preferred delivery time, "HH:MM"
    pub time: String,
}

/// Persisted form of a [`UserProfile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    /// Display name
    pub name: String,

    /// Pacing personality
    pub personality_type: PersonalityType,

    /// Effort curve multiplier
    pub pacing_multiplier: f32,

    /// Notification preferences
    pub notifications: NotificationRecord,

    /// Consecutive daily-login count
    pub streak: u32,

    /// Last login day, `yyyy-MM-dd`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_date: Option<NaiveDate>,
}

impl ProfileRecord {
    /// Flatten a profile into its persisted form.
    pub fn from_model(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            personality_type: profile.personality_type,
            pacing_multiplier: profile.pacing_multiplier,
            notifications: NotificationRecord {
                enabled: profile.notifications.enabled,
                method: profile.notifications.method,
                time: profile.notifications.time.clone(),
            },
            streak: profile.streak,
            last_login_date: profile.last_login_date,
        }
    }

    /// Rebuild the profile.
    pub fn into_model(self) -> UserProfile {
        UserProfile {
            name: self.name,
            personality_type: self.personality_type,
            pacing_multiplier: self.pacing_multiplier,
            notifications: NotificationPrefs {
                enabled: self.notifications.enabled,
                method: self.notifications.method,
                time: self.notifications.time,
            },
            streak: self.streak,
            last_login_date: self.last_login_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pacer_core::{GoalId, MilestoneId, WorkStyle};

    fn sample_goal() -> Goal {
        let now = Utc::now();
        let mut goal = Goal::new(
            GoalId::durable(),
            "Launch the MVP",
            "Ship it",
            GoalCategory::Work,
            now - Duration::days(10),
            now + Duration::days(30),
        )
        .unwrap();
        let mut done = Milestone::new(
            MilestoneId::durable(),
            "kickoff",
            now - Duration::days(5),
            Difficulty::Small,
        )
        .unwrap();
        done.complete(now - Duration::days(4));
        goal.add_milestone(done);
        goal.add_milestone(
            Milestone::new(
                MilestoneId::durable(),
                "api",
                now + Duration::days(2),
                Difficulty::Medium,
            )
            .unwrap(),
        );
        goal
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let record = GoalRecord::from_model(&sample_goal());
        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("startDate"));
        assert!(!obj.contains_key("start_date"));

        let ms = value["milestones"][0].as_object().unwrap();
        assert!(ms.contains_key("targetDate"));
        assert!(ms.contains_key("completedDate"));
        assert_eq!(ms["status"], "completed");
        assert_eq!(ms["progress"], 100);
    }

    #[test]
    fn test_goal_round_trip() {
        let goal = sample_goal();
        let rebuilt = GoalRecord::from_model(&goal).into_model().unwrap();
        assert_eq!(rebuilt.id, goal.id);
        assert_eq!(rebuilt.milestones.len(), 2);
        assert_eq!(rebuilt.milestones[0].state, goal.milestones[0].state);
        assert_eq!(rebuilt.milestones[1].state, goal.milestones[1].state);
        assert_eq!(rebuilt.deadline, goal.deadline);
        assert_eq!(rebuilt.color, goal.color);
    }

    #[test]
    fn test_completed_without_date_is_rejected() {
        let mut record = MilestoneRecord::from_model(&sample_goal().milestones[0]);
        record.completed_date = None;
        let err = record.into_model().unwrap_err();
        assert!(matches!(err, StorageError::Other(_)));
    }

    #[test]
    fn test_profile_round_trip_keeps_login_day() {
        let profile = UserProfile::from_setup(
            "Taro",
            WorkStyle::LastMinute,
            NotificationMethod::Email,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        )
        .unwrap();
        let record = ProfileRecord::from_model(&profile);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["lastLoginDate"], "2024-06-01");
        assert_eq!(value["personalityType"], "PROCRASTINATOR");

        let rebuilt = record.into_model();
        assert_eq!(rebuilt.last_login_date, profile.last_login_date);
        assert_eq!(rebuilt.streak, profile.streak);
    }
}
