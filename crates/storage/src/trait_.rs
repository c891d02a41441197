//! Repository trait abstraction.

use async_trait::async_trait;
use chrono::NaiveDate;
use pacer_core::{Goal, GoalId, Milestone, UserProfile};

/// Error type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during repository operations.
///
/// These propagate to callers unmodified; the repository layer never
/// retries on its own.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Repository for the user's goal and its milestone set.
///
/// A save fully replaces the goal's milestone set (delete-then-insert,
/// never merge) so stale milestones cannot resurrect.
#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Load the user's most recent goal, if any.
    async fn load_latest_goal(&self, user_id: &str) -> Result<Option<Goal>>;

    /// Save a goal (create or update). A goal whose id is not durable is
    /// inserted fresh; the returned goal carries the durable ids assigned
    /// to it and its milestones.
    async fn save_goal(&self, user_id: &str, goal: &Goal) -> Result<Goal>;

    /// Delete every milestone of a goal.
    async fn delete_milestones(&self, goal_id: &GoalId) -> Result<()>;

    /// Insert milestones for a goal.
    async fn insert_milestones(&self, goal_id: &GoalId, milestones: &[Milestone]) -> Result<()>;
}

/// Repository for user profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Load a user's profile, if any.
    async fn load_profile(&self, user_id: &str) -> Result<Option<UserProfile>>;

    /// Save a profile (create or update).
    async fn save_profile(&self, user_id: &str, profile: &UserProfile) -> Result<()>;

    /// Persist just the streak fields after the daily recomputation.
    async fn update_streak(
        &self,
        user_id: &str,
        streak: u32,
        last_login_date: NaiveDate,
    ) -> Result<()>;
}
