//! JSON-file repository implementation.
//!
//! Stores one goal document and one profile document per user under a
//! root directory. Documents are written to a temp file and renamed into
//! place so a crashed write never leaves a torn document behind. Saving
//! a goal rewrites its whole milestone set.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use pacer_core::{Goal, GoalId, Milestone, MilestoneId, UserProfile};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tracing::{debug, info};

use crate::record::{GoalRecord, MilestoneRecord, ProfileRecord};
use crate::trait_::{GoalRepository, ProfileRepository, Result, StorageError};

/// File-based JSON repository backend.
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn user_dir(&self, user_id: &str) -> PathBuf {
        self.root.join(user_id)
    }

    fn goal_path(&self, user_id: &str) -> PathBuf {
        self.user_dir(user_id).join("goal.json")
    }

    fn profile_path(&self, user_id: &str) -> PathBuf {
        self.user_dir(user_id).join("profile.json")
    }

    async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        match fs::read_to_string(path).await {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        let text = serde_json::to_string_pretty(value)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, text).await?;
        fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Locate the goal document holding `goal_id`, scanning user
    /// directories.
    async fn find_goal(&self, goal_id: &GoalId) -> Result<Option<(PathBuf, GoalRecord)>> {
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let path = entry.path().join("goal.json");
            if let Some(record) = Self::read_json::<GoalRecord>(&path).await? {
                if record.id == goal_id.as_str() {
                    return Ok(Some((path, record)));
                }
            }
        }
        Ok(None)
    }

    async fn require_goal(&self, goal_id: &GoalId) -> Result<(PathBuf, GoalRecord)> {
        self.find_goal(goal_id)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("goal {goal_id}")))
    }
}

#[async_trait]
impl GoalRepository for JsonStore {
    async fn load_latest_goal(&self, user_id: &str) -> Result<Option<Goal>> {
        match Self::read_json::<GoalRecord>(&self.goal_path(user_id)).await? {
            Some(record) => Ok(Some(record.into_model()?)),
            None => Ok(None),
        }
    }

    async fn save_goal(&self, user_id: &str, goal: &Goal) -> Result<Goal> {
        let mut updated = goal.clone();
        if !updated.id.is_durable() {
            updated.id = GoalId::durable();
            debug!("assigned durable id {} to new goal", updated.id);
        }
        for milestone in &mut updated.milestones {
            if !milestone.id.is_durable() {
                milestone.id = MilestoneId::durable();
            }
        }

        fs::create_dir_all(self.user_dir(user_id)).await?;
        Self::write_json(&self.goal_path(user_id), &GoalRecord::from_model(&updated)).await?;
        info!("saved goal {} for user {user_id}", updated.id);
        Ok(updated)
    }

    async fn delete_milestones(&self, goal_id: &GoalId) -> Result<()> {
        let (path, mut record) = self.require_goal(goal_id).await?;
        record.milestones.clear();
        Self::write_json(&path, &record).await?;
        debug!("cleared milestones of goal {goal_id}");
        Ok(())
    }

    async fn insert_milestones(&self, goal_id: &GoalId, milestones: &[Milestone]) -> Result<()> {
        let (path, mut record) = self.require_goal(goal_id).await?;
        for milestone in milestones {
            let mut milestone = milestone.clone();
            if !milestone.id.is_durable() {
                milestone.id = MilestoneId::durable();
            }
            record.milestones.push(MilestoneRecord::from_model(&milestone));
        }
        Self::write_json(&path, &record).await?;
        debug!("inserted {} milestone(s) into goal {goal_id}", milestones.len());
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for JsonStore {
    async fn load_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        match Self::read_json::<ProfileRecord>(&self.profile_path(user_id)).await? {
            Some(record) => Ok(Some(record.into_model())),
            None => Ok(None),
        }
    }

    async fn save_profile(&self, user_id: &str, profile: &UserProfile) -> Result<()> {
        fs::create_dir_all(self.user_dir(user_id)).await?;
        Self::write_json(&self.profile_path(user_id), &ProfileRecord::from_model(profile)).await?;
        info!("saved profile for user {user_id}");
        Ok(())
    }

    async fn update_streak(
        &self,
        user_id: &str,
        streak: u32,
        last_login_date: NaiveDate,
    ) -> Result<()> {
        let path = self.profile_path(user_id);
        let mut record = Self::read_json::<ProfileRecord>(&path)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("profile for user {user_id}")))?;
        record.streak = streak;
        record.last_login_date = Some(last_login_date);
        Self::write_json(&path, &record).await?;
        debug!("streak for user {user_id} now {streak}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pacer_core::{
        Difficulty, GoalCategory, NotificationMethod, WorkStyle,
    };

    fn authored_goal() -> Goal {
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
        goal.add_milestone(
            Milestone::new(
                MilestoneId::temp("a"),
                "kickoff",
                now - Duration::days(5),
                Difficulty::Small,
            )
            .unwrap(),
        );
        goal.add_milestone(
            Milestone::new(
                MilestoneId::temp("b"),
                "api",
                now + Duration::days(2),
                Difficulty::Medium,
            )
            .unwrap(),
        );
        goal
    }

    #[tokio::test]
    async fn test_first_save_assigns_durable_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();

        let saved = store.save_goal("taro", &authored_goal()).await.unwrap();
        assert!(saved.id.is_durable());
        assert!(saved.milestones.iter().all(|m| m.id.is_durable()));
    }

    #[tokio::test]
    async fn test_goal_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();

        let saved = store.save_goal("taro", &authored_goal()).await.unwrap();
        let loaded = store.load_latest_goal("taro").await.unwrap().unwrap();
        assert_eq!(loaded.id, saved.id);
        assert_eq!(loaded.milestones.len(), 2);
        assert_eq!(loaded.title, "Launch the MVP");
    }

    #[tokio::test]
    async fn test_missing_goal_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();
        assert!(store.load_latest_goal("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resave_replaces_milestone_set() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();

        let mut saved = store.save_goal("taro", &authored_goal()).await.unwrap();
        saved.milestones.truncate(1);
        let resaved = store.save_goal("taro", &saved).await.unwrap();

        let loaded = store.load_latest_goal("taro").await.unwrap().unwrap();
        assert_eq!(loaded.milestones.len(), 1);
        assert_eq!(loaded.milestones[0].id, resaved.milestones[0].id);
    }

    #[tokio::test]
    async fn test_delete_then_insert_milestones() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();

        let saved = store.save_goal("taro", &authored_goal()).await.unwrap();
        store.delete_milestones(&saved.id).await.unwrap();
        assert!(store
            .load_latest_goal("taro")
            .await
            .unwrap()
            .unwrap()
            .milestones
            .is_empty());

        let fresh = Milestone::new(
            MilestoneId::temp("c"),
            "beta test",
            Utc::now() + Duration::days(20),
            Difficulty::Medium,
        )
        .unwrap();
        store.insert_milestones(&saved.id, &[fresh]).await.unwrap();

        let loaded = store.load_latest_goal("taro").await.unwrap().unwrap();
        assert_eq!(loaded.milestones.len(), 1);
        assert!(loaded.milestones[0].id.is_durable());
        assert_eq!(loaded.milestones[0].title, "beta test");
    }

    #[tokio::test]
    async fn test_milestone_ops_on_unknown_goal_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();
        let err = store.delete_milestones(&GoalId::durable()).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_profile_save_load_and_streak_update() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();

        let today = Utc::now().date_naive();
        let profile =
            UserProfile::from_setup("Taro", WorkStyle::Even, NotificationMethod::None, today)
                .unwrap();
        store.save_profile("taro", &profile).await.unwrap();

        let tomorrow = today + Duration::days(1);
        store.update_streak("taro", 2, tomorrow).await.unwrap();

        let loaded = store.load_profile("taro").await.unwrap().unwrap();
        assert_eq!(loaded.streak, 2);
        assert_eq!(loaded.last_login_date, Some(tomorrow));
        assert_eq!(loaded.name, "Taro");
    }

    #[tokio::test]
    async fn test_streak_update_without_profile_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();
        let err = store
            .update_streak("nobody", 1, Utc::now().date_naive())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }
}
