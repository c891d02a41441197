//! Unique identifiers for pacer entities.
//!
//! Ids are opaque strings. Milestones and goals are authored client-side
//! with temporary ids; the repository replaces them with durable uuid-v4
//! ids on first persist. An id whose text does not match the uuid-v4
//! pattern is treated as not yet durable.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn durable_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
            .expect("durable id pattern")
    })
}

fn is_durable_text(s: &str) -> bool {
    durable_pattern().is_match(&s.to_lowercase())
}

/// Unique identifier for a Goal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(String);

impl GoalId {
    /// Generate a durable (uuid-v4) GoalId
    pub fn durable() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a temporary client-side id from a tag
    pub fn temp(tag: impl std::fmt::Display) -> Self {
        Self(format!("temp-{tag}"))
    }

    /// Whether this id has the durable uuid-v4 form
    pub fn is_durable(&self) -> bool {
        is_durable_text(&self.0)
    }

    /// View as string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for GoalId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for GoalId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for GoalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a Milestone
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MilestoneId(String);

impl MilestoneId {
    /// Generate a durable (uuid-v4) MilestoneId
    pub fn durable() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a temporary client-side id from a tag
    pub fn temp(tag: impl std::fmt::Display) -> Self {
        Self(format!("temp-{tag}"))
    }

    /// Whether this id has the durable uuid-v4 form
    pub fn is_durable(&self) -> bool {
        is_durable_text(&self.0)
    }

    /// View as string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MilestoneId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MilestoneId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for MilestoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_durable() {
        assert!(GoalId::durable().is_durable());
        assert!(MilestoneId::durable().is_durable());
    }

    #[test]
    fn test_temp_ids_are_not_durable() {
        assert!(!GoalId::temp(42).is_durable());
        assert!(!MilestoneId::temp("ms-3").is_durable());
    }

    #[test]
    fn test_durable_check_is_case_insensitive() {
        let id = GoalId::from("123E4567-E89B-42D3-A456-426614174000");
        assert!(id.is_durable());
    }

    #[test]
    fn test_near_misses_rejected() {
        assert!(!GoalId::from("123e4567e89b42d3a456426614174000").is_durable());
        assert!(!GoalId::from("123e4567-e89b-42d3-a456-42661417400").is_durable());
        assert!(!GoalId::from("goal-1700000000000").is_durable());
    }
}
