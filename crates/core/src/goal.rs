//! Goal model - top-level objective with a deadline and milestone set.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::id::{GoalId, MilestoneId};
use crate::milestone::Milestone;
use crate::Time;

/// A goal is the top-level user objective being tracked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: GoalId,

    /// Goal title
    pub title: String,

    /// Detailed description
    pub description: String,

    /// Life category
    pub category: GoalCategory,

    /// When work on the goal starts
    pub start_date: Time,

    /// Final deadline; never before `start_date`
    pub deadline: Time,

    /// Milestones in stored (authoring) order. Display order is always
    /// derived by sorting on target date, never by this order.
    pub milestones: Vec<Milestone>,

    /// Percentage complete (0-100), derived from milestone completion
    pub progress: u8,

    /// Visual theme tag, fixed at creation from the category
    pub color: String,
}

/// Life category of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GoalCategory {
    /// Work and career
    Work,
    /// Study and learning
    Study,
    /// Hobby projects
    Hobby,
    /// Health and fitness
    Health,
    /// Personal finance
    Finance,
    /// Anything else
    Other,
}

impl GoalCategory {
    /// Uppercase string form, matching the persisted representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalCategory::Work => "WORK",
            GoalCategory::Study => "STUDY",
            GoalCategory::Hobby => "HOBBY",
            GoalCategory::Health => "HEALTH",
            GoalCategory::Finance => "FINANCE",
            GoalCategory::Other => "OTHER",
        }
    }

    /// Theme color assigned to goals of this category.
    pub fn color(&self) -> &'static str {
        match self {
            GoalCategory::Work => "hsl(220, 80%, 60%)",
            GoalCategory::Study => "hsl(280, 70%, 60%)",
            GoalCategory::Health => "hsl(140, 70%, 50%)",
            _ => "hsl(250, 80%, 60%)",
        }
    }
}

impl std::fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Goal {
    /// Create an empty goal. The title must not be blank and the deadline
    /// must not precede the start date.
    pub fn new(
        id: GoalId,
        title: impl Into<String>,
        description: impl Into<String>,
        category: GoalCategory,
        start_date: Time,
        deadline: Time,
    ) -> Result<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ModelError::Validation(
                "goal title must not be empty".to_string(),
            ));
        }
        if start_date > deadline {
            return Err(ModelError::Validation(format!(
                "deadline {deadline} precedes start date {start_date}"
            )));
        }
        Ok(Self {
            id,
            title,
            description: description.into(),
            category,
            start_date,
            deadline,
            milestones: Vec::new(),
            progress: 0,
            color: category.color().to_string(),
        })
    }

    /// Append a milestone in stored order.
    pub fn add_milestone(&mut self, milestone: Milestone) {
        self.milestones.push(milestone);
    }

    /// Remove a milestone by id (pre-persist authoring path).
    pub fn remove_milestone(&mut self, id: &MilestoneId) -> Result<Milestone> {
        match self.position(id) {
            Some(index) => Ok(self.milestones.remove(index)),
            None => Err(ModelError::MilestoneNotFound(id.clone())),
        }
    }

    /// Look up a milestone by id.
    pub fn milestone(&self, id: &MilestoneId) -> Option<&Milestone> {
        self.milestones.iter().find(|m| &m.id == id)
    }

    /// Position of a milestone in stored order.
    pub fn position(&self, id: &MilestoneId) -> Option<usize> {
        self.milestones.iter().position(|m| &m.id == id)
    }
}
