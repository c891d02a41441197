//! Timeline ordering - date-sorted views over a goal's milestones.
//!
//! Stored milestone order is whatever the user authored; every display
//! and decision surface works from the date-sorted view produced here.

use pacer_core::{Milestone, MilestoneStatus, Time};

/// Milestones sorted ascending by target date.
///
/// The sort is stable: milestones sharing a target date keep their
/// original relative order, so re-sorting a sorted list is a fixed point.
pub fn sort_by_target_date(milestones: &[Milestone]) -> Vec<Milestone> {
    let mut sorted = milestones.to_vec();
    sorted.sort_by_key(|m| m.target_date);
    sorted
}

/// The milestone to focus on today: the first pending one in date order.
///
/// Total over any input; `None` when the set is empty or nothing is
/// pending anymore.
pub fn find_current(milestones: &[Milestone]) -> Option<&Milestone> {
    let mut refs: Vec<&Milestone> = milestones.iter().collect();
    refs.sort_by_key(|m| m.target_date);
    refs.into_iter()
        .find(|m| m.status() == MilestoneStatus::Pending)
}

/// Whole days from `now` until `deadline` (negative once past it).
pub fn days_until(deadline: Time, now: Time) -> i64 {
    (deadline - now).num_days()
}
