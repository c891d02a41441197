//! Scheduling and adjustment engine.
//!
//! Timeline ordering, completion and progress recomputation, the
//! extend/squeeze re-planning algorithms, and the daily streak tracker.
//! Every operation here is a synchronous, side-effect-free transformation
//! over in-memory values; persistence happens elsewhere.

#![warn(missing_docs)]

pub mod adjust;
pub mod complete;
pub mod progress;
pub mod streak;
pub mod timeline;

pub use adjust::{extend, squeeze, SHIFT_DAYS};
pub use complete::complete;
pub use progress::aggregate_progress;
pub use streak::track_streak;
pub use timeline::{days_until, find_current, sort_by_target_date};
