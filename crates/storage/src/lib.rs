//! Persistence abstraction and implementations for pacer.
//!
//! This crate provides trait-based goal/profile repositories with a
//! JSON-file reference implementation. Persisted records use the
//! camelCase shape of the historical store; the mapping to the in-memory
//! models is explicit and lives entirely at this boundary.

#![warn(missing_docs)]

pub mod json_store;
pub mod record;
pub mod trait_;

pub use json_store::JsonStore;
pub use record::{GoalRecord, MilestoneRecord, NotificationRecord, ProfileRecord};
pub use trait_::{GoalRepository, ProfileRepository, Result, StorageError};
