//! Feature implementations for studynest.
//!
//! - Focus timer and the controller that records sessions
//! - Statistics
//! - Task list
//! - Settings
//! - Backup export/import

pub mod backup;
pub mod focus;
pub mod settings;
pub mod stats;
pub mod tasks;
