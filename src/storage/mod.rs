//! Storage layer for studynest.
//!
//! Everything durable lives in a small key-value store holding one JSON
//! document per key:
//! - Settings (`studynest_settings`)
//! - Task list (`studynest_tasks`)
//! - Statistics (`studynest_stats`)

mod database;
mod kv;
mod migrations;

pub use database::Database;
#[cfg(test)]
pub use kv::MockKeyValueStore;
pub use kv::{load_json, save_json, KeyValueStore, MemoryStore};

/// Storage key for user settings.
pub const SETTINGS_KEY: &str = "studynest_settings";

/// Storage key for the task list.
pub const TASKS_KEY: &str = "studynest_tasks";

/// Storage key for statistics.
pub const STATS_KEY: &str = "studynest_stats";
