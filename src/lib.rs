//! studynest - a focus timer and study tracker for the terminal
//!
//! Work/break countdowns, session statistics with day streaks, a small task
//! list, and JSON backups, persisted in a local key-value store.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::StudyNestError;
pub use storage::{Database, KeyValueStore};
