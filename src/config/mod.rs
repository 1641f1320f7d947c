//! Configuration management for studynest.
//!
//! This module handles locating the data directory and loading the
//! application configuration from `~/.studynest/config.yaml`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, LoggingConfig};
