//! Command implementations for studynest.
//!
//! Each command takes the store (and clock where time matters) and returns
//! the text to print, rendered for the requested output format.

mod backup;
mod completions;
mod settings;
mod stats;
mod task;
mod timer;

pub use backup::{export, import};
pub use completions::completions;
pub use settings::settings;
pub use stats::stats;
pub use task::task;
pub use timer::{run as run_timer, timer, RunOptions};
