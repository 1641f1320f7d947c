//! Task list.
//!
//! A flat list of to-dos persisted alongside stats and settings. Newest
//! tasks come first; the first unfinished one is the "current" task shown
//! while focusing.

mod list;
mod task;

pub use list::TaskList;
pub use task::Task;
