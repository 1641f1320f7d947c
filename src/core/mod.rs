//! Core abstractions for studynest.
//!
//! This module provides the clock, calendar-day helpers and logging setup
//! shared across features.

mod clock;
mod datetime;
pub mod logging;

#[cfg(test)]
pub use clock::MockClock;
pub use clock::{Clock, FixedClock, SystemClock};
pub use datetime::{date_key, format_minutes, format_mmss, local_date_key, parse_minutes};
