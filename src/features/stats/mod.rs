//! Session statistics.
//!
//! Provides the persisted statistics record and its aggregation:
//! - Cumulative and per-day session counts
//! - Day streaks
//! - A rolling 30-entry daily history
//! - Terminal charts of the last week

mod aggregator;
mod record;
pub mod visualization;

pub use aggregator::StatsAggregator;
pub use record::{DaySummary, HistoryEntry, StatsRecord, HISTORY_LIMIT};
pub use visualization::{render_bar_chart, render_sparkline, render_week_chart};
