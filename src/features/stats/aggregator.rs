//! Turns completed work phases into persisted statistics.

use chrono::NaiveDate;
use tracing::info;

use super::record::StatsRecord;
use crate::core::{local_date_key, Clock};
use crate::error::StudyNestError;
use crate::storage::{load_json, save_json, KeyValueStore, STATS_KEY};

/// Owns the stats document between the timer and the store.
///
/// The record is loaded once and written back after every mutation. A
/// failed write leaves the in-memory record unchanged.
pub struct StatsAggregator<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
    clock: &'a dyn Clock,
    stats: StatsRecord,
}

impl<'a, S: KeyValueStore + ?Sized> StatsAggregator<'a, S> {
    /// Load stats from the store, or start empty.
    pub fn load(store: &'a S, clock: &'a dyn Clock) -> Self {
        let stats = load_json(store, STATS_KEY, StatsRecord::default());
        Self {
            store,
            clock,
            stats,
        }
    }

    /// Current statistics.
    #[must_use]
    pub const fn stats(&self) -> &StatsRecord {
        &self.stats
    }

    /// Today's date in the local time zone.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        local_date_key(self.clock.now())
    }

    /// Record one completed work phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated record cannot be persisted.
    pub fn add_session(&mut self, duration_minutes: u32) -> Result<&StatsRecord, StudyNestError> {
        let mut next = self.stats.clone();
        next.record_session(duration_minutes, self.clock.now());
        self.commit(next)?;

        info!(
            minutes = duration_minutes,
            total = self.stats.total_sessions,
            streak = self.stats.streak_days,
            "session recorded"
        );
        Ok(&self.stats)
    }

    /// Zero today's counters; totals and history are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated record cannot be persisted.
    pub fn reset_today(&mut self) -> Result<(), StudyNestError> {
        let mut next = self.stats.clone();
        next.reset_today();
        self.commit(next)?;

        info!("today's counters reset");
        Ok(())
    }

    fn commit(&mut self, next: StatsRecord) -> Result<(), StudyNestError> {
        save_json(self.store, STATS_KEY, &next)?;
        self.stats = next;
        Ok(())
    }
}
