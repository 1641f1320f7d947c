//! Connects the countdown to the statistics it produces.

use crate::error::StudyNestError;
use crate::features::settings::Settings;
use crate::features::stats::{StatsAggregator, StatsRecord};
use crate::storage::KeyValueStore;

use super::timer::{SessionTimer, TimerEvent};

/// A session timer whose completed work phases land in the stats store.
pub struct FocusController<'a, S: KeyValueStore + ?Sized> {
    timer: SessionTimer,
    stats: StatsAggregator<'a, S>,
}

impl<'a, S: KeyValueStore + ?Sized> FocusController<'a, S> {
    /// Create a controller with a paused timer sized from `settings`.
    pub fn new(settings: &Settings, stats: StatsAggregator<'a, S>) -> Self {
        Self {
            timer: SessionTimer::new(settings.durations()),
            stats,
        }
    }

    /// Advance the countdown by one second.
    ///
    /// A finished work phase is recorded before the event is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be persisted. The timer has
    /// already moved to the next phase at that point.
    pub fn tick(&mut self) -> Result<Option<TimerEvent>, StudyNestError> {
        let event = self.timer.tick();
        if let Some(TimerEvent::WorkCompleted { minutes }) = event {
            self.stats.add_session(minutes)?;
        }
        Ok(event)
    }

    pub fn toggle(&mut self) {
        self.timer.toggle();
    }

    pub fn reset(&mut self) {
        self.timer.reset();
    }

    pub fn skip(&mut self) {
        self.timer.skip();
    }

    /// Take new phase lengths; the running phase keeps its length.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.timer.set_durations(settings.durations());
    }

    #[must_use]
    pub const fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    #[must_use]
    pub const fn stats(&self) -> &StatsRecord {
        self.stats.stats()
    }

    /// Today's (sessions, minutes).
    #[must_use]
    pub fn today_totals(&self) -> (u64, u64) {
        self.stats.stats().today_totals(self.stats.today())
    }
}
