//! Application state for the focus screen.

use std::time::Duration;

use crate::core::Clock;
use crate::error::StudyNestError;
use crate::features::focus::{FocusController, SessionTimer, TimerEvent};
use crate::features::settings::{Settings, Theme};
use crate::features::stats::{StatsAggregator, StatsRecord};
use crate::features::tasks::{Task, TaskList};
use crate::storage::KeyValueStore;

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Application state.
pub struct App<'a, S: KeyValueStore + ?Sized> {
    focus: FocusController<'a, S>,
    tasks: TaskList<'a, S>,
    /// Color theme from settings.
    pub theme: Theme,
    /// Wall time not yet turned into timer ticks.
    elapsed: Duration,
    /// Status message to display.
    pub status: Option<String>,
}

impl<'a, S: KeyValueStore + ?Sized> App<'a, S> {
    /// Load settings, stats and tasks from the store.
    pub fn new(store: &'a S, clock: &'a dyn Clock) -> Self {
        let settings = Settings::load(store);
        Self {
            focus: FocusController::new(&settings, StatsAggregator::load(store, clock)),
            tasks: TaskList::load(store, clock),
            theme: settings.theme,
            elapsed: Duration::ZERO,
            status: Some("Press space to start focusing".to_string()),
        }
    }

    pub const fn timer(&self) -> &SessionTimer {
        self.focus.timer()
    }

    pub const fn stats(&self) -> &StatsRecord {
        self.focus.stats()
    }

    /// Today's (sessions, minutes).
    pub fn today_totals(&self) -> (u64, u64) {
        self.focus.today_totals()
    }

    /// The first unfinished task.
    pub fn current_task(&self) -> Option<&Task> {
        self.tasks.current()
    }

    /// Open tasks after the current one.
    pub fn upcoming_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.tasks().iter().filter(|task| !task.completed).skip(1)
    }

    /// Start or pause.
    pub fn toggle(&mut self) {
        self.focus.toggle();
        self.elapsed = Duration::ZERO;
        let status = if self.timer().is_running() {
            "Running"
        } else {
            "Paused"
        };
        self.status = Some(status.to_string());
    }

    pub fn reset(&mut self) {
        self.focus.reset();
        self.elapsed = Duration::ZERO;
        self.status = Some("Timer reset".to_string());
    }

    pub fn skip(&mut self) {
        self.focus.skip();
        self.elapsed = Duration::ZERO;
        self.status = Some(format!("Skipped to {}", self.timer().phase().display_name()));
    }

    /// Mark the current task completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the task list cannot be saved.
    pub fn complete_current(&mut self) -> Result<(), StudyNestError> {
        let Some(id) = self.tasks.current().map(|task| task.id) else {
            self.status = Some("No open tasks".to_string());
            return Ok(());
        };
        let task = self.tasks.toggle(id)?;
        self.status = Some(format!("Completed: {}", task.text));
        Ok(())
    }

    /// Feed wall time into the timer, one tick per whole second.
    ///
    /// # Errors
    ///
    /// Returns an error if a finished session cannot be recorded.
    pub fn advance(&mut self, by: Duration) -> Result<(), StudyNestError> {
        if !self.timer().is_running() {
            self.elapsed = Duration::ZERO;
            return Ok(());
        }

        self.elapsed += by;
        while self.elapsed >= ONE_SECOND {
            self.elapsed -= ONE_SECOND;
            match self.focus.tick()? {
                Some(TimerEvent::WorkCompleted { minutes }) => {
                    self.status = Some(format!(
                        "Focus session complete ({minutes} min)! Time for a break."
                    ));
                    self.elapsed = Duration::ZERO;
                }
                Some(TimerEvent::BreakCompleted) => {
                    self.status = Some("Break over. Ready to focus?".to_string());
                    self.elapsed = Duration::ZERO;
                }
                None => {}
            }
        }
        Ok(())
    }
}
