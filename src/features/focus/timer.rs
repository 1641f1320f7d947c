//! Work/break countdown state machine.
//!
//! The timer alternates between a work phase and a break phase. Ticks only
//! count down while running; reaching zero stops the timer, switches phase,
//! and reports what finished through the return value of [`SessionTimer::tick`].

use serde::{Deserialize, Serialize};

use crate::core::format_mmss;

/// Which countdown is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Focus interval
    Work,
    /// Rest interval
    Break,
}

impl Phase {
    /// The other phase.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Work => "Focus",
            Self::Break => "Break",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Combined phase and run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    /// Work countdown is running
    WorkRunning,
    /// Work countdown is paused
    WorkPaused,
    /// Break countdown is running
    BreakRunning,
    /// Break countdown is paused
    BreakPaused,
}

/// Configured phase lengths in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseDurations {
    /// Work phase length
    pub work_minutes: u32,
    /// Break phase length
    pub break_minutes: u32,
}

impl PhaseDurations {
    /// Create durations from minutes.
    #[must_use]
    pub const fn new(work_minutes: u32, break_minutes: u32) -> Self {
        Self {
            work_minutes,
            break_minutes,
        }
    }

    /// Length of a phase in seconds.
    #[must_use]
    pub const fn seconds(&self, phase: Phase) -> u32 {
        let minutes = match phase {
            Phase::Work => self.work_minutes,
            Phase::Break => self.break_minutes,
        };
        minutes.saturating_mul(60)
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self::new(25, 5)
    }
}

/// What a tick finished, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    /// A work phase ran to zero; this is a completed session.
    WorkCompleted {
        /// Length of the finished work phase
        minutes: u32,
    },
    /// A break ran to zero. Not counted in statistics.
    BreakCompleted,
}

/// Serializable view of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    /// Remaining seconds in the current phase
    pub time_left_seconds: u32,
    /// Whether the countdown is running
    pub is_running: bool,
    /// Whether the break phase is active
    pub is_break: bool,
    /// Work phases completed since the timer was created
    pub sessions_completed: u32,
}

/// A work/break countdown.
#[derive(Debug, Clone)]
pub struct SessionTimer {
    /// Durations applied on the next phase entry
    durations: PhaseDurations,
    /// Length of the phase as it was entered
    phase_seconds: u32,
    /// Remaining seconds
    time_left: u32,
    running: bool,
    phase: Phase,
    sessions_completed: u32,
}

impl SessionTimer {
    /// Create a paused timer at the start of a work phase.
    #[must_use]
    pub const fn new(durations: PhaseDurations) -> Self {
        let seconds = durations.seconds(Phase::Work);
        Self {
            durations,
            phase_seconds: seconds,
            time_left: seconds,
            running: false,
            phase: Phase::Work,
            sessions_completed: 0,
        }
    }

    /// Start or pause the countdown.
    pub fn toggle(&mut self) {
        self.running = !self.running;
        tracing::debug!(running = self.running, phase = %self.phase, "timer toggled");
    }

    /// Stop and go back to the start of a work phase.
    pub fn reset(&mut self) {
        self.running = false;
        self.enter(Phase::Work);
    }

    /// Switch phase without completing anything.
    ///
    /// The run state is left as it was.
    pub fn skip(&mut self) {
        self.enter(self.phase.toggled());
        tracing::debug!(phase = %self.phase, "phase skipped");
    }

    /// Advance the countdown by one second.
    ///
    /// Does nothing while paused. When the countdown reaches zero the timer
    /// stops, switches phase and returns the event for the finished phase.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }

        if self.time_left > 1 {
            self.time_left -= 1;
            return None;
        }

        self.running = false;
        let event = match self.phase {
            Phase::Work => {
                self.sessions_completed += 1;
                TimerEvent::WorkCompleted {
                    minutes: self.phase_seconds / 60,
                }
            }
            Phase::Break => TimerEvent::BreakCompleted,
        };
        self.enter(self.phase.toggled());

        tracing::debug!(?event, sessions = self.sessions_completed, "phase finished");
        Some(event)
    }

    /// Change phase lengths.
    ///
    /// The running countdown keeps its length; the new values apply from the
    /// next reset, skip, or phase change.
    pub fn set_durations(&mut self, durations: PhaseDurations) {
        self.durations = durations;
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.phase_seconds = self.durations.seconds(phase);
        self.time_left = self.phase_seconds;
    }

    /// Remaining seconds in the current phase.
    #[must_use]
    pub const fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Check if the countdown is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Check if the break phase is active.
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self.phase, Phase::Break)
    }

    /// Work phases completed since creation.
    #[must_use]
    pub const fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    /// The active phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Durations that the next phase entry will use.
    #[must_use]
    pub const fn durations(&self) -> PhaseDurations {
        self.durations
    }

    /// Get the current state.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        match (self.phase, self.running) {
            (Phase::Work, true) => TimerState::WorkRunning,
            (Phase::Work, false) => TimerState::WorkPaused,
            (Phase::Break, true) => TimerState::BreakRunning,
            (Phase::Break, false) => TimerState::BreakPaused,
        }
    }

    /// Get progress through the current phase (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.phase_seconds == 0 {
            return 1.0;
        }
        1.0 - (f64::from(self.time_left) / f64::from(self.phase_seconds))
    }

    /// Format remaining time as MM:SS.
    #[must_use]
    pub fn format_remaining(&self) -> String {
        format_mmss(self.time_left)
    }

    /// Serializable view of the timer.
    #[must_use]
    pub const fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            time_left_seconds: self.time_left,
            is_running: self.running,
            is_break: self.is_break(),
            sessions_completed: self.sessions_completed,
        }
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new(PhaseDurations::default())
    }
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64) as usize).min(width);
    let empty = width - filled;

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
