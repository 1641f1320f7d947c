//! Focus mode: the work/break countdown and its link to statistics.

mod controller;
mod timer;

pub use controller::FocusController;
pub use timer::{
    render_progress_bar, Phase, PhaseDurations, SessionTimer, TimerEvent, TimerSnapshot,
    TimerState,
};
