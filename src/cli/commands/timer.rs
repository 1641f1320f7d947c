//! Foreground timer command.
//!
//! Counts down in the terminal, one tick per configured interval, and
//! records each finished work phase through the focus controller.

use std::io::Write;
use std::ops::RangeInclusive;
use std::time::Duration;

use colored::Colorize;
use serde::Serialize;

use crate::cli::args::{OutputFormat, TimerCommands};
use crate::core::{format_minutes, Clock};
use crate::error::StudyNestError;
use crate::features::focus::{render_progress_bar, FocusController, TimerEvent};
use crate::features::settings::{Settings, BREAK_DURATION_RANGE, WORK_DURATION_RANGE};
use crate::features::stats::StatsAggregator;
use crate::output::to_json;
use crate::storage::KeyValueStore;

/// Options for a foreground run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Work phase override in minutes
    pub work: Option<u32>,
    /// Break phase override in minutes
    pub break_minutes: Option<u32>,
    /// Work phases to complete
    pub cycles: u32,
    /// Skip the break after the last work phase
    pub no_break: bool,
    /// Wall time per timer second
    pub tick: Duration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunSummary {
    sessions_recorded: u32,
    minutes_focused: u64,
    today_sessions: u64,
    today_minutes: u64,
    streak_days: u64,
}

/// Execute timer subcommands.
///
/// # Errors
///
/// Returns an error for out-of-range durations, or if a session cannot be
/// recorded or the terminal cannot be written.
pub fn timer(
    store: &dyn KeyValueStore,
    clock: &dyn Clock,
    cmd: TimerCommands,
    format: OutputFormat,
) -> Result<String, StudyNestError> {
    match cmd {
        TimerCommands::Run {
            work,
            break_minutes,
            cycles,
            no_break,
            tick_ms,
        } => run(
            store,
            clock,
            RunOptions {
                work,
                break_minutes,
                cycles,
                no_break,
                tick: Duration::from_millis(tick_ms),
            },
            format,
        ),
    }
}

/// Run work/break cycles until `options.cycles` work phases are done.
///
/// # Errors
///
/// See [`timer`].
pub fn run(
    store: &dyn KeyValueStore,
    clock: &dyn Clock,
    options: RunOptions,
    format: OutputFormat,
) -> Result<String, StudyNestError> {
    let mut settings = Settings::load(store);
    if let Some(work) = options.work {
        check_range("work", work, &WORK_DURATION_RANGE)?;
        settings.work_duration = work;
    }
    if let Some(minutes) = options.break_minutes {
        check_range("break", minutes, &BREAK_DURATION_RANGE)?;
        settings.break_duration = minutes;
    }

    let mut focus = FocusController::new(&settings, StatsAggregator::load(store, clock));
    let live = format == OutputFormat::Pretty && !options.tick.is_zero();
    let mut sessions = 0u32;
    let mut minutes_focused = 0u64;

    tracing::info!(
        work = settings.work_duration,
        rest = settings.break_duration,
        cycles = options.cycles,
        "timer run started"
    );

    focus.toggle();
    if live {
        draw(&focus)?;
    }
    loop {
        if !options.tick.is_zero() {
            std::thread::sleep(options.tick);
        }

        let event = focus.tick()?;
        if live {
            draw(&focus)?;
        }

        match event {
            Some(TimerEvent::WorkCompleted { minutes }) => {
                sessions += 1;
                minutes_focused += u64::from(minutes);
                if live {
                    let done = format!("Focus phase done ({sessions}/{})", options.cycles);
                    println!("\n{}", done.green());
                }
                if sessions >= options.cycles && options.no_break {
                    break;
                }
                focus.toggle();
            }
            Some(TimerEvent::BreakCompleted) => {
                if live {
                    println!("\n{}", "Break over".cyan());
                }
                if sessions >= options.cycles {
                    break;
                }
                focus.toggle();
            }
            None => {}
        }
    }

    let (today_sessions, today_minutes) = focus.today_totals();
    let summary = RunSummary {
        sessions_recorded: sessions,
        minutes_focused,
        today_sessions,
        today_minutes,
        streak_days: focus.stats().streak_days,
    };

    match format {
        OutputFormat::Json => to_json(&summary),
        OutputFormat::Pretty => Ok(format!(
            "{} {} session(s), {}\n  Today: {} session(s), {}  Streak: {} day(s)",
            "Recorded".green().bold(),
            summary.sessions_recorded,
            format_minutes(summary.minutes_focused),
            summary.today_sessions,
            format_minutes(summary.today_minutes),
            summary.streak_days
        )),
    }
}

fn check_range(name: &str, value: u32, range: &RangeInclusive<u32>) -> Result<(), StudyNestError> {
    if !range.contains(&value) {
        return Err(StudyNestError::InvalidInput(format!(
            "--{name} must be between {} and {} minutes, got {value}",
            range.start(),
            range.end()
        )));
    }
    Ok(())
}

fn draw<S: KeyValueStore + ?Sized>(focus: &FocusController<'_, S>) -> Result<(), StudyNestError> {
    let timer = focus.timer();
    let name = format!("{:<6}", timer.phase().display_name());
    let label = if timer.is_break() { name.cyan() } else { name.red() };

    let mut stdout = std::io::stdout().lock();
    write!(
        stdout,
        "\r{label} {} {}",
        render_progress_bar(timer.progress(), 30),
        timer.format_remaining().bold()
    )?;
    stdout.flush()?;
    Ok(())
}
