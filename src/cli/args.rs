use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "studynest")]
#[command(about = "A focus timer, task list and study statistics for the terminal")]
#[command(long_about = "studynest - focus timer and study tracker

Work in timed focus phases separated by short breaks. Every finished focus
phase counts as a session in your statistics, alongside a simple task list.

QUICK START:
  studynest focus                 Open the full-screen focus timer
  studynest timer run             Run a 25/5 cycle in the foreground
  studynest task add \"Read ch. 3\" Add a task
  studynest stats                 See today's progress and your streak

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  studynest <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output,
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to the value in config.yaml.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Directory holding the database, config and logs
    #[arg(long, global = true, env = "STUDYNEST_HOME", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Also write log output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the focus timer in the foreground
    ///
    /// Counts down work and break phases in the terminal. Each finished
    /// work phase is recorded as a session.
    ///
    /// # Examples
    ///
    ///   studynest timer run                     One 25/5 cycle
    ///   studynest timer run --work 50 --break 10
    ///   studynest timer run --cycles 4          Four cycles back to back
    ///   studynest timer run --no-break          Stop after the work phase
    Timer(TimerArgs),

    /// Open the full-screen focus screen
    ///
    /// Shows the countdown, the current task and today's progress.
    ///
    /// # Keys
    ///
    ///   space   Start / pause
    ///   r       Reset to a fresh work phase
    ///   s       Skip to the other phase
    ///   q       Quit
    #[command(alias = "f")]
    Focus,

    /// Manage the task list
    ///
    /// # Subcommands
    ///
    ///   add      Add a task
    ///   list     List tasks, newest first
    ///   done     Toggle a task's completed state
    ///   edit     Change a task's text
    ///   rm       Delete a task
    ///   clear    Delete all completed tasks
    ///   current  Show the task you are working on
    ///
    /// # Examples
    ///
    ///   studynest task add "Summarise lecture 4"
    ///   studynest task done 1717236000000
    ///   studynest task clear
    #[command(alias = "t")]
    Task(TaskArgs),

    /// View study statistics
    ///
    /// # Subcommands
    ///
    ///   summary      Today, all-time totals and streak (default)
    ///   week         Minutes per day over the last seven days
    ///   history      Every recorded day, up to 30
    ///   reset-today  Zero today's counters
    ///
    /// # Examples
    ///
    ///   studynest stats
    ///   studynest stats week
    ///   studynest stats history -o json
    Stats(StatsArgs),

    /// Show or change settings
    ///
    /// # Keys
    ///
    ///   work-duration    Work phase in minutes (1-60)
    ///   break-duration   Break phase in minutes (1-30)
    ///   default-sound    rain, whitenoise, forest, cafe or ocean
    ///   theme            light or dark
    ///   volume           0.0 to 1.0
    ///
    /// # Examples
    ///
    ///   studynest settings
    ///   studynest settings set work-duration 50
    ///   studynest settings reset
    Settings(SettingsArgs),

    /// Export tasks, settings and stats to a JSON backup
    ///
    /// Writes studynest-backup-YYYY-MM-DD.json into the backups
    /// directory unless --out is given. Use --out - for stdout.
    Export {
        /// Destination file
        #[arg(long, short = 'O', value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Import a JSON backup
    ///
    /// Replaces the task list, merges settings and replaces stats. A file
    /// that fails validation changes nothing.
    Import {
        /// Backup file to read
        path: PathBuf,
    },

    /// Generate shell completions
    ///
    /// Example: studynest completions bash > ~/.bash_completion.d/studynest
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,

        /// Show installation instructions instead
        #[arg(long, short = 'i')]
        install: bool,
    },
}

/// Arguments for the foreground timer.
#[derive(Args)]
pub struct TimerArgs {
    #[command(subcommand)]
    pub command: TimerCommands,
}

/// Timer subcommands.
#[derive(Subcommand)]
pub enum TimerCommands {
    /// Count down work and break phases
    Run {
        /// Work phase length (e.g. 25, 25m, 1h); defaults to settings
        #[arg(long, short = 'w', value_parser = parse_minutes_arg)]
        work: Option<u32>,

        /// Break phase length; defaults to settings
        #[arg(long = "break", short = 'b', value_parser = parse_minutes_arg)]
        break_minutes: Option<u32>,

        /// Number of work phases to run
        #[arg(
            long,
            short = 'c',
            default_value = "1",
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        cycles: u32,

        /// Stop after the last work phase instead of running its break
        #[arg(long)]
        no_break: bool,

        /// Milliseconds per timer second (lower to speed up)
        #[arg(long, default_value = "1000", hide = true)]
        tick_ms: u64,
    },
}

/// Arguments for task management.
#[derive(Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: Option<TaskCommands>,
}

/// Task subcommands.
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    #[command(alias = "a")]
    Add {
        /// Task text; words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List tasks
    #[command(alias = "ls")]
    List {
        /// Hide completed tasks
        #[arg(long, short = 'p')]
        pending: bool,
    },

    /// Toggle a task between open and completed
    Done {
        /// Task ID
        id: i64,
    },

    /// Replace a task's text
    Edit {
        /// Task ID
        id: i64,

        /// New text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Delete a task
    #[command(alias = "delete")]
    Rm {
        /// Task ID
        id: i64,
    },

    /// Delete all completed tasks
    Clear,

    /// Show the first unfinished task
    Current,
}

/// Arguments for statistics.
#[derive(Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: Option<StatsCommands>,
}

/// Statistics subcommands.
#[derive(Subcommand)]
pub enum StatsCommands {
    /// Today, all-time totals and streak
    Summary,

    /// Per-day chart of the last seven days
    Week,

    /// Every recorded day with a sparkline
    History,

    /// Zero today's session and minute counters
    ResetToday,
}

/// Arguments for settings.
#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: Option<SettingsCommands>,
}

/// Settings subcommands.
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show,

    /// Change one setting
    Set {
        /// Setting name (work-duration, break-duration, default-sound, theme, volume)
        key: String,

        /// New value
        value: String,
    },

    /// Restore default settings
    Reset,
}

fn parse_minutes_arg(s: &str) -> Result<u32, String> {
    crate::core::parse_minutes(s)
        .ok_or_else(|| format!("'{s}' is not a duration in minutes (e.g. 25, 25m, 1h30m)"))
}
