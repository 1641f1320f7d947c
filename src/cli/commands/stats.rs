//! Statistics command implementation.
//!
//! Handles the stats subcommands for study progress.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, StatsCommands};
use crate::core::{format_minutes, Clock};
use crate::error::StudyNestError;
use crate::features::stats::{
    render_bar_chart, render_sparkline, render_week_chart, StatsAggregator,
};
use crate::output::{format_stats_summary_pretty, to_json};
use crate::storage::KeyValueStore;

/// Execute stats subcommands.
///
/// # Errors
///
/// Returns an error if resetting fails to persist or output formatting fails.
pub fn stats(
    store: &dyn KeyValueStore,
    clock: &dyn Clock,
    cmd: Option<StatsCommands>,
    format: OutputFormat,
) -> Result<String, StudyNestError> {
    let mut aggregator = StatsAggregator::load(store, clock);

    match cmd {
        None | Some(StatsCommands::Summary) => render_summary(&aggregator, format),
        Some(StatsCommands::Week) => render_week(&aggregator, format),
        Some(StatsCommands::History) => render_history(&aggregator, format),
        Some(StatsCommands::ResetToday) => {
            aggregator.reset_today()?;
            match format {
                OutputFormat::Json => to_json(&json!({"reset": true})),
                OutputFormat::Pretty => Ok("Today's counters reset".green().to_string()),
            }
        }
    }
}

fn render_summary<S: KeyValueStore + ?Sized>(
    aggregator: &StatsAggregator<'_, S>,
    format: OutputFormat,
) -> Result<String, StudyNestError> {
    let stats = aggregator.stats();
    let today = aggregator.today();

    match format {
        OutputFormat::Json => {
            let (today_sessions, today_minutes) = stats.today_totals(today);
            to_json(&json!({
                "todaySessions": today_sessions,
                "todayMinutes": today_minutes,
                "totalSessions": stats.total_sessions,
                "totalMinutes": stats.total_minutes,
                "streakDays": stats.streak_days,
                "averageSessionMinutes": stats.average_session_minutes(),
                "lastSessionDate": stats.last_session_date,
            }))
        }
        OutputFormat::Pretty => Ok(format_stats_summary_pretty(stats, today)),
    }
}

fn render_week<S: KeyValueStore + ?Sized>(
    aggregator: &StatsAggregator<'_, S>,
    format: OutputFormat,
) -> Result<String, StudyNestError> {
    let week = aggregator.stats().week(aggregator.today());

    match format {
        OutputFormat::Json => to_json(&week),
        OutputFormat::Pretty => {
            let sessions: u64 = week.iter().map(|day| day.sessions).sum();
            let minutes: u64 = week.iter().map(|day| day.minutes).sum();

            let mut output = vec![
                "Last 7 days".bold().to_string(),
                "─".repeat(40),
                render_week_chart(&week, 30),
                String::new(),
                format!("  {sessions} sessions, {}", format_minutes(minutes)),
            ];
            if sessions == 0 {
                output.push("  No sessions this week yet".dimmed().to_string());
            }
            Ok(output.join("\n"))
        }
    }
}

fn render_history<S: KeyValueStore + ?Sized>(
    aggregator: &StatsAggregator<'_, S>,
    format: OutputFormat,
) -> Result<String, StudyNestError> {
    let history = &aggregator.stats().history;

    match format {
        OutputFormat::Json => to_json(history),
        OutputFormat::Pretty => {
            if history.is_empty() {
                return Ok("No sessions recorded yet".dimmed().to_string());
            }

            let data: Vec<(String, u64)> = history
                .iter()
                .rev()
                .map(|entry| (entry.date.format("%Y-%m-%d").to_string(), entry.minutes))
                .collect();
            let minutes: Vec<u64> = history.iter().map(|entry| entry.minutes).collect();

            let output = [
                format!("History ({} days, minutes per day)", history.len()).bold().to_string(),
                "─".repeat(40),
                render_bar_chart(&data, 10, 30),
                String::new(),
                format!("  Trend: {}", render_sparkline(&minutes).cyan()),
            ];
            Ok(output.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedClock;
    use crate::storage::MemoryStore;
    use chrono::{Duration, TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap())
    }

    fn seed(store: &MemoryStore, clock: &FixedClock) {
        let mut aggregator = StatsAggregator::load(store, clock);
        aggregator.add_session(25).unwrap();
        clock.advance(Duration::minutes(30));
        aggregator.add_session(25).unwrap();
    }

    #[test]
    fn test_summary_json() {
        let store = MemoryStore::new();
        let clock = clock();
        seed(&store, &clock);

        let output = stats(&store, &clock, None, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["todaySessions"], 2);
        assert_eq!(parsed["todayMinutes"], 50);
        assert_eq!(parsed["streakDays"], 1);
    }

    #[test]
    fn test_week_json_has_seven_days() {
        let store = MemoryStore::new();
        let clock = clock();
        seed(&store, &clock);

        let output = stats(&store, &clock, Some(StatsCommands::Week), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        let days = parsed.as_array().unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[6]["sessions"], 2);
    }

    #[test]
    fn test_history_pretty_empty() {
        let store = MemoryStore::new();
        let output =
            stats(&store, &clock(), Some(StatsCommands::History), OutputFormat::Pretty).unwrap();
        assert!(output.contains("No sessions recorded yet"));
    }

    #[test]
    fn test_reset_today() {
        let store = MemoryStore::new();
        let clock = clock();
        seed(&store, &clock);

        stats(&store, &clock, Some(StatsCommands::ResetToday), OutputFormat::Pretty).unwrap();

        let output = stats(&store, &clock, None, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["todaySessions"], 0);
        assert_eq!(parsed["totalSessions"], 2);
    }
}
