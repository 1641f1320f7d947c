//! The durable statistics document and its pure update rules.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::core::date_key;

/// Most recent history entries kept.
pub const HISTORY_LIMIT: usize = 30;

/// Sessions and minutes for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Calendar day, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Completed sessions that day
    pub sessions: u64,
    /// Focused minutes that day
    pub minutes: u64,
}

/// One bucket of a per-day breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    /// Calendar day
    pub date: NaiveDate,
    /// Completed sessions
    pub sessions: u64,
    /// Focused minutes
    pub minutes: u64,
}

/// Cumulative, per-day and rolling statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsRecord {
    pub total_sessions: u64,
    pub total_minutes: u64,
    /// Sessions on the day of `last_session_date`
    pub today_sessions: u64,
    /// Minutes on the day of `last_session_date`
    pub today_minutes: u64,
    pub streak_days: u64,
    pub last_session_date: Option<DateTime<Utc>>,
    /// One entry per day, oldest first, at most [`HISTORY_LIMIT`] long
    pub history: Vec<HistoryEntry>,
}

impl StatsRecord {
    /// Record a completed session, bucketing days in the local time zone.
    pub fn record_session(&mut self, minutes: u32, now: DateTime<Utc>) {
        self.record_session_in(minutes, now.with_timezone(&Local));
    }

    /// Record a completed session, bucketing days in `now`'s time zone.
    pub fn record_session_in<Tz: TimeZone>(&mut self, minutes: u32, now: DateTime<Tz>) {
        let minutes = u64::from(minutes);
        let today = date_key(&now);
        let last_day = self
            .last_session_date
            .map(|last| date_key(&last.with_timezone(&now.timezone())));
        let is_new_day = last_day != Some(today);

        match self.history.iter_mut().find(|entry| entry.date == today) {
            Some(entry) => {
                entry.sessions += 1;
                entry.minutes += minutes;
            }
            None => self.history.push(HistoryEntry {
                date: today,
                sessions: 1,
                minutes,
            }),
        }
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }

        self.total_sessions += 1;
        self.total_minutes += minutes;

        if is_new_day {
            self.today_sessions = 1;
            self.today_minutes = minutes;
        } else {
            self.today_sessions += 1;
            self.today_minutes += minutes;
        }

        if is_new_day && last_day.is_some() {
            self.streak_days += 1;
        } else if self.streak_days == 0 {
            self.streak_days = 1;
        }

        self.last_session_date = Some(now.with_timezone(&Utc));
    }

    /// Zero today's counters without touching totals or history.
    pub fn reset_today(&mut self) {
        self.today_sessions = 0;
        self.today_minutes = 0;
    }

    /// Today's `(sessions, minutes)`.
    ///
    /// The stored counters belong to the day of the last session; if that
    /// was not `today` nothing has been done today yet.
    #[must_use]
    pub fn today_totals(&self, today: NaiveDate) -> (u64, u64) {
        let last_day = self
            .last_session_date
            .map(|last| date_key(&last.with_timezone(&Local)));
        if last_day == Some(today) {
            (self.today_sessions, self.today_minutes)
        } else {
            (0, 0)
        }
    }

    /// History entry for a given day.
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&HistoryEntry> {
        self.history.iter().find(|entry| entry.date == date)
    }

    /// The seven days ending with `today`, oldest first, zero-filled.
    #[must_use]
    pub fn week(&self, today: NaiveDate) -> Vec<DaySummary> {
        (0..7)
            .rev()
            .map(|days_back| {
                let date = today - Duration::days(days_back);
                let (sessions, minutes) = self
                    .day(date)
                    .map_or((0, 0), |entry| (entry.sessions, entry.minutes));
                DaySummary {
                    date,
                    sessions,
                    minutes,
                }
            })
            .collect()
    }

    /// Mean minutes per session, 0 without sessions.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_session_minutes(&self) -> f64 {
        if self.total_sessions == 0 {
            return 0.0;
        }
        self.total_minutes as f64 / self.total_sessions as f64
    }
}
