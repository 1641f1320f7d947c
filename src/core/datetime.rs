//! Calendar-day keys and duration formatting.
//!
//! Statistics are bucketed by the calendar day in the local time zone; the
//! helpers here are the single place that decides what "today" means.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Calendar day of an instant in its own time zone.
#[must_use]
pub fn date_key<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.date_naive()
}

/// Calendar day of a UTC instant in the local time zone.
#[must_use]
pub fn local_date_key(instant: DateTime<Utc>) -> NaiveDate {
    date_key(&instant.with_timezone(&Local))
}

/// Format seconds as MM:SS.
///
/// Minutes are not wrapped into hours, so a 90 minute countdown reads `90:00`.
#[must_use]
pub fn format_mmss(seconds: u32) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a whole number of minutes as a human-readable string.
#[must_use]
pub fn format_minutes(total_minutes: u64) -> String {
    let plural = |n: u64| if n == 1 { "" } else { "s" };
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    match (hours, minutes) {
        (0, m) => format!("{m} minute{}", plural(m)),
        (h, 0) => format!("{h} hour{}", plural(h)),
        (h, m) => format!("{h} hour{}, {m} minute{}", plural(h), plural(m)),
    }
}

/// Parse a duration like "25", "25m", "1h" or "1h30m" into whole minutes.
///
/// A bare number is taken as minutes. Seconds are not accepted since timer
/// phases are configured in minutes.
#[must_use]
pub fn parse_minutes(s: &str) -> Option<u32> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<u32>() {
        return (minutes > 0).then_some(minutes);
    }

    let mut total: u32 = 0;
    let mut current = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current.push(c);
            continue;
        }
        if current.is_empty() {
            return None;
        }
        let num: u32 = current.parse().ok()?;
        current.clear();

        match c {
            'h' => total = total.checked_add(num.checked_mul(60)?)?,
            'm' => total = total.checked_add(num)?,
            _ => return None,
        }
    }

    // Trailing number without unit counts as minutes
    if !current.is_empty() {
        total = total.checked_add(current.parse().ok()?)?;
    }

    (total > 0).then_some(total)
}
