//! Terminal visualization for statistics.
//!
//! Provides ASCII charts of recent activity.

use chrono::Datelike;

use super::record::DaySummary;

/// Characters for sparkline rendering.
const BAR_CHARS: [char; 8] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇'];
const FULL_BLOCK: char = '█';

/// Render a horizontal bar chart.
///
/// # Arguments
///
/// * `data` - Vec of (label, value) pairs
/// * `max_label_width` - Maximum width for labels
/// * `bar_width` - Width of the bar portion
///
/// # Returns
///
/// A multi-line string with the chart.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_bar_chart(
    data: &[(String, u64)],
    max_label_width: usize,
    bar_width: usize,
) -> String {
    if data.is_empty() {
        return String::new();
    }

    let max_value = data.iter().map(|(_, v)| *v).max().unwrap_or(1).max(1);
    let mut lines = Vec::new();

    for (label, value) in data {
        let label: String = label.chars().take(max_label_width).collect();
        let bar_length =
            ((*value as f64 / max_value as f64 * bar_width as f64) as usize).min(bar_width);
        let bar = FULL_BLOCK.to_string().repeat(bar_length);
        let padding = " ".repeat(bar_width - bar_length);

        lines.push(format!("{label:max_label_width$} |{bar}{padding} {value}"));
    }

    lines.join("\n")
}

/// Render a sparkline (compact inline chart).
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_sparkline(values: &[u64]) -> String {
    let max_value = values.iter().max().copied().unwrap_or(1).max(1);

    values
        .iter()
        .map(|&v| {
            if v == 0 {
                BAR_CHARS[0]
            } else {
                let normalized = (v as f64 / max_value as f64 * 7.0).round() as usize;
                BAR_CHARS[normalized.clamp(1, 7)]
            }
        })
        .collect()
}

/// Render sessions per day for a week breakdown, labelled by weekday.
#[must_use]
pub fn render_week_chart(week: &[DaySummary], bar_width: usize) -> String {
    let data: Vec<(String, u64)> = week
        .iter()
        .map(|day| (day.date.weekday().to_string(), day.sessions))
        .collect();
    render_bar_chart(&data, 3, bar_width)
}
