use chrono::NaiveDate;
use colored::Colorize;

use crate::core::format_minutes;
use crate::features::settings::Settings;
use crate::features::stats::StatsRecord;
use crate::features::tasks::Task;

/// Format a list of tasks as a pretty table
pub fn format_tasks_pretty(tasks: &[Task], title: &str) -> String {
    if tasks.is_empty() {
        return format!("{title} (0 items)\n  No tasks yet. Add one to get started!");
    }

    let done = tasks.iter().filter(|task| task.completed).count();
    let mut output = format!("{title} ({done}/{} done)\n", tasks.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for task in tasks {
        output.push_str(&task_line(task));
        output.push('\n');
    }

    output
}

fn task_line(task: &Task) -> String {
    let (icon, text) = if task.completed {
        ("[x]".green(), task.text.strikethrough().dimmed())
    } else {
        ("[ ]".white(), task.text.bold())
    };
    format!("{icon} {text}  {}", task.id.to_string().dimmed())
}

/// Format a single task as pretty output
pub fn format_task_pretty(task: &Task) -> String {
    let mut output = task_line(task);
    output.push_str(&format!(
        "\n  Created: {}",
        task.created_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
    ));
    output
}

/// Format settings as pretty output
pub fn format_settings_pretty(settings: &Settings) -> String {
    let rows = [
        ("work-duration", format!("{} min", settings.work_duration)),
        ("break-duration", format!("{} min", settings.break_duration)),
        ("default-sound", settings.default_sound.to_string()),
        ("theme", settings.theme.to_string()),
        ("volume", format!("{:.0}%", settings.volume * 100.0)),
    ];

    let mut output = format!("{}\n", "Settings".bold());
    output.push_str(&"─".repeat(40));
    for (key, value) in rows {
        output.push_str(&format!("\n  {:<16} {}", key.cyan(), value));
    }
    output
}

/// Format the stats overview as pretty output
pub fn format_stats_summary_pretty(stats: &StatsRecord, today: NaiveDate) -> String {
    let (today_sessions, today_minutes) = stats.today_totals(today);

    let mut lines = vec![
        format!("{}", "Study Statistics".bold()),
        "─".repeat(40),
        format!(
            "  {:<16} {} sessions, {}",
            "Today".cyan(),
            today_sessions,
            format_minutes(today_minutes)
        ),
        format!(
            "  {:<16} {} sessions, {}",
            "All time".cyan(),
            stats.total_sessions,
            format_minutes(stats.total_minutes)
        ),
        format!("  {:<16} {} day(s)", "Streak".cyan(), stats.streak_days),
    ];

    if stats.total_sessions > 0 {
        lines.push(format!(
            "  {:<16} {:.1} minutes",
            "Average".cyan(),
            stats.average_session_minutes()
        ));
    }

    lines.join("\n")
}
