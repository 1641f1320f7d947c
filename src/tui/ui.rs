//! UI rendering for the focus screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

use crate::features::focus::Phase;
use crate::features::settings::Theme;
use crate::storage::KeyValueStore;
use crate::tui::app::App;

/// Key help shown when there is no status message.
pub const HELP: &str = "space:start/pause | r:reset | s:skip | d:done | q:quit";

/// Render the application UI.
pub fn render<S: KeyValueStore + ?Sized>(frame: &mut Frame<'_>, app: &App<'_, S>) {
    // Create layout: timer, progress, task, tasks, stats, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Timer
            Constraint::Length(3), // Progress
            Constraint::Length(3), // Current task
            Constraint::Min(0),    // Upcoming
            Constraint::Length(3), // Today
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_timer(frame, app, chunks[0]);
    render_progress(frame, app, chunks[1]);
    render_current_task(frame, app, chunks[2]);
    render_upcoming(frame, app, chunks[3]);
    render_today(frame, app, chunks[4]);
    render_status_bar(frame, app, chunks[5]);
}

const fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Work => Color::Red,
        Phase::Break => Color::Green,
    }
}

const fn text_color(theme: Theme) -> Color {
    match theme {
        Theme::Light => Color::Black,
        Theme::Dark => Color::White,
    }
}

fn bordered(title: &str, theme: Theme) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(text_color(theme)))
}

fn render_timer<S: KeyValueStore + ?Sized>(frame: &mut Frame<'_>, app: &App<'_, S>, area: Rect) {
    let timer = app.timer();
    let color = phase_color(timer.phase());
    let state = if timer.is_running() { "running" } else { "paused" };

    let lines = vec![
        Line::from(Span::styled(
            timer.format_remaining(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} ({state})", timer.phase().display_name()),
            Style::default().fg(color),
        )),
        Line::from(format!("Sessions this run: {}", timer.sessions_completed())),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(bordered(" StudyNest ", app.theme));
    frame.render_widget(paragraph, area);
}

fn render_progress<S: KeyValueStore + ?Sized>(frame: &mut Frame<'_>, app: &App<'_, S>, area: Rect) {
    let timer = app.timer();
    let gauge = Gauge::default()
        .block(bordered(" Progress ", app.theme))
        .gauge_style(Style::default().fg(phase_color(timer.phase())))
        .ratio(timer.progress().clamp(0.0, 1.0));
    frame.render_widget(gauge, area);
}

fn render_current_task<S: KeyValueStore + ?Sized>(
    frame: &mut Frame<'_>,
    app: &App<'_, S>,
    area: Rect,
) {
    let text = app.current_task().map_or_else(
        || Span::styled("No open tasks", Style::default().fg(Color::DarkGray)),
        |task| Span::styled(task.text.clone(), Style::default().add_modifier(Modifier::BOLD)),
    );
    let paragraph = Paragraph::new(Line::from(text)).block(bordered(" Current task ", app.theme));
    frame.render_widget(paragraph, area);
}

fn render_upcoming<S: KeyValueStore + ?Sized>(frame: &mut Frame<'_>, app: &App<'_, S>, area: Rect) {
    let items: Vec<ListItem<'_>> = app
        .upcoming_tasks()
        .map(|task| ListItem::new(format!("[ ] {}", task.text)))
        .collect();
    let list = List::new(items).block(bordered(" Up next ", app.theme));
    frame.render_widget(list, area);
}

fn render_today<S: KeyValueStore + ?Sized>(frame: &mut Frame<'_>, app: &App<'_, S>, area: Rect) {
    let (sessions, minutes) = app.today_totals();
    let line = Line::from(vec![
        Span::styled(format!("{sessions} sessions"), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(format!("{minutes} min"), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(
            format!("streak {} day(s)", app.stats().streak_days),
            Style::default().fg(Color::Yellow),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).block(bordered(" Today ", app.theme)), area);
}

fn render_status_bar<S: KeyValueStore + ?Sized>(
    frame: &mut Frame<'_>,
    app: &App<'_, S>,
    area: Rect,
) {
    let status = Paragraph::new(app.status.as_deref().unwrap_or(HELP))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedClock;
    use crate::features::tasks::TaskList;
    use crate::storage::MemoryStore;
    use chrono::{TimeZone, Utc};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text<S: KeyValueStore + ?Sized>(app: &App<'_, S>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_render_fresh_screen() {
        let store = MemoryStore::new();
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
        let app = App::new(&store, &clock);

        let text = screen_text(&app);
        assert!(text.contains("25:00"));
        assert!(text.contains("Focus (paused)"));
        assert!(text.contains("No open tasks"));
        assert!(text.contains("0 sessions"));
    }

    #[test]
    fn test_render_shows_current_task() {
        let store = MemoryStore::new();
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
        TaskList::load(&store, &clock).add("Revise chapter 2").unwrap();
        let app = App::new(&store, &clock);

        assert!(screen_text(&app).contains("Revise chapter 2"));
    }
}
