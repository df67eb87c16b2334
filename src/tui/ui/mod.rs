//! # TUI Rendering
//!
//! Screen layout and shared widgets.

pub mod entry;
pub mod help;
pub mod overview;

use crate::tui::{App, Screen};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

/// Render the full frame: tab bar, active screen, status line.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Screen body
            Constraint::Length(3), // Status line
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);

    match app.current_screen {
        Screen::Overview => overview::render_overview(frame, app, chunks[1]),
        Screen::NewEntry => entry::render_entry(frame, app, chunks[1]),
        Screen::Help => help::render_help(frame, chunks[1]),
    }

    render_status(frame, app, chunks[2]);
}

/// A bordered block with a padded title
pub fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .map(|screen| {
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", screen.key()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(screen.title()),
            ])
        })
        .collect();

    let selected = Screen::all()
        .iter()
        .position(|s| *s == app.current_screen)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Green))
        .block(titled_block("🐾 PatiLog"));

    frame.render_widget(tabs, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(error) = &app.error_message {
        Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(status) = &app.status_message {
        Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from(Span::styled(
            match app.current_screen {
                Screen::Overview => "↑↓ gezin · boşluk işaretle · d sil · r yenile · q çıkış",
                Screen::NewEntry => "Tab/↑↓ alan · ←→ seçenek · Enter kaydet · Esc geri",
                Screen::Help => "Esc geri · q çıkış",
            },
            Style::default().fg(Color::DarkGray),
        ))
    };

    frame.render_widget(Paragraph::new(line).block(titled_block("Durum")), area);
}
