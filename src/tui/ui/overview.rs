//! # Overview Screen
//!
//! Record table sorted by next-due date, with deletion marks and a
//! weight-history pane for the selected pet.

use crate::core::dates::{format_display_date, parse_due_date};
use crate::tui::ui::titled_block;
use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::{Cell, Paragraph, Row, Sparkline, Table};

/// Render the overview screen
pub fn render_overview(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
        .split(area);

    render_record_table(frame, app, chunks[0]);
    render_pet_pane(frame, app, chunks[1]);
}

fn render_record_table(frame: &mut Frame, app: &App, area: Rect) {
    if app.records.is_empty() {
        let empty = Paragraph::new("Henüz kayıt yok. Yeni kayıt ekleyerek başlayın. ([2])")
            .block(titled_block("Kayıtlar"));
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        " ", "Pet", "Aşı / İşlem", "Uygulama", "Sonraki", "Kilo", "Kalan",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .records
        .display_rows()
        .enumerate()
        .map(|(display_index, (store_index, record))| {
            let mark = if app.records.is_marked(store_index) {
                "✗"
            } else {
                " "
            };

            let row = Row::new(vec![
                Cell::from(mark),
                Cell::from(record.subject_name.clone()),
                Cell::from(record.treatment_type.clone()),
                Cell::from(display_date(&record.applied_date)),
                Cell::from(display_date(&record.next_due_date)),
                Cell::from(record.weight_display()),
                days_left_cell(app, &record.next_due_date),
            ]);

            if display_index == app.records.selected {
                row.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                row
            }
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Length(14),
        Constraint::Length(18),
        Constraint::Length(11),
        Constraint::Length(11),
        Constraint::Length(9),
        Constraint::Min(10),
    ];

    let title = format!(
        "Kayıtlar ({}, {} işaretli)",
        app.records.len(),
        app.records.marked_count()
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(&title));

    frame.render_widget(table, area);
}

/// A date cell in `DD.MM.YYYY`, falling back to the raw cell contents.
fn display_date(raw: &str) -> String {
    match parse_due_date(raw) {
        Some(date) => format_display_date(date),
        None => {
            if raw.trim().is_empty() {
                "-".to_string()
            } else {
                raw.to_string()
            }
        }
    }
}

fn days_left_cell<'a>(app: &App, next_due: &str) -> Cell<'a> {
    let Some(due) = parse_due_date(next_due) else {
        return Cell::from("-").style(Style::default().fg(Color::DarkGray));
    };

    let days = (due - app.today).num_days();
    if days < 0 {
        Cell::from(format!("{} gün gecikti", -days)).style(Style::default().fg(Color::Red))
    } else if days == 0 {
        Cell::from("bugün").style(Style::default().fg(Color::Yellow))
    } else if days <= 3 {
        Cell::from(format!("{days} gün")).style(Style::default().fg(Color::Yellow))
    } else {
        Cell::from(format!("{days} gün")).style(Style::default().fg(Color::Green))
    }
}

fn render_pet_pane(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let Some(record) = app.records.selected_record() else {
        frame.render_widget(Paragraph::new("").block(titled_block("Detay")), chunks[0]);
        return;
    };

    let weights = app.records.weight_history(&record.subject_name);
    let latest_weight = weights
        .last()
        .map(|kg| format!("{kg:.1} kg"))
        .unwrap_or_else(|| "-".to_string());

    let info_lines = vec![
        Line::from(vec![
            Span::raw("Pet:       "),
            Span::styled(
                record.subject_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!(
            "Kayıt:     {}",
            app.records.record_count_for(&record.subject_name)
        )),
        Line::from(format!("Son kilo:  {latest_weight}")),
        Line::from(format!("Son işlem: {}", record.treatment_type)),
    ];
    frame.render_widget(
        Paragraph::new(info_lines).block(titled_block("Detay")),
        chunks[0],
    );

    // One decimal of precision survives the u64 scaling
    let scaled: Vec<u64> = weights.iter().map(|kg| (kg * 10.0) as u64).collect();
    let sparkline = Sparkline::default()
        .data(&scaled)
        .style(Style::default().fg(Color::Cyan))
        .block(titled_block("Kilo Geçmişi"));
    frame.render_widget(sparkline, chunks[1]);
}
