//! # New Entry Screen
//!
//! The record form: subject, treatment, applied date, interval policy with
//! live next-due preview, and weight.

use crate::core::TREATMENT_CHOICES;
use crate::tui::app::{FormField, PetMode, PolicyMode};
use crate::tui::ui::titled_block;
use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Render the new-entry screen
pub fn render_entry(frame: &mut Frame, app: &App, area: Rect) {
    let existing_pets = app.records.existing_pets();
    let form = &app.form;

    let mut lines: Vec<Line> = Vec::new();

    lines.push(selector_line(
        "Seçim Modu",
        match form.pet_mode {
            PetMode::FromList => "Listeden Seç",
            PetMode::NewName => "Yeni Pet Ekle",
        },
        form.focus == FormField::PetMode,
    ));

    if form.pet_mode == PetMode::FromList && !existing_pets.is_empty() {
        let index = form.pet_index.min(existing_pets.len() - 1);
        lines.push(selector_line(
            "Evcil Hayvan",
            &existing_pets[index],
            form.focus == FormField::PetSelect,
        ));
    } else {
        lines.push(input_line(
            "Evcil Hayvan İsmi (Örn: Max, Luna)",
            &form.pet_name,
            form.focus == FormField::PetName,
        ));
    }

    lines.push(selector_line(
        "Aşı / İşlem",
        TREATMENT_CHOICES[form.treatment_index],
        form.focus == FormField::Treatment,
    ));

    lines.push(input_line(
        "Uygulama Tarihi",
        &form.applied_date,
        form.focus == FormField::AppliedDate,
    ));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "📅 Hatırlatma Zamanlayıcısı",
        Style::default().add_modifier(Modifier::BOLD),
    )));

    lines.push(selector_line(
        "Zamanlama Tipi",
        match form.policy_mode {
            PolicyMode::Months => "Ay Bazlı (Otomatik)",
            PolicyMode::ManualDate => "Tarih Seçimi (Manuel)",
        },
        form.focus == FormField::PolicyMode,
    ));

    match form.policy_mode {
        PolicyMode::Months => {
            lines.push(selector_line(
                "Kaç ay sonra hatırlat?",
                &form.months.to_string(),
                form.focus == FormField::Months,
            ));
        }
        PolicyMode::ManualDate => {
            lines.push(input_line(
                "Sonraki Aşı Tarihi",
                &form.manual_date,
                form.focus == FormField::ManualDate,
            ));
        }
    }

    if let Some(preview) = app.next_due_preview() {
        lines.push(Line::from(Span::styled(
            format!("👉 Hesaplanan Tarih: {preview}"),
            Style::default().fg(Color::Cyan),
        )));
    }

    lines.push(Line::from(""));
    lines.push(input_line(
        "Güncel Kilo (kg)",
        &form.weight,
        form.focus == FormField::Weight,
    ));

    lines.push(Line::from(""));
    let submit_style = if form.focus == FormField::Submit {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };
    lines.push(Line::from(Span::styled("  [ Kaydet ]  ", submit_style)));

    frame.render_widget(
        Paragraph::new(lines).block(titled_block("💉 Yeni Kayıt")),
        area,
    );
}

fn selector_line<'a>(label: &'a str, value: &str, focused: bool) -> Line<'a> {
    let value_span = if focused {
        Span::styled(
            format!("◀ {value} ▶"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw(value.to_string())
    };
    Line::from(vec![Span::raw(format!("{label}: ")), value_span])
}

fn input_line<'a>(label: &'a str, value: &str, focused: bool) -> Line<'a> {
    let value_span = if focused {
        Span::styled(
            format!("{value}▌"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw(value.to_string())
    };
    Line::from(vec![Span::raw(format!("{label}: ")), value_span])
}
