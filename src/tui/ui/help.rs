//! # Help Screen
//!
//! Key reference.

use crate::tui::ui::titled_block;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Render the help screen
pub fn render_help(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Ekranlar",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  1        Genel Bakış"),
        Line::from("  2        Yeni Kayıt"),
        Line::from("  ?        Yardım"),
        Line::from(""),
        Line::from(Span::styled(
            "Genel Bakış",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  ↑/k ↓/j  Satırlar arasında gezin"),
        Line::from("  boşluk   Satırı silinecek olarak işaretle"),
        Line::from("  d        İşaretli satırları sil"),
        Line::from("  r        Kayıtları yeniden yükle"),
        Line::from("  g / G    İlk / son satıra atla"),
        Line::from(""),
        Line::from(Span::styled(
            "Yeni Kayıt",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  Tab/↑↓   Alanlar arasında gezin"),
        Line::from("  ← →      Seçenek değiştir"),
        Line::from("  Enter    Sonraki alan / Kaydet"),
        Line::from("  Esc      Genel Bakış'a dön"),
        Line::from(""),
        Line::from("  q / Ctrl-C  Çıkış"),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(titled_block("Yardım")),
        area,
    );
}
