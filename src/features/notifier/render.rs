//! # Reminder Rendering
//!
//! Turns one ReminderEvent into everything the mail transport needs: a
//! subject line, an HTML body, the ICS attachment, and the calendar add
//! link.
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: One message per event; the single digest body was retired
//! - 1.0.0: Initial digest-style rendering

use crate::core::dates::format_display_date;
use crate::features::notifier::gcal::calendar_add_link;
use crate::features::notifier::ics::build_event_payload;
use crate::features::scheduler::ReminderEvent;

/// Days-remaining threshold at or below which a reminder is urgent.
pub const HIGH_URGENCY_DAYS: i64 = 3;

/// Urgency marker derived from the days remaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    High,
    Normal,
}

impl Urgency {
    pub fn from_days_remaining(days_remaining: i64) -> Self {
        if days_remaining <= HIGH_URGENCY_DAYS {
            Urgency::High
        } else {
            Urgency::Normal
        }
    }

    /// Marker shown in the mail body.
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::High => "Yüksek",
            Urgency::Normal => "Normal",
        }
    }

    fn subject_prefix(&self) -> &'static str {
        match self {
            Urgency::High => "🚨",
            Urgency::Normal => "🐾",
        }
    }
}

/// A fully rendered reminder message, ready for the transport.
#[derive(Debug, Clone)]
pub struct RenderedReminder {
    pub subject: String,
    pub html_body: String,
    pub ics_payload: String,
    pub calendar_link: String,
}

/// Render one reminder event into a message.
pub fn render_reminder(event: &ReminderEvent) -> RenderedReminder {
    let urgency = Urgency::from_days_remaining(event.days_remaining);
    let due_display = format_display_date(event.due_date);
    let title = format!("{} - {}", event.subject_name, event.treatment_type);
    let calendar_link = calendar_add_link(&title, event.due_date);

    let subject = format!(
        "{} PatiLog Aşı Hatırlatması: {title} ({})",
        urgency.subject_prefix(),
        days_left_display(event.days_remaining)
    );

    let html_body = format!(
        "<h3>🐾 PatiLog Aşı Hatırlatması</h3>\
         <p><b>{subject_name}</b> için <b>{treatment}</b> zamanı yaklaşıyor.</p>\
         <ul>\
         <li>Tarih: <b>{due_display}</b></li>\
         <li>Kalan süre: <b>{days_left}</b></li>\
         <li>Öncelik: <b>{urgency_label}</b></li>\
         </ul>\
         <p><a href=\"{calendar_link}\">📅 Google Takvim'e ekle</a></p>",
        subject_name = event.subject_name,
        treatment = event.treatment_type,
        days_left = days_left_display(event.days_remaining),
        urgency_label = urgency.label(),
    );

    RenderedReminder {
        subject,
        html_body,
        ics_payload: build_event_payload(event),
        calendar_link,
    }
}

fn days_left_display(days_remaining: i64) -> String {
    match days_remaining {
        0 => "bugün".to_string(),
        1 => "1 gün".to_string(),
        n => format!("{n} gün"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::scheduler::reminder_identity;
    use chrono::NaiveDate;

    fn event(days_remaining: i64) -> ReminderEvent {
        let due = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        ReminderEvent {
            subject_name: "Max".to_string(),
            treatment_type: "Kuduz".to_string(),
            due_date: due,
            days_remaining,
            identity: reminder_identity("Max", "Kuduz", due),
        }
    }

    #[test]
    fn test_urgency_threshold() {
        assert_eq!(Urgency::from_days_remaining(0), Urgency::High);
        assert_eq!(Urgency::from_days_remaining(3), Urgency::High);
        assert_eq!(Urgency::from_days_remaining(4), Urgency::Normal);
        assert_eq!(Urgency::from_days_remaining(7), Urgency::Normal);
    }

    #[test]
    fn test_body_contains_localized_date_and_urgency() {
        let rendered = render_reminder(&event(2));
        assert!(rendered.html_body.contains("03.06.2025"));
        assert!(rendered.html_body.contains("2 gün"));
        assert!(rendered.html_body.contains("Yüksek"));
        assert!(rendered.html_body.contains("Max"));
        assert!(rendered.html_body.contains("Kuduz"));
    }

    #[test]
    fn test_due_today_reads_as_today() {
        let rendered = render_reminder(&event(0));
        assert!(rendered.html_body.contains("bugün"));
    }

    #[test]
    fn test_normal_urgency_rendering() {
        let rendered = render_reminder(&event(6));
        assert!(rendered.html_body.contains("Normal"));
        assert!(rendered.subject.starts_with("🐾"));
    }

    #[test]
    fn test_high_urgency_subject_prefix() {
        let rendered = render_reminder(&event(1));
        assert!(rendered.subject.starts_with("🚨"));
    }

    #[test]
    fn test_calendar_link_and_ics_share_the_event() {
        let e = event(2);
        let rendered = render_reminder(&e);
        assert!(rendered.html_body.contains(&rendered.calendar_link));
        assert!(rendered.ics_payload.contains(&e.identity));
    }
}
