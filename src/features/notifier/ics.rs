//! # Calendar Attachment Builder
//!
//! Hand-built RFC 5545 payloads, one VEVENT per reminder. METHOD:PUBLISH
//! with no attendee or organizer fields: the event is an informational
//! snapshot, not a meeting invitation. The UID is the reminder identity,
//! so re-sent payloads update the existing calendar entry instead of
//! duplicating it.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: TRANSP:TRANSPARENT so reminders never block free/busy
//! - 1.0.0: Initial strict RFC 5545 output

use crate::features::scheduler::ReminderEvent;
use chrono::{Duration, NaiveDate, Utc};

/// Product identifier carried in every payload.
pub const PRODID: &str = "-//PatiLog//Vaccine Check//TR";

/// Local time-of-day the reminder event starts at.
pub const REMINDER_HOUR: u32 = 9;

/// Event duration in minutes.
pub const EVENT_DURATION_MINUTES: i64 = 15;

/// Strip characters that break ICS property values.
///
/// Newlines and carriage returns become spaces, semicolons are dropped,
/// commas become spaces, matching the legacy sheet contents downstream
/// calendars already accepted.
pub fn sanitize_text(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            '\n' | '\r' | ',' => Some(' '),
            ';' => None,
            other => Some(other),
        })
        .collect()
}

/// Build the full VCALENDAR payload for one reminder event.
pub fn build_event_payload(event: &ReminderEvent) -> String {
    let title = sanitize_text(&format!(
        "{} - {}",
        event.subject_name, event.treatment_type
    ));
    let start = floating_time(event.due_date, REMINDER_HOUR, 0);
    let end = floating_time_plus(event.due_date, REMINDER_HOUR, EVENT_DURATION_MINUTES);
    let stamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
        "METHOD:PUBLISH".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}", event.identity),
        format!("DTSTAMP:{stamp}"),
        format!("DTSTART:{start}"),
        format!("DTEND:{end}"),
        format!("SUMMARY:{title}"),
        "DESCRIPTION:Hatırlatma: PatiLog".to_string(),
        "STATUS:CONFIRMED".to_string(),
        "TRANSP:TRANSPARENT".to_string(),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];

    // RFC 5545 requires CRLF line endings
    let mut payload = lines.join("\r\n");
    payload.push_str("\r\n");
    payload
}

/// Format a floating local date-time (no timezone suffix).
fn floating_time(date: NaiveDate, hour: u32, minute: u32) -> String {
    format!("{}T{hour:02}{minute:02}00", date.format("%Y%m%d"))
}

fn floating_time_plus(date: NaiveDate, hour: u32, minutes: i64) -> String {
    // Duration never crosses midnight with a 09:00 start and 15-minute span
    let total = i64::from(hour) * 60 + minutes;
    let end_date = date + Duration::days(total / (24 * 60));
    let remainder = total % (24 * 60);
    floating_time(end_date, (remainder / 60) as u32, (remainder % 60) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::scheduler::reminder_identity;
    use chrono::NaiveDate;

    fn event() -> ReminderEvent {
        let due = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        ReminderEvent {
            subject_name: "Max".to_string(),
            treatment_type: "Kuduz".to_string(),
            due_date: due,
            days_remaining: 2,
            identity: reminder_identity("Max", "Kuduz", due),
        }
    }

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("Max\nLuna"), "Max Luna");
        assert_eq!(sanitize_text("a;b"), "ab");
        assert_eq!(sanitize_text("a,b"), "a b");
        assert_eq!(sanitize_text("Kuduz"), "Kuduz");
    }

    #[test]
    fn test_payload_structure() {
        let payload = build_event_payload(&event());

        assert!(payload.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(payload.ends_with("END:VCALENDAR\r\n"));
        assert!(payload.contains("PRODID:-//PatiLog//Vaccine Check//TR\r\n"));
        assert!(payload.contains("METHOD:PUBLISH\r\n"));
        assert!(payload.contains("CALSCALE:GREGORIAN\r\n"));
        assert!(payload.contains("SUMMARY:Max - Kuduz\r\n"));
    }

    #[test]
    fn test_event_starts_at_nine_for_fifteen_minutes() {
        let payload = build_event_payload(&event());
        assert!(payload.contains("DTSTART:20250603T090000\r\n"));
        assert!(payload.contains("DTEND:20250603T091500\r\n"));
    }

    #[test]
    fn test_uid_is_the_reminder_identity() {
        let e = event();
        let payload = build_event_payload(&e);
        assert!(payload.contains(&format!("UID:{}\r\n", e.identity)));
    }

    #[test]
    fn test_no_attendee_or_organizer() {
        let payload = build_event_payload(&event());
        assert!(!payload.contains("ATTENDEE"));
        assert!(!payload.contains("ORGANIZER"));
    }
}
