//! # Due-Date Scheduler
//!
//! Computes next-due dates from interval policies and selects the records
//! due inside the lookahead window. Stateless: every run recomputes the
//! reminder set from the store, so a failed send is simply re-selected on
//! the next run while the record stays in-window.
//!
//! - **Version**: 2.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.1.0: Reminder identity isolated into its own module
//! - 2.0.0: Per-event selection output replaced the single digest scan
//! - 1.0.0: Initial month-based due-date computation

pub mod identity;

pub use identity::reminder_identity;

use crate::core::dates;
use crate::core::TreatmentRecord;
use chrono::{Duration, NaiveDate};
use log::debug;

// Single date-parse shared with the editor tables.
pub use crate::core::dates::parse_due_date;

/// Rule used to compute a next-due date from an applied date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalPolicy {
    /// Fixed month count. The editor slider offers 1..=12 with 1, 2, 3, 6,
    /// and 12 as the common presets.
    Months(u32),
    /// Explicit manually-chosen date; the editor enforces that it is not
    /// before the applied date.
    Manual(NaiveDate),
}

/// One reminder, derived fresh on each run and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderEvent {
    pub subject_name: String,
    pub treatment_type: String,
    pub due_date: NaiveDate,
    /// Days from today until the due date; zero means due today.
    pub days_remaining: i64,
    /// Stable key over (subject, treatment, due date); identical across
    /// runs so downstream calendars update instead of duplicating.
    pub identity: String,
}

/// Compute the next-due date for an applied date under a policy.
///
/// Month-based policies use a uniform 30-day month. This is a deliberate
/// product approximation kept for output compatibility with existing
/// sheets, not calendar-month arithmetic.
pub fn compute_next_due_date(applied: NaiveDate, policy: &IntervalPolicy) -> NaiveDate {
    match policy {
        IntervalPolicy::Months(months) => applied + Duration::days(i64::from(*months) * 30),
        IntervalPolicy::Manual(date) => *date,
    }
}

/// Select the records whose next-due date falls within the lookahead window.
///
/// The window is inclusive on both ends: due today counts, due exactly at
/// `today + lookahead_days` counts, overdue records are excluded. Records
/// with a missing or unparseable due date are skipped and the scan
/// continues; duplicates in the store produce duplicate events. Output
/// follows store row order, which is not a stable contract.
pub fn select_due_reminders(
    records: &[TreatmentRecord],
    today: NaiveDate,
    lookahead_days: i64,
) -> Vec<ReminderEvent> {
    let mut events = Vec::new();

    for record in records {
        let Some(due_date) = dates::parse_due_date(&record.next_due_date) else {
            if !record.next_due_date.trim().is_empty() {
                debug!(
                    "Skipping record for {} with unparseable due date '{}'",
                    record.subject_name, record.next_due_date
                );
            }
            continue;
        };

        let days_remaining = (due_date - today).num_days();
        if days_remaining < 0 || days_remaining > lookahead_days {
            continue;
        }

        events.push(ReminderEvent {
            subject_name: record.subject_name.clone(),
            treatment_type: record.treatment_type.clone(),
            due_date,
            days_remaining,
            identity: reminder_identity(&record.subject_name, &record.treatment_type, due_date),
        });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(subject: &str, treatment: &str, next_due: &str) -> TreatmentRecord {
        TreatmentRecord {
            subject_name: subject.to_string(),
            treatment_type: treatment.to_string(),
            applied_date: "2025-01-01".to_string(),
            next_due_date: next_due.to_string(),
            weight_kg: None,
        }
    }

    #[test]
    fn test_month_policy_uses_thirty_day_months() {
        let applied = date(2025, 6, 1);
        for months in [1u32, 2, 3, 6, 12] {
            assert_eq!(
                compute_next_due_date(applied, &IntervalPolicy::Months(months)),
                applied + Duration::days(i64::from(months) * 30),
                "policy of {months} months"
            );
        }
        // Not calendar months: 12 * 30 = 360 days, five days short of a year
        assert_eq!(
            compute_next_due_date(applied, &IntervalPolicy::Months(12)),
            date(2026, 5, 27)
        );
    }

    #[test]
    fn test_manual_policy_returns_supplied_date() {
        let chosen = date(2025, 9, 15);
        assert_eq!(
            compute_next_due_date(date(2025, 6, 1), &IntervalPolicy::Manual(chosen)),
            chosen
        );
    }

    #[test]
    fn test_due_today_is_selected() {
        let today = date(2025, 6, 1);
        let events = select_due_reminders(&[record("Max", "Kuduz", "2025-06-01")], today, 7);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].days_remaining, 0);
    }

    #[test]
    fn test_window_edge_inclusive_and_beyond_excluded() {
        let today = date(2025, 6, 1);
        let at_edge = select_due_reminders(&[record("Max", "Kuduz", "2025-06-08")], today, 7);
        assert_eq!(at_edge.len(), 1);
        assert_eq!(at_edge[0].days_remaining, 7);

        let past_edge = select_due_reminders(&[record("Max", "Kuduz", "2025-06-09")], today, 7);
        assert!(past_edge.is_empty());
    }

    #[test]
    fn test_overdue_excluded() {
        let today = date(2025, 6, 1);
        let events = select_due_reminders(&[record("Rex", "İç Parazit", "2025-05-31")], today, 7);
        assert!(events.is_empty());
    }

    #[test]
    fn test_localized_due_date_format_accepted() {
        let today = date(2025, 6, 1);
        let events = select_due_reminders(&[record("Max", "Kuduz", "03.06.2025")], today, 7);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].due_date, date(2025, 6, 3));
    }

    #[test]
    fn test_malformed_date_skipped_without_affecting_others() {
        let today = date(2025, 6, 1);
        let with_bad_row = vec![
            record("Max", "Kuduz", "2025-06-03"),
            record("Luna", "Karma", "not-a-date"),
            record("Boncuk", "Lyme", "2025-06-05"),
        ];
        let without_bad_row = vec![
            record("Max", "Kuduz", "2025-06-03"),
            record("Boncuk", "Lyme", "2025-06-05"),
        ];

        assert_eq!(
            select_due_reminders(&with_bad_row, today, 7),
            select_due_reminders(&without_bad_row, today, 7)
        );
    }

    #[test]
    fn test_empty_due_date_skipped() {
        let today = date(2025, 6, 1);
        assert!(select_due_reminders(&[record("Max", "Muayene/Kontrol", "")], today, 7).is_empty());
    }

    #[test]
    fn test_duplicate_rows_produce_duplicate_events() {
        let today = date(2025, 6, 1);
        let rows = vec![
            record("Max", "Kuduz", "2025-06-03"),
            record("Max", "Kuduz", "2025-06-03"),
        ];
        let events = select_due_reminders(&rows, today, 7);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].identity, events[1].identity);
    }

    #[test]
    fn test_identity_stable_across_runs() {
        let today = date(2025, 6, 1);
        let rows = vec![
            record("Max", "Kuduz", "2025-06-03"),
            record("Luna", "Karma", "2025-06-05"),
        ];
        let first = select_due_reminders(&rows, today, 7);
        let second = select_due_reminders(&rows, today, 7);
        let first_ids: Vec<_> = first.iter().map(|e| e.identity.clone()).collect();
        let second_ids: Vec<_> = second.iter().map(|e| e.identity.clone()).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn test_end_to_end_selection_scenario() {
        let today = date(2025, 6, 1);
        let rows = vec![
            record("Max", "Kuduz", "2025-06-03"),
            record("Luna", "Karma", "2025-06-10"),
            record("Rex", "İç Parazit", "2025-05-20"),
        ];
        let events = select_due_reminders(&rows, today, 7);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].subject_name, "Max");
        assert_eq!(events[0].treatment_type, "Kuduz");
        assert_eq!(events[0].days_remaining, 2);
    }
}
