//! # Notification Dispatcher
//!
//! Renders each reminder event into a mail message and hands it to the
//! outbound transport, one message per event. A failed send is logged and
//! the loop continues; there is no retry or dead-letter queue, the next
//! scheduled run re-selects any record that is still due.
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Per-event fan-out replaced the single digest message
//! - 1.0.0: Initial digest mail with ICS attachment

pub mod gcal;
pub mod ics;
pub mod render;

pub use gcal::calendar_add_link;
pub use ics::{build_event_payload, sanitize_text};
pub use render::{render_reminder, RenderedReminder, Urgency};

use crate::features::scheduler::ReminderEvent;
use crate::mail::{MailTransport, OutboundMessage};
use log::{info, warn};

/// Outcome counts for one dispatch pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub sent: usize,
    pub failed: usize,
}

/// Sends one reminder mail per event over a mail transport.
pub struct ReminderDispatcher<T: MailTransport> {
    transport: T,
}

impl<T: MailTransport> ReminderDispatcher<T> {
    pub fn new(transport: T) -> Self {
        ReminderDispatcher { transport }
    }

    /// Render and send every event, isolating per-message failures.
    pub async fn dispatch_all(&self, events: &[ReminderEvent]) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        for event in events {
            let rendered = render_reminder(event);
            let message = OutboundMessage {
                subject: rendered.subject,
                html_body: rendered.html_body,
                calendar_attachment: Some(rendered.ics_payload),
            };

            match self.transport.send(&message).await {
                Ok(()) => {
                    info!(
                        "Sent reminder for {} - {} (due {}, {} days left)",
                        event.subject_name,
                        event.treatment_type,
                        event.due_date,
                        event.days_remaining
                    );
                    summary.sent += 1;
                }
                Err(e) => {
                    warn!(
                        "Failed to send reminder for {} - {}: {e}",
                        event.subject_name, event.treatment_type
                    );
                    summary.failed += 1;
                }
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::scheduler::reminder_identity;
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    /// Transport fixture that records subjects and fails on chosen sends.
    struct RecordingTransport {
        sent_subjects: Mutex<Vec<String>>,
        fail_on: Vec<usize>,
        calls: Mutex<usize>,
    }

    impl RecordingTransport {
        fn new(fail_on: Vec<usize>) -> Self {
            RecordingTransport {
                sent_subjects: Mutex::new(Vec::new()),
                fail_on,
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, message: &OutboundMessage) -> Result<()> {
            let mut calls = self.calls.lock().unwrap();
            let index = *calls;
            *calls += 1;

            if self.fail_on.contains(&index) {
                return Err(anyhow::anyhow!("simulated transport failure"));
            }
            self.sent_subjects
                .lock()
                .unwrap()
                .push(message.subject.clone());
            Ok(())
        }
    }

    fn event(subject: &str) -> ReminderEvent {
        let due = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        ReminderEvent {
            subject_name: subject.to_string(),
            treatment_type: "Kuduz".to_string(),
            due_date: due,
            days_remaining: 2,
            identity: reminder_identity(subject, "Kuduz", due),
        }
    }

    #[tokio::test]
    async fn test_failed_send_does_not_stop_the_rest() {
        let transport = RecordingTransport::new(vec![1]);
        let dispatcher = ReminderDispatcher::new(transport);

        let events = vec![event("Max"), event("Luna"), event("Rex")];
        let summary = dispatcher.dispatch_all(&events).await;

        assert_eq!(summary.sent, 2);
        assert_eq!(summary.failed, 1);

        let subjects = dispatcher.transport.sent_subjects.lock().unwrap();
        assert!(subjects[0].contains("Max"));
        assert!(subjects[1].contains("Rex"));
    }

    #[tokio::test]
    async fn test_every_event_becomes_its_own_message() {
        let transport = RecordingTransport::new(vec![]);
        let dispatcher = ReminderDispatcher::new(transport);

        let events = vec![event("Max"), event("Luna")];
        let summary = dispatcher.dispatch_all(&events).await;

        assert_eq!(summary, DispatchSummary { sent: 2, failed: 0 });
        assert_eq!(dispatcher.transport.sent_subjects.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_selection_sends_nothing() {
        let transport = RecordingTransport::new(vec![]);
        let dispatcher = ReminderDispatcher::new(transport);

        let summary = dispatcher.dispatch_all(&[]).await;
        assert_eq!(summary, DispatchSummary::default());
    }
}
