//! # Features Module
//!
//! Reminder scheduling and notification dispatch.
//!
//! - **Version**: 1.3.0
//! - **Since**: 0.1.0

pub mod notifier;
pub mod scheduler;

// Re-export feature items
pub use notifier::{
    render_reminder, DispatchSummary, ReminderDispatcher, RenderedReminder, Urgency,
};
pub use scheduler::{
    compute_next_due_date, parse_due_date, reminder_identity, select_due_reminders,
    IntervalPolicy, ReminderEvent,
};
