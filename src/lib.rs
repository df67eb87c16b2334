// Core layer - shared types and configuration
pub mod core;

// Features layer - scheduling and notification logic
pub mod features;

// Mail layer - outbound SMTP transport
pub mod mail;

// Store layer - spreadsheet-backed record store
pub mod store;

// TUI layer - interactive record editor (optional feature)
#[cfg(feature = "tui")]
pub mod tui;

// Re-export core config for convenience
pub use core::Config;

// Re-export feature items for convenience
pub use features::{
    // Scheduler
    compute_next_due_date, parse_due_date, reminder_identity, select_due_reminders,
    IntervalPolicy, ReminderEvent,
    // Notifier
    render_reminder, DispatchSummary, ReminderDispatcher, RenderedReminder, Urgency,
};

// Re-export boundary collaborators
pub use mail::{MailTransport, OutboundMessage, SmtpMailer};
pub use store::{SheetStore, SheetsClient};
