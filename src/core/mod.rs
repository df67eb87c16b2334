//! # Core Module
//!
//! Core domain types, configuration, and date handling for PatiLog.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Split date parsing/formatting into the dates module
//! - 1.0.0: Initial creation with config and record modules

pub mod config;
pub mod dates;
pub mod record;

// Re-export commonly used items
pub use config::{Config, MailConfig};
pub use dates::{format_display_date, format_iso_date, parse_due_date};
pub use record::{TreatmentRecord, TREATMENT_CHOICES};
