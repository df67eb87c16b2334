//! # TUI Module
//!
//! Interactive record editor: an overview of the record set with
//! delete-by-rewrite, and a new-entry form with interval-policy selection.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial editor with overview, new-entry form, and help screens

pub mod app;
pub mod event;
pub mod state;
pub mod ui;

pub use app::{App, Screen, StoreRequest};
pub use event::{Event, EventHandler};
