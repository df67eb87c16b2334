//! # PatiLog Notifier
//!
//! The scheduled companion job: loads the record store, selects the
//! records due inside the lookahead window, and emails one reminder per
//! record. Stateless; run it once per day from cron or a CI schedule.
//!
//! Usage: `cargo run --bin notifier`

use anyhow::Result;
use chrono::Local;
use dotenvy::dotenv;
use log::{info, warn};

use patilog::core::Config;
use patilog::features::notifier::ReminderDispatcher;
use patilog::features::scheduler::select_due_reminders;
use patilog::mail::SmtpMailer;
use patilog::store::{SheetStore, SheetsClient, DOCUMENT_NAME};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let today = Local::now().date_naive();
    info!("--- Running PatiLog check for {today} ---");

    let mail_config = config.mail.clone().ok_or_else(|| {
        anyhow::anyhow!("Mail is not configured: set EMAIL_USER, EMAIL_PASS, and EMAIL_TO")
    })?;

    let store = SheetStore::new(SheetsClient::new(&config.google_api_token));
    let records = store.load_records().await;
    info!("Loaded {} records from '{DOCUMENT_NAME}'", records.len());

    let events = select_due_reminders(&records, today, config.lookahead_days);
    if events.is_empty() {
        info!(
            "No records due within {} days, nothing to send",
            config.lookahead_days
        );
        return Ok(());
    }

    info!(
        "{} reminder(s) due within {} days",
        events.len(),
        config.lookahead_days
    );

    let mailer = SmtpMailer::new(&mail_config)?;
    let dispatcher = ReminderDispatcher::new(mailer);
    let summary = dispatcher.dispatch_all(&events).await;

    if summary.failed > 0 {
        warn!(
            "Dispatch finished with failures: {} sent, {} failed",
            summary.sent, summary.failed
        );
    } else {
        info!("Dispatch finished: {} reminder(s) sent", summary.sent);
    }

    Ok(())
}
