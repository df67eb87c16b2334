//! # Configuration
//!
//! Environment-backed configuration, read once at process start and passed
//! by parameter into the store, scheduler, and dispatcher.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: Mail settings grouped into MailConfig, optional for the editor
//! - 1.1.0: LOOKAHEAD_DAYS override for testing against fixture sheets
//! - 1.0.0: Initial creation

use anyhow::Result;
use std::env;

/// Default reminder lookahead window in days.
pub const DEFAULT_LOOKAHEAD_DAYS: i64 = 7;

/// Default SMTP relay host.
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Outbound mail settings.
///
/// Only the notifier needs these; the record editor runs without them.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// SMTP relay hostname
    pub smtp_host: String,
    /// SMTP username, also used as the sender address
    pub username: String,
    /// SMTP password (app password for Gmail)
    pub password: String,
    /// Recipient addresses, from the comma-separated EMAIL_TO variable
    pub recipients: Vec<String>,
}

/// Process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for the Sheets/Drive REST APIs, minted out of band
    pub google_api_token: String,
    /// Reminder lookahead window in days
    pub lookahead_days: i64,
    /// Default log level filter
    pub log_level: String,
    /// Outbound mail settings, present when EMAIL_USER/EMAIL_PASS/EMAIL_TO are set
    pub mail: Option<MailConfig>,
}

impl Config {
    /// Build the configuration from environment variables.
    ///
    /// GOOGLE_API_TOKEN is required. EMAIL_USER, EMAIL_PASS, and EMAIL_TO
    /// together enable outbound mail; SMTP_HOST and LOOKAHEAD_DAYS are
    /// optional overrides.
    pub fn from_env() -> Result<Self> {
        let google_api_token = env::var("GOOGLE_API_TOKEN")
            .map_err(|_| anyhow::anyhow!("GOOGLE_API_TOKEN environment variable not set"))?;

        let lookahead_days = match env::var("LOOKAHEAD_DAYS") {
            Ok(raw) => raw
                .parse::<i64>()
                .map_err(|_| anyhow::anyhow!("LOOKAHEAD_DAYS must be an integer, got '{raw}'"))?,
            Err(_) => DEFAULT_LOOKAHEAD_DAYS,
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let mail = Self::mail_from_env()?;

        Ok(Config {
            google_api_token,
            lookahead_days,
            log_level,
            mail,
        })
    }

    /// Read mail settings if the mail variables are present.
    ///
    /// A partially configured mail setup (e.g. EMAIL_USER without EMAIL_PASS)
    /// is an error rather than a silent disable.
    fn mail_from_env() -> Result<Option<MailConfig>> {
        let user = env::var("EMAIL_USER").ok();
        let pass = env::var("EMAIL_PASS").ok();
        let to = env::var("EMAIL_TO").ok();

        match (user, pass, to) {
            (None, None, None) => Ok(None),
            (Some(username), Some(password), Some(to)) => {
                let recipients = parse_recipients(&to);
                if recipients.is_empty() {
                    return Err(anyhow::anyhow!("EMAIL_TO contains no addresses"));
                }
                Ok(Some(MailConfig {
                    smtp_host: env::var("SMTP_HOST")
                        .unwrap_or_else(|_| DEFAULT_SMTP_HOST.to_string()),
                    username,
                    password,
                    recipients,
                }))
            }
            _ => Err(anyhow::anyhow!(
                "Incomplete mail configuration: EMAIL_USER, EMAIL_PASS, and EMAIL_TO must all be set"
            )),
        }
    }
}

/// Split a comma-separated recipient list, dropping empty entries.
fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|addr| addr.trim().to_string())
        .filter(|addr| !addr.is_empty())
        .collect()
}
