//! # Outbound Mail Transport
//!
//! The dispatcher's seam to the outside world. `MailTransport` is a trait
//! so tests inject recording or failing fixtures; the production
//! implementation is async SMTP over STARTTLS with username/password
//! credentials.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

use crate::core::config::MailConfig;
use anyhow::Result;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Attachment filename used for the calendar payload.
const ICS_FILENAME: &str = "hatirlatma.ics";

/// A fully-formed outbound message.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub subject: String,
    pub html_body: String,
    /// RFC 5545 payload attached as `text/calendar`, when present
    pub calendar_attachment: Option<String>,
}

/// Synchronous-per-message outbound transport.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send one message; errors are surfaced to the caller, which decides
    /// whether to continue (the dispatcher does).
    async fn send(&self, message: &OutboundMessage) -> Result<()>;
}

/// SMTP transport over STARTTLS, addressed to the configured recipients.
pub struct SmtpMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipients: Vec<Mailbox>,
}

impl SmtpMailer {
    /// Build the transport from mail settings.
    ///
    /// The SMTP username doubles as the sender address, as with the
    /// original Gmail setup.
    pub fn new(config: &MailConfig) -> Result<Self> {
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        let sender: Mailbox = config
            .username
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid sender address '{}': {e}", config.username))?;

        let recipients = config
            .recipients
            .iter()
            .map(|addr| {
                addr.parse::<Mailbox>()
                    .map_err(|e| anyhow::anyhow!("Invalid recipient address '{addr}': {e}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SmtpMailer {
            mailer,
            sender,
            recipients,
        })
    }

    fn build_email(&self, message: &OutboundMessage) -> Result<Message> {
        let mut builder = Message::builder()
            .from(self.sender.clone())
            .subject(message.subject.clone());
        for recipient in &self.recipients {
            builder = builder.to(recipient.clone());
        }

        let email = match &message.calendar_attachment {
            Some(ics) => {
                let calendar_type = ContentType::parse("text/calendar; charset=utf-8; method=PUBLISH")
                    .map_err(|e| anyhow::anyhow!("Invalid calendar content type: {e}"))?;
                builder.multipart(
                    MultiPart::mixed()
                        .singlepart(SinglePart::html(message.html_body.clone()))
                        .singlepart(
                            Attachment::new(ICS_FILENAME.to_string())
                                .body(ics.clone(), calendar_type),
                        ),
                )?
            }
            None => builder
                .header(ContentType::TEXT_HTML)
                .body(message.html_body.clone())?,
        };

        Ok(email)
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        let email = self.build_email(message)?;
        self.mailer.send(email).await?;
        Ok(())
    }
}
