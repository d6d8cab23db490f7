use anyhow::{Context, Result, anyhow};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::SmtpSettings;
use crate::models::email::OutcomeMessage;
use crate::notify::Notifier;

/// Sends outcome mails through an authenticated STARTTLS relay.
pub struct SmtpNotifier {
    settings: SmtpSettings,
}

impl SmtpNotifier {
    pub fn new(settings: SmtpSettings) -> Self {
        SmtpNotifier { settings }
    }

    fn credentials(&self) -> Result<(&str, &str)> {
        match (&self.settings.username, &self.settings.password) {
            (Some(user), Some(password)) => Ok((user.as_str(), password.as_str())),
            _ => Err(anyhow!(
                "no SMTP credentials for {} in SMTP_USERNAME/SMTP_PASSWORD or netrc",
                self.settings.host
            )),
        }
    }

    fn build(&self, sender: &str, message: &OutcomeMessage) -> Result<Message> {
        Message::builder()
            .from(sender.parse().context("invalid sender address")?)
            .to(message
                .recipient
                .parse()
                .with_context(|| format!("invalid recipient address {}", message.recipient))?)
            .subject(message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .context("unable to build outcome mail")
    }
}

impl Notifier for SmtpNotifier {
    async fn notify(&self, message: &OutcomeMessage) -> Result<()> {
        let (user, password) = self.credentials()?;
        let email = self.build(user, message)?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.host)
            .with_context(|| format!("unable to set up relay {}", self.settings.host))?
            .port(self.settings.port)
            .credentials(Credentials::new(user.to_string(), password.to_string()))
            .build();

        mailer
            .send(email)
            .await
            .with_context(|| format!("unable to send mail via {}", self.settings.host))?;

        info!(to = %message.recipient, subject = message.subject, "Sent outcome mail");
        Ok(())
    }
}
