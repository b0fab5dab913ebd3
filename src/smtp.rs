//! SMTP alert delivery via lettre

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::notifier::{Alert, Notifier};

/// Sends alert emails over an authenticated STARTTLS connection
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl std::fmt::Debug for SmtpNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpNotifier")
            .field("from", &self.from)
            .finish()
    }
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig) -> crate::Result<Self> {
        let from: Mailbox = config.from.parse().map_err(|e| {
            crate::WatchpostError::Config(format!(
                "Invalid SMTP from address {:?}: {}",
                config.from, e
            ))
        })?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| {
                crate::WatchpostError::Config(format!(
                    "Invalid SMTP relay {:?}: {}",
                    config.host, e
                ))
            })?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        tracing::debug!("Created SmtpNotifier via {}:{}", config.host, config.port);

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, alert: &Alert, recipients: &[String]) -> crate::Result<()> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(alert.subject());
        for recipient in recipients {
            let to: Mailbox = recipient.parse().map_err(|e| {
                crate::WatchpostError::Notifier(format!(
                    "Invalid recipient address {:?}: {}",
                    recipient, e
                ))
            })?;
            builder = builder.to(to);
        }

        let message = builder.body(alert.body()).map_err(|e| {
            crate::WatchpostError::Notifier(format!("Building alert email: {}", e))
        })?;

        tracing::debug!(
            "Sending alert for {} to {} recipient(s)",
            alert.endpoint,
            recipients.len()
        );

        self.transport.send(message).await.map_err(|e| {
            crate::WatchpostError::Notifier(format!("SMTP send failed: {}", e))
        })?;

        tracing::debug!("Alert email sent for {}", alert.endpoint);
        Ok(())
    }
}
