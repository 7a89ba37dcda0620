// src/channel/email.rs

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use lettre::message::header::{ContentTransferEncoding, ContentType};
use lettre::message::{Body, Mailbox};
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::channel::message::{render_body, timestamp, TITLE};
use crate::channel::NotificationChannel;
use crate::config::model::EmailSection;
use crate::errors::{MonitorError, Result};
use crate::watch::NormalizedEvent;

/// Port on which SMTP servers expect TLS from the first byte.
const IMPLICIT_TLS_PORT: u16 = 465;

/// Deliver notifications over SMTP with PLAIN authentication.
///
/// One message per event, addressed to every configured recipient in a
/// single `To` header. Delivery is all-or-nothing.
pub struct EmailChannel {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Vec<Mailbox>,
}

impl std::fmt::Debug for EmailChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailChannel")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

impl EmailChannel {
    pub fn from_config(section: &EmailSection) -> Result<Self> {
        let from = parse_mailbox("email.from", &section.from)?;
        let to = section
            .to
            .iter()
            .map(|addr| parse_mailbox("email.to", addr))
            .collect::<Result<Vec<_>>>()?;

        let host = section.smtp_host.trim();
        let tls_params = TlsParameters::new(host.to_string())
            .map_err(|e| MonitorError::EmailError(e.to_string()))?;
        let tls = if section.smtp_port == IMPLICIT_TLS_PORT {
            Tls::Wrapper(tls_params)
        } else {
            Tls::Opportunistic(tls_params)
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(section.smtp_port)
            .tls(tls)
            .authentication(vec![Mechanism::Plain])
            .timeout(Some(Duration::from_secs(section.timeout_secs)));

        if !section.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                section.username.clone(),
                section.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from,
            to,
        })
    }

    /// Build the message for `event` stamped with `time`.
    pub fn compose(&self, event: &NormalizedEvent, time: &str) -> Result<Message> {
        let mut builder = Message::builder().from(self.from.clone()).subject(TITLE);
        for rcpt in &self.to {
            builder = builder.to(rcpt.clone());
        }
        let body = Body::new_with_encoding(
            render_body(event, time),
            ContentTransferEncoding::QuotedPrintable,
        )
        .map_err(|_| MonitorError::EmailError("message body could not be encoded".to_string()))?;

        builder
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| MonitorError::EmailError(e.to_string()))
    }

    async fn deliver(&self, event: &NormalizedEvent) -> Result<()> {
        let message = self.compose(event, &timestamp())?;
        debug!(recipients = self.to.len(), path = %event.path, "sending email notification");
        self.transport
            .send(message)
            .await
            .map_err(|e| MonitorError::EmailError(e.to_string()))?;
        Ok(())
    }
}

impl NotificationChannel for EmailChannel {
    fn name(&self) -> &'static str {
        "email"
    }

    fn send<'a>(
        &'a self,
        event: &'a NormalizedEvent,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(self.deliver(event))
    }
}

fn parse_mailbox(field: &str, addr: &str) -> Result<Mailbox> {
    addr.trim()
        .parse::<Mailbox>()
        .map_err(|e| MonitorError::ConfigError(format!("{field}: invalid address {addr:?}: {e}")))
}
