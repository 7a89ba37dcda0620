// src/channel/webhook.rs

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::debug;

use crate::channel::message::{render_template, timestamp, TITLE};
use crate::channel::NotificationChannel;
use crate::config::model::WebhookSection;
use crate::errors::{MonitorError, Result};
use crate::types::WebhookProvider;
use crate::watch::NormalizedEvent;

/// Push notifications through a provider's form-post API.
///
/// For ServerChan this is `POST https://sctapi.ftqq.com/<sendkey>.send`
/// with form fields `title` and `desp`. Anything but `200 OK` is an error.
#[derive(Debug, Clone)]
pub struct WebhookChannel {
    client: reqwest::Client,
    endpoint: String,
    template: String,
}

impl WebhookChannel {
    pub fn new(
        provider: WebhookProvider,
        sendkey: &str,
        template: &str,
        timeout: Duration,
    ) -> Result<Self> {
        Self::with_base_url(
            &format!("https://{}", provider.host()),
            sendkey,
            template,
            timeout,
        )
    }

    /// Same as [`WebhookChannel::new`] with an explicit scheme + host, e.g. a
    /// local test server.
    pub fn with_base_url(
        base_url: &str,
        sendkey: &str,
        template: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let endpoint = format!("{}/{}.send", base_url.trim_end_matches('/'), sendkey);
        Ok(Self {
            client,
            endpoint,
            template: template.to_string(),
        })
    }

    pub fn from_config(section: &WebhookSection, provider: WebhookProvider) -> Result<Self> {
        Self::new(
            provider,
            &section.sendkey,
            &section.template,
            Duration::from_secs(section.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, event: &NormalizedEvent) -> Result<()> {
        let desp = render_template(&self.template, event, &timestamp());
        debug!(endpoint = %self.endpoint, path = %event.path, "posting webhook notification");

        let resp = self
            .client
            .post(&self.endpoint)
            .form(&[("title", TITLE), ("desp", desp.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(MonitorError::UnexpectedStatus(status.as_u16()));
        }
        Ok(())
    }
}

impl NotificationChannel for WebhookChannel {
    fn name(&self) -> &'static str {
        "webhook"
    }

    fn send<'a>(
        &'a self,
        event: &'a NormalizedEvent,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(self.post(event))
    }
}
