use anyhow::{Error, Result, anyhow};
use reqwest::{Client, StatusCode, Url, header::CONTENT_TYPE};
use tracing::{debug, info};

use crate::{config::Config, models::slack::SlackMessage};

pub struct WebhookClient {
    http_client: Client,
    webhook_url: Url,
}

impl WebhookClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let webhook_url = Url::parse(&config.webhook)
            .map_err(|e| anyhow!("WEBHOOK is not a valid URL: {}", e))?;

        info!(host = webhook_url.host_str().unwrap_or_default(), "Webhook client initialized");

        Ok(Self {
            http_client: Client::new(),
            webhook_url,
        })
    }

    pub fn webhook_url(&self) -> &Url {
        &self.webhook_url
    }

    /// Posts the message once. Transport errors and non-2xx responses are failures.
    pub async fn send(&self, message: &SlackMessage) -> Result<StatusCode, Error> {
        let body = serde_json::to_string_pretty(message)?;

        info!(webhook_url = %self.webhook_url, "Webhook url resolved");
        debug!(body = %body, "Sending Slack message");

        let response = self
            .http_client
            .post(self.webhook_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            info!(status = status.as_u16(), "Message sent");
            Ok(status)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(anyhow!(
                "Webhook returned status {}: {}",
                status,
                error_text
            ))
        }
    }
}
