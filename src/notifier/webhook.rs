use crate::domain::Alert;
use anyhow::{anyhow, Result};
use tracing::{info, warn};

/// Posts `{"text": ...}` to an incoming-webhook URL (Slack style).
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn send(&self, alert: &Alert) -> Result<()> {
        let payload = serde_json::json!({ "text": alert.message });

        let response = self.client.post(&self.url).json(&payload).send().await?;

        if response.status().is_success() {
            info!("Alert sent to webhook: {}", alert.title);
            Ok(())
        } else {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Webhook rejected alert ({}): {}", status, error_text);
            Err(anyhow!("webhook returned {status}"))
        }
    }
}
