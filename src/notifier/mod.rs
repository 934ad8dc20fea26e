mod console;
mod webhook;

pub use console::ConsoleNotifier;
pub use webhook::WebhookNotifier;

use crate::domain::Alert;
use tracing::warn;

pub struct NotifierHub {
    console: ConsoleNotifier,
    webhook: WebhookNotifier,
}

impl NotifierHub {
    pub fn new(console: ConsoleNotifier, webhook: WebhookNotifier) -> Self {
        Self { console, webhook }
    }

    /// Delivers to every channel. Webhook failures are logged and swallowed;
    /// the return value only says whether the webhook accepted the alert.
    pub async fn send(&self, alert: &Alert) -> bool {
        self.console.send(alert);

        match self.webhook.send(alert).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Webhook notification failed: {:#}", e);
                false
            }
        }
    }
}
