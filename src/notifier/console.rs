use crate::domain::Alert;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }

    pub fn send(&self, alert: &Alert) {
        info!("📣 {}\n{}", alert.title, alert.message);
    }
}
