// cju-watch - Jeju (CJU) domestic flight delay/cancellation alerts
// Polls the airport flight-status board and posts new alerts to a chat webhook

use anyhow::Result;
use chrono::Utc;
use cju_watch::config::AppConfig;
use cju_watch::RunOutcome;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match dotenv::dotenv() {
        Ok(path) => info!("📄 Loaded .env from {:?}", path),
        Err(e) => warn!("⚠️  Could not load .env file: {}", e),
    }

    info!("🏗️  Starting cju-watch - Jeju flight alert notifier");

    let config = AppConfig::from_env();
    match cju_watch::run_flight_alerts(&config, Utc::now()).await {
        RunOutcome::Completed(summary) => {
            info!("📊 {} alert-worthy flights, {} keys recorded for today", summary.alert_worthy, summary.seen_today);
        }
        RunOutcome::OutsideWindow { .. } | RunOutcome::MissingCredentials => {}
    }

    Ok(())
}
