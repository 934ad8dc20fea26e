// news-digest - daily keyword news briefing for a chat webhook

use anyhow::Result;
use chrono::Utc;
use cju_watch::config::AppConfig;
use cju_watch::DigestOutcome;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = dotenv::dotenv() {
        warn!("⚠️  Could not load .env file: {}", e);
    }

    let config = AppConfig::from_env();
    if let DigestOutcome::Posted { delivered } = cju_watch::run_news_digest(&config, Utc::now()).await {
        info!("📰 Digest posted (delivered: {})", delivered);
    }

    Ok(())
}
