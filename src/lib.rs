pub mod alert;
pub mod config;
pub mod domain;
pub mod flight;
pub mod news;
pub mod notifier;
pub mod seen;
pub mod utils;
pub mod watcher;

use alert::AlertEngine;
use chrono::{DateTime, Timelike, Utc};
use config::AppConfig;
use domain::Alert;
use flight::FlightStatusClient;
use news::{format_digest, DigestSection, NewsClient};
use notifier::{ConsoleNotifier, NotifierHub, WebhookNotifier};
use std::time::Duration;
use tracing::{debug, info, warn};
use utils::mask_url;
use watcher::{FlightWatcher, RunSummary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    OutsideWindow { hour: u32 },
    MissingCredentials,
    Completed(RunSummary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestOutcome {
    MissingCredentials,
    Posted { delivered: bool },
}

/// Flight alert entry point: time gate, credential check, then one watcher pass.
pub async fn run_flight_alerts(config: &AppConfig, now: DateTime<Utc>) -> RunOutcome {
    let local_now = config.window.local_time(now);
    if !config.window.contains(&local_now) {
        info!(
            "🌙 Local hour {} is outside {:02}:00-{:02}:59, nothing to do",
            local_now.hour(),
            config.window.start_hour,
            config.window.end_hour
        );
        return RunOutcome::OutsideWindow {
            hour: local_now.hour(),
        };
    }

    let Some((service_key, webhook_url)) = config.flight_credentials() else {
        debug!("AIRPORT_KEY or SLACK_URL missing, skipping flight check");
        return RunOutcome::MissingCredentials;
    };

    info!("🔔 Posting flight alerts to {}", mask_url(webhook_url));
    let watcher = FlightWatcher::new(
        AlertEngine::default(),
        FlightStatusClient::new(
            config.flight_api_url.clone(),
            service_key,
            Duration::from_secs(config.fetch_timeout_secs),
        ),
        NotifierHub::new(ConsoleNotifier::new(), WebhookNotifier::new(webhook_url)),
        config.state_file.clone(),
    );

    RunOutcome::Completed(watcher.run_once(local_now).await)
}

/// News digest entry point: one search per keyword, then a single post.
pub async fn run_news_digest(config: &AppConfig, now: DateTime<Utc>) -> DigestOutcome {
    let news = &config.news;
    let (Some(client_id), Some(client_secret), Some(webhook_url)) =
        (&news.client_id, &news.client_secret, &config.webhook_url)
    else {
        debug!("NAVER_CLIENT_ID, NAVER_CLIENT_SECRET or SLACK_URL missing, skipping digest");
        return DigestOutcome::MissingCredentials;
    };

    let client = NewsClient::new(news.api_url.clone(), client_id, client_secret);
    let mut sections = Vec::with_capacity(news.keywords.len());
    for keyword in &news.keywords {
        let items = match client.search(keyword, news.display).await {
            Ok(items) => {
                info!("📰 {} articles for '{}'", items.len(), keyword);
                Some(items)
            }
            Err(e) => {
                warn!("⚠️  News search for '{}' failed: {:#}", keyword, e);
                None
            }
        };
        sections.push(DigestSection {
            keyword: keyword.clone(),
            items,
        });
    }

    let date = config.window.local_time(now).format("%Y-%m-%d").to_string();
    let alert = Alert::new("뉴스 브리핑", format_digest(&date, &sections));
    let hub = NotifierHub::new(ConsoleNotifier::new(), WebhookNotifier::new(webhook_url.as_str()));
    let delivered = hub.send(&alert).await;

    DigestOutcome::Posted { delivered }
}
