use crate::alert::{render, AlertEngine};
use crate::domain::{Direction, FlightRecord};
use crate::flight::FlightStatusClient;
use crate::notifier::NotifierHub;
use crate::seen::SeenKeySet;
use chrono::{DateTime, FixedOffset};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub alert_worthy: usize,
    pub sent: usize,
    pub delivered: usize,
    pub seen_today: usize,
}

pub struct FlightWatcher {
    alert_engine: AlertEngine,
    source: FlightStatusClient,
    notifier: NotifierHub,
    state_file: PathBuf,
}

impl FlightWatcher {
    pub fn new(
        alert_engine: AlertEngine,
        source: FlightStatusClient,
        notifier: NotifierHub,
        state_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            alert_engine,
            source,
            notifier,
            state_file: state_file.into(),
        }
    }

    /// One pass: load today's keys, fetch both directions, post new alerts, persist.
    pub async fn run_once(&self, local_now: DateTime<FixedOffset>) -> RunSummary {
        let today = local_now.format("%Y%m%d").to_string();
        let mut seen = SeenKeySet::load(&self.state_file, &today);
        info!("📋 {} alerts already sent on {}", seen.len(), today);

        let mut flights: Vec<(Direction, FlightRecord)> = Vec::new();
        for direction in [Direction::Arrival, Direction::Departure] {
            flights.extend(self.fetch(direction).await.into_iter().map(|f| (direction, f)));
        }

        let mut summary = RunSummary {
            fetched: flights.len(),
            ..RunSummary::default()
        };

        for (direction, record) in &flights {
            let Some(flight_alert) = self.alert_engine.should_alert(record, *direction, &today)
            else {
                continue;
            };
            summary.alert_worthy += 1;

            if seen.contains(&flight_alert.key) {
                continue;
            }

            if self.notifier.send(&render(&flight_alert)).await {
                summary.delivered += 1;
            }
            // Marked seen even when the post failed; the alert is not retried.
            seen.insert(flight_alert.key);
            summary.sent += 1;
        }

        if let Err(e) = seen.save() {
            warn!("⚠️  Could not persist seen keys: {:#}", e);
        }
        summary.seen_today = seen.len();

        info!(
            "✅ Done: {} new alerts ({} delivered) from {} flights",
            summary.sent, summary.delivered, summary.fetched
        );
        summary
    }

    async fn fetch(&self, direction: Direction) -> Vec<FlightRecord> {
        match self.source.fetch(direction).await {
            Ok(rows) => {
                info!("🛬 {} {} flights on the board", rows.len(), direction.label());
                rows
            }
            Err(e) => {
                warn!("⚠️  Fetching {} flights failed, treating as empty: {:#}", direction.label(), e);
                Vec::new()
            }
        }
    }
}
