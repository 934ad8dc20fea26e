use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use crate::domain::{Direction, FlightRecord};

pub const AIRPORT_CODE: &str = "CJU";
pub const DOMESTIC_LINE: &str = "D";
pub const WINDOW_START: &str = "0600";
pub const WINDOW_END: &str = "2359";
pub const MAX_ROWS: &str = "500";

/// Client for the airport flight-status board.
pub struct FlightStatusClient {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
    timeout: Duration,
}

impl FlightStatusClient {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            service_key: service_key.into(),
            timeout,
        }
    }

    /// Fetches one direction of today's domestic CJU board in a single page.
    ///
    /// `Ok(vec![])` means the board had no rows; `Err` means the request or the body failed.
    pub async fn fetch(&self, direction: Direction) -> Result<Vec<FlightRecord>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("serviceKey", self.service_key.as_str()),
                ("schLineType", DOMESTIC_LINE),
                ("schIOType", direction.io_type()),
                ("schAirCode", AIRPORT_CODE),
                ("schStTime", WINDOW_START),
                ("schEdTime", WINDOW_END),
                ("numOfRows", MAX_ROWS),
                ("_type", "json"),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .context("flight-status request failed")?
            .error_for_status()
            .context("flight-status service returned an error status")?;

        let body: Value = response
            .json()
            .await
            .context("flight-status response is not JSON")?;

        Ok(extract_items(&body))
    }
}

/// Pulls `response.body.items.item`, which is an object for one row and an array for several.
pub fn extract_items(body: &Value) -> Vec<FlightRecord> {
    let rows = match body.pointer("/response/body/items/item") {
        Some(Value::Array(rows)) => rows.iter().collect::<Vec<_>>(),
        Some(row @ Value::Object(_)) => vec![row],
        _ => Vec::new(),
    };

    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<FlightRecord>(row.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Skipping malformed flight row: {}", e);
                None
            }
        })
        .collect()
}
