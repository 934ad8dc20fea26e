use crate::domain::{format_hhmm, Alert, AlertKind, Direction, FlightAlert, FlightRecord};

pub const CANCELLED_KEYWORD: &str = "결항";
pub const DELAYED_KEYWORD: &str = "지연";
pub const DEFAULT_STATUS: &str = "예정";
pub const DEFAULT_TIME: &str = "0000";
pub const HOME_CITY: &str = "제주";

/// Normalized view of a board row after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub status: String,
    pub scheduled: String,
    pub estimated: String,
    pub cancelled: bool,
    pub delayed: bool,
}

impl Classification {
    /// Cancellation wins when both flags are set.
    pub fn kind(&self) -> Option<AlertKind> {
        if self.cancelled {
            Some(AlertKind::Cancelled)
        } else if self.delayed {
            Some(AlertKind::Delayed)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct AlertEngine {
    cancelled_keyword: String,
    delayed_keyword: String,
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new(CANCELLED_KEYWORD, DELAYED_KEYWORD)
    }
}

impl AlertEngine {
    pub fn new(cancelled_keyword: impl Into<String>, delayed_keyword: impl Into<String>) -> Self {
        Self {
            cancelled_keyword: cancelled_keyword.into(),
            delayed_keyword: delayed_keyword.into(),
        }
    }

    pub fn classify(&self, record: &FlightRecord) -> Classification {
        let status = record
            .remark
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_STATUS.to_string());
        let scheduled = non_empty(record.scheduled.as_deref()).unwrap_or(DEFAULT_TIME).to_string();
        let estimated = non_empty(record.estimated.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| scheduled.clone());

        // A bad value on either side zeroes both so the numeric check stays quiet.
        let (scheduled_num, estimated_num) =
            match (scheduled.trim().parse::<i64>(), estimated.trim().parse::<i64>()) {
                (Ok(s), Ok(e)) => (s, e),
                _ => (0, 0),
            };

        let cancelled = status.contains(&self.cancelled_keyword);
        let delayed = estimated_num > scheduled_num || status.contains(&self.delayed_keyword);

        Classification {
            status,
            scheduled,
            estimated,
            cancelled,
            delayed,
        }
    }

    pub fn should_alert(
        &self,
        record: &FlightRecord,
        direction: Direction,
        date: &str,
    ) -> Option<FlightAlert> {
        let classification = self.classify(record);
        let kind = classification.kind()?;

        let flight_number = record
            .flight_number
            .clone()
            .unwrap_or_else(|| "Unknown".to_string());
        let route = match direction {
            Direction::Arrival => {
                format!("{} → {HOME_CITY}", record.origin_city.as_deref().unwrap_or(""))
            }
            Direction::Departure => {
                format!("{HOME_CITY} → {}", record.destination_city.as_deref().unwrap_or(""))
            }
        };

        Some(FlightAlert {
            key: alert_key(
                date,
                &flight_number,
                &classification.status,
                &classification.estimated,
            ),
            kind,
            direction,
            airline: record.airline.clone().unwrap_or_default(),
            flight_number,
            route,
            scheduled: classification.scheduled,
            estimated: classification.estimated,
            status: classification.status,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// `{date}_{flight}_{status}_{estimated}`; a new status or estimated time yields a new key.
pub fn alert_key(date: &str, flight_number: &str, status: &str, estimated: &str) -> String {
    format!("{date}_{flight_number}_{status}_{estimated}")
}

pub fn render(alert: &FlightAlert) -> Alert {
    let title = format!(
        "국내선 {} {} 알림",
        alert.direction.label(),
        alert.kind.label()
    );
    let message = format!(
        "{} *{}*\n```{} {}\n{}\n{} → {}\n상태: {}```",
        alert.kind.emoji(),
        title,
        alert.airline,
        alert.flight_number,
        alert.route,
        format_hhmm(&alert.scheduled),
        format_hhmm(&alert.estimated),
        alert.status
    );
    Alert::new(title, message)
}
