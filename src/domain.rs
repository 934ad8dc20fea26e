use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Which side of the airport board a flight comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Arrival,
    Departure,
}

impl Direction {
    /// Value of the `schIOType` query parameter.
    pub fn io_type(self) -> &'static str {
        match self {
            Direction::Arrival => "I",
            Direction::Departure => "O",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Arrival => "도착",
            Direction::Departure => "출발",
        }
    }
}

/// One row of the flight-status board. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FlightRecord {
    #[serde(rename = "airlineKorean", default, deserialize_with = "lenient_string")]
    pub airline: Option<String>,
    #[serde(rename = "airFln", default, deserialize_with = "lenient_string")]
    pub flight_number: Option<String>,
    #[serde(rename = "std", default, deserialize_with = "lenient_string")]
    pub scheduled: Option<String>,
    #[serde(rename = "etd", default, deserialize_with = "lenient_string")]
    pub estimated: Option<String>,
    #[serde(rename = "rmkKor", default, deserialize_with = "lenient_string")]
    pub remark: Option<String>,
    #[serde(rename = "boardingKor", default, deserialize_with = "lenient_string")]
    pub origin_city: Option<String>,
    #[serde(rename = "arrivedKor", default, deserialize_with = "lenient_string")]
    pub destination_city: Option<String>,
}

// The board sends times as "0800" but sometimes as bare numbers.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Cancelled,
    Delayed,
}

impl AlertKind {
    pub fn emoji(self) -> &'static str {
        match self {
            AlertKind::Cancelled => "🚫",
            AlertKind::Delayed => "⚠️",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AlertKind::Cancelled => "결항",
            AlertKind::Delayed => "지연",
        }
    }
}

/// An alert-worthy flight together with its dedup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightAlert {
    pub key: String,
    pub kind: AlertKind,
    pub direction: Direction,
    pub airline: String,
    pub flight_number: String,
    pub route: String,
    pub scheduled: String,
    pub estimated: String,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Renders an `HHMM` string as `HH:MM` by splitting after the second character.
pub fn format_hhmm(raw: &str) -> String {
    let split = raw.char_indices().nth(2).map_or(raw.len(), |(i, _)| i);
    format!("{}:{}", &raw[..split], &raw[split..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_board_row() {
        let json = r#"{
            "airlineKorean": "대한항공",
            "airFln": "KE1234",
            "std": "0800",
            "etd": "0845",
            "rmkKor": "지연",
            "boardingKor": "김포",
            "arrivedKor": "제주",
            "gate": 3
        }"#;
        let record: FlightRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.airline.as_deref(), Some("대한항공"));
        assert_eq!(record.flight_number.as_deref(), Some("KE1234"));
        assert_eq!(record.scheduled.as_deref(), Some("0800"));
        assert_eq!(record.estimated.as_deref(), Some("0845"));
        assert_eq!(record.remark.as_deref(), Some("지연"));
        assert_eq!(record.origin_city.as_deref(), Some("김포"));
    }

    #[test]
    fn accepts_numeric_and_null_fields() {
        let json = r#"{"airFln": "7C101", "std": 1130, "etd": null}"#;
        let record: FlightRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.scheduled.as_deref(), Some("1130"));
        assert_eq!(record.estimated, None);
        assert_eq!(record.remark, None);
    }

    #[test]
    fn formats_hhmm() {
        assert_eq!(format_hhmm("0845"), "08:45");
        assert_eq!(format_hhmm("930"), "93:0");
        assert_eq!(format_hhmm("12"), "12:");
        assert_eq!(format_hhmm("7"), "7:");
        assert_eq!(format_hhmm(""), ":");
    }

    #[test]
    fn direction_query_values() {
        assert_eq!(Direction::Arrival.io_type(), "I");
        assert_eq!(Direction::Departure.io_type(), "O");
        assert_eq!(Direction::Arrival.label(), "도착");
    }
}
