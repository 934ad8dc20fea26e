use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Offset, Timelike, Utc};

pub const DEFAULT_FLIGHT_API_URL: &str =
    "http://openapi.airport.co.kr/service/rest/FlightStatusList/getFlightStatusList";
pub const DEFAULT_NEWS_API_URL: &str = "https://openapi.naver.com/v1/search/news.json";
pub const DEFAULT_STATE_FILE: &str = "sent_data.json";
pub const DEFAULT_NEWS_KEYWORDS: &[&str] = &["제주공항", "제주항공", "항공기 지연"];

/// Local-time hours (inclusive on both ends) during which alerts may go out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatingWindow {
    pub start_hour: u32,
    pub end_hour: u32,
    pub utc_offset_hours: i32,
}

impl Default for OperatingWindow {
    fn default() -> Self {
        Self {
            start_hour: 6,
            end_hour: 22,
            utc_offset_hours: 9,
        }
    }
}

impl OperatingWindow {
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_hours.clamp(-23, 23) * 3600)
            .unwrap_or_else(|| Utc.fix())
    }

    pub fn local_time(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        now.with_timezone(&self.offset())
    }

    pub fn contains(&self, local: &DateTime<FixedOffset>) -> bool {
        (self.start_hour..=self.end_hour).contains(&local.hour())
    }
}

#[derive(Debug, Clone)]
pub struct NewsConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub api_url: String,
    pub keywords: Vec<String>,
    pub display: u32,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub service_key: Option<String>,
    pub webhook_url: Option<String>,
    pub flight_api_url: String,
    pub state_file: PathBuf,
    pub fetch_timeout_secs: u64,
    pub window: OperatingWindow,
    pub news: NewsConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any name -> value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = OperatingWindow::default();
        let window = OperatingWindow {
            start_hour: parse_or(get("WINDOW_START_HOUR"), defaults.start_hour),
            end_hour: parse_or(get("WINDOW_END_HOUR"), defaults.end_hour),
            utc_offset_hours: parse_or(get("UTC_OFFSET_HOURS"), defaults.utc_offset_hours),
        };

        let keywords = get("NEWS_KEYWORDS")
            .map(|raw| parse_keywords(&raw))
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| DEFAULT_NEWS_KEYWORDS.iter().map(|k| k.to_string()).collect());

        Self {
            service_key: get("AIRPORT_KEY"),
            webhook_url: get("SLACK_URL"),
            flight_api_url: get("FLIGHT_API_URL")
                .unwrap_or_else(|| DEFAULT_FLIGHT_API_URL.to_string()),
            state_file: get("SENT_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE)),
            fetch_timeout_secs: parse_or(get("FETCH_TIMEOUT_SECS"), 10),
            window,
            news: NewsConfig {
                client_id: get("NAVER_CLIENT_ID"),
                client_secret: get("NAVER_CLIENT_SECRET"),
                api_url: get("NEWS_API_URL").unwrap_or_else(|| DEFAULT_NEWS_API_URL.to_string()),
                keywords,
                display: parse_or(get("NEWS_DISPLAY"), 5),
            },
        }
    }

    /// Service key and webhook URL, when both are present.
    pub fn flight_credentials(&self) -> Option<(&str, &str)> {
        match (&self.service_key, &self.webhook_url) {
            (Some(key), Some(url)) => Some((key.as_str(), url.as_str())),
            _ => None,
        }
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.parse().ok()).unwrap_or(default)
}

pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn applies_defaults_when_unset() {
        let config = config_from(&[]);
        assert!(config.service_key.is_none());
        assert!(config.webhook_url.is_none());
        assert!(config.flight_credentials().is_none());
        assert_eq!(config.flight_api_url, DEFAULT_FLIGHT_API_URL);
        assert_eq!(config.state_file, PathBuf::from(DEFAULT_STATE_FILE));
        assert_eq!(config.fetch_timeout_secs, 10);
        assert_eq!(config.window, OperatingWindow::default());
        assert_eq!(config.news.keywords.len(), DEFAULT_NEWS_KEYWORDS.len());
        assert_eq!(config.news.display, 5);
    }

    #[test]
    fn reads_credentials_and_overrides() {
        let config = config_from(&[
            ("AIRPORT_KEY", "abc"),
            ("SLACK_URL", "https://hooks.slack.com/services/T/B/X"),
            ("WINDOW_START_HOUR", "7"),
            ("WINDOW_END_HOUR", "21"),
            ("SENT_DATA_FILE", "/tmp/seen.json"),
            ("NEWS_KEYWORDS", " 제주 , ,김포 "),
        ]);
        assert_eq!(
            config.flight_credentials(),
            Some(("abc", "https://hooks.slack.com/services/T/B/X"))
        );
        assert_eq!(config.window.start_hour, 7);
        assert_eq!(config.window.end_hour, 21);
        assert_eq!(config.state_file, PathBuf::from("/tmp/seen.json"));
        assert_eq!(config.news.keywords, vec!["제주", "김포"]);
    }

    #[test]
    fn blank_credential_counts_as_missing() {
        let config = config_from(&[("AIRPORT_KEY", "   "), ("SLACK_URL", "https://x/y")]);
        assert!(config.flight_credentials().is_none());
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        let config = config_from(&[("FETCH_TIMEOUT_SECS", "soon"), ("NEWS_DISPLAY", "-3")]);
        assert_eq!(config.fetch_timeout_secs, 10);
        assert_eq!(config.news.display, 5);
    }

    #[test]
    fn window_uses_local_hour() {
        let window = OperatingWindow::default();
        // 21:00 UTC is 06:00 KST the next day
        let opening = window.local_time(Utc.with_ymd_and_hms(2026, 2, 9, 21, 0, 0).unwrap());
        assert!(window.contains(&opening));
        // 13:59 UTC is 22:59 KST
        let last_hour = window.local_time(Utc.with_ymd_and_hms(2026, 2, 10, 13, 59, 0).unwrap());
        assert!(window.contains(&last_hour));
        // 14:00 UTC is 23:00 KST
        let closed = window.local_time(Utc.with_ymd_and_hms(2026, 2, 10, 14, 0, 0).unwrap());
        assert!(!window.contains(&closed));
        // 20:59 UTC is 05:59 KST
        let early = window.local_time(Utc.with_ymd_and_hms(2026, 2, 9, 20, 59, 0).unwrap());
        assert!(!window.contains(&early));
    }

    #[test]
    fn local_date_rolls_over_at_offset() {
        let window = OperatingWindow::default();
        let local = window.local_time(Utc.with_ymd_and_hms(2026, 2, 9, 15, 30, 0).unwrap());
        assert_eq!(local.format("%Y%m%d").to_string(), "20260210");
    }

    #[test]
    fn parses_keywords_and_trims() {
        assert_eq!(parse_keywords("a, b ,,c"), vec!["a", "b", "c"]);
        assert!(parse_keywords("").is_empty());
    }
}
