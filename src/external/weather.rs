//! Today's weather, looked up from a public JSON feed.

use std::time::Duration;

use async_trait::async_trait;
use jiff::civil::Date;
use serde::Deserialize;

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

use super::client::build_http_client;

const SERVICE: &str = "weather";

/// Source of the weather string stamped onto new todos.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Returns today's weather or an `ExternalService` error; never a placeholder.
    async fn today_weather(&self) -> AppResult<String>;
}

/// One day of the feed; `date` is `MM-dd`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct WeatherEntry {
    pub date: String,
    pub weather: String,
}

/// Fetches the yearly feed at `weather.url` and picks today's entry.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    url: String,
}

impl WeatherClient {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    pub fn from_config(config: &WeatherConfig) -> AppResult<Self> {
        let http = build_http_client(Duration::from_secs(config.timeout))?;
        Ok(Self::new(http, config.url.clone()))
    }

    async fn fetch_entries(&self) -> AppResult<Vec<WeatherEntry>> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| AppError::external(SERVICE, format!("request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::external(
                SERVICE,
                format!("unexpected status {}", status),
            ));
        }

        resp.json::<Vec<WeatherEntry>>()
            .await
            .map_err(|e| AppError::external(SERVICE, format!("invalid JSON: {}", e)))
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn today_weather(&self) -> AppResult<String> {
        let entries = self.fetch_entries().await?;
        let today = jiff::Zoned::now().date();
        let weather = find_weather_for(&entries, today)?;
        tracing::debug!(date = %month_day(today), weather = %weather, "Fetched today's weather");
        Ok(weather)
    }
}

/// Picks the entry whose `MM-dd` matches `day`.
pub fn find_weather_for(entries: &[WeatherEntry], day: Date) -> AppResult<String> {
    if entries.is_empty() {
        return Err(AppError::external(SERVICE, "feed returned no entries"));
    }

    let key = month_day(day);
    entries
        .iter()
        .find(|entry| entry.date == key)
        .map(|entry| entry.weather.clone())
        .ok_or_else(|| AppError::external(SERVICE, format!("no entry for {}", key)))
}

fn month_day(day: Date) -> String {
    format!("{:02}-{:02}", day.month(), day.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn entries() -> Vec<WeatherEntry> {
        serde_json::from_str(
            r#"[{"date":"01-01","weather":"Sunny"},{"date":"01-02","weather":"Cloudy"},{"date":"12-31","weather":"Snowy"}]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_find_weather_for_matching_day() {
        assert_eq!(find_weather_for(&entries(), date(2025, 1, 2)).unwrap(), "Cloudy");
        assert_eq!(find_weather_for(&entries(), date(1999, 12, 31)).unwrap(), "Snowy");
    }

    #[test]
    fn test_find_weather_for_missing_day() {
        let err = find_weather_for(&entries(), date(2025, 6, 1)).unwrap_err();
        match err {
            AppError::ExternalService { service, message } => {
                assert_eq!(service, "weather");
                assert!(message.contains("06-01"));
            }
            other => panic!("Expected ExternalService, got {:?}", other),
        }
    }

    #[test]
    fn test_find_weather_for_empty_feed() {
        let err = find_weather_for(&[], date(2025, 1, 1)).unwrap_err();
        assert!(matches!(err, AppError::ExternalService { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_feed_is_external_error() {
        let http = build_http_client(Duration::from_secs(1)).unwrap();
        let client = WeatherClient::new(http, "http://127.0.0.1:9/weather.json");

        let err = client.today_weather().await.unwrap_err();
        assert!(matches!(err, AppError::ExternalService { .. }));
    }
}
