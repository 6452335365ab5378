use chrono::{DateTime, Local};
use common::errors::AppError;
use common::http_client::HttpClient;
use common::models::WeatherSnapshot;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Raw OpenWeatherMap "current weather" payload, only the fields we read
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenWeatherResponse {
    pub name: String,
    pub main: MainReadings,
    pub weather: Vec<Condition>,
    /// Observation time, unix seconds
    pub dt: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Condition {
    pub description: String,
    pub icon: String,
}

pub struct OpenWeatherClient {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(http_client: HttpClient, base_url: String, api_key: String) -> Self {
        Self {
            http_client,
            base_url,
            api_key,
        }
    }

    /// One GET for the city's current weather, metric units.
    #[instrument(skip(self), fields(city = %city))]
    pub async fn get_current(&self, city: &str) -> Result<OpenWeatherResponse, AppError> {
        info!(city = %city, "Fetching weather from API");

        self.http_client
            .get_json(
                &self.base_url,
                &[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")],
            )
            .await
    }
}

/// Map the provider payload onto a [`WeatherSnapshot`].
pub fn normalize(response: OpenWeatherResponse) -> Result<WeatherSnapshot, AppError> {
    let condition = response
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| AppError::malformed("weather conditions list is empty"))?;

    Ok(WeatherSnapshot {
        name: response.name,
        temp: response.main.temp,
        description: condition.description,
        icon: condition.icon,
        last_updated: format_last_updated(response.dt)?,
    })
}

/// Local time-of-day for a unix timestamp, e.g. `10:13:20 PM`.
pub fn format_last_updated(unix_secs: i64) -> Result<String, AppError> {
    let utc = DateTime::from_timestamp(unix_secs, 0)
        .ok_or_else(|| AppError::malformed(format!("timestamp {} out of range", unix_secs)))?;

    Ok(utc.with_timezone(&Local).format("%-I:%M:%S %p").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::errors::ErrorKind;
    use serde_json::json;

    fn london_payload() -> serde_json::Value {
        json!({
            "coord": { "lon": -0.1257, "lat": 51.5085 },
            "name": "London",
            "main": { "temp": 15.3, "humidity": 72 },
            "weather": [
                { "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" },
                { "id": 701, "main": "Mist", "description": "mist", "icon": "50d" }
            ],
            "dt": 1700000000
        })
    }

    #[test]
    fn test_normalize_uses_first_condition() {
        let raw: OpenWeatherResponse = serde_json::from_value(london_payload()).unwrap();
        let snapshot = normalize(raw).unwrap();

        assert_eq!(snapshot.name, "London");
        assert_eq!(snapshot.temp, 15.3);
        assert_eq!(snapshot.description, "clear sky");
        assert_eq!(snapshot.icon, "01d");
        assert_eq!(
            snapshot.last_updated,
            format_last_updated(1_700_000_000).unwrap()
        );
    }

    #[test]
    fn test_empty_weather_list_is_malformed() {
        let mut payload = london_payload();
        payload["weather"] = json!([]);
        let raw: OpenWeatherResponse = serde_json::from_value(payload).unwrap();

        let err = normalize(raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn test_missing_temperature_fails_to_parse() {
        let mut payload = london_payload();
        payload["main"] = json!({ "humidity": 72 });

        assert!(serde_json::from_value::<OpenWeatherResponse>(payload).is_err());
    }

    #[test]
    fn test_last_updated_is_time_of_day() {
        let formatted = format_last_updated(1_700_000_000).unwrap();

        assert!(formatted.ends_with(" AM") || formatted.ends_with(" PM"));
        assert_eq!(formatted.matches(':').count(), 2);
    }

    #[test]
    fn test_out_of_range_timestamp_is_malformed() {
        let err = format_last_updated(i64::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }
}
