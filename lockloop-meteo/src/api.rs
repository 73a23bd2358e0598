use crate::error::FetchError;
use crate::open_meteo::{OpenMeteoResponse, HOURLY_VARIABLES};
use chrono::NaiveDate;
use lockloop_utils::dates::format_date;
use log::{info, warn};
use reqwest::Client;
use std::time::Duration;

/// Open-Meteo forecast endpoint.
pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Default timezone for the returned local timestamps.
pub const DEFAULT_TIMEZONE: &str = "Asia/Seoul";

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One day of hourly forecast for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub date: NaiveDate,
    pub timezone: String,
}

impl ForecastRequest {
    pub fn new(latitude: f64, longitude: f64, date: NaiveDate) -> ForecastRequest {
        ForecastRequest {
            latitude,
            longitude,
            date,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }

    /// Query string parameters. Start and end date are the same day.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let date = format_date(&self.date);
        vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("timezone", self.timezone.clone()),
            ("start_date", date.clone()),
            ("end_date", date),
            ("hourly", HOURLY_VARIABLES.to_string()),
        ]
    }
}

/// Fetch the hourly forecast for a single day.
pub async fn fetch_hourly(
    client: &Client,
    request: &ForecastRequest,
) -> Result<OpenMeteoResponse, FetchError> {
    info!(
        "Fetching hourly forecast for ({}, {}) on {}",
        request.latitude, request.longitude, request.date
    );
    let response = client
        .get(OPEN_METEO_URL)
        .query(&request.query_pairs())
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await?;

    if !response.status().is_success() {
        warn!("Bad response status from Open-Meteo: {}", response.status());
        return Err(FetchError::BadStatus(response.status()));
    }

    Ok(response.json::<OpenMeteoResponse>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let request = ForecastRequest::new(37.5, 126.95, date);
        let pairs = request.query_pairs();
        assert!(pairs.contains(&("latitude", "37.5".to_string())));
        assert!(pairs.contains(&("longitude", "126.95".to_string())));
        assert!(pairs.contains(&("timezone", "Asia/Seoul".to_string())));
        assert!(pairs.contains(&("start_date", "2024-07-01".to_string())));
        assert!(pairs.contains(&("end_date", "2024-07-01".to_string())));
        assert!(pairs.contains(&("hourly", HOURLY_VARIABLES.to_string())));
    }
}
