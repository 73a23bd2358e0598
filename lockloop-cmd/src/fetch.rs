//! Live fetch from Open-Meteo followed by a storyboard build.

use crate::to_json;
use anyhow::Context;
use chrono::Local;
use lockloop_meteo::api::{fetch_hourly, ForecastRequest};
use lockloop_meteo::HourlySeries;
use lockloop_storyboard::build;
use lockloop_utils::dates::parse_date;
use log::{debug, info};

/// Fetch one day of hourly forecast and print its storyboard as JSON.
///
/// `date` defaults to today in local time. When `save` is given the raw
/// `hourly` block is written there first, so the same day can be replayed
/// with the `storyboard` command.
pub async fn run_fetch(
    lat: f64,
    lon: f64,
    date: Option<&str>,
    timezone: &str,
    save: Option<&str>,
    pretty: bool,
) -> anyhow::Result<()> {
    let date = match date {
        Some(d) => parse_date(d).with_context(|| format!("Date must be YYYY-MM-DD, got {}", d))?,
        None => Local::now().naive_local().date(),
    };

    let mut request = ForecastRequest::new(lat, lon, date);
    request.timezone = timezone.to_string();

    let client = reqwest::Client::new();
    let response = fetch_hourly(&client, &request)
        .await
        .context("Open-Meteo request failed")?;

    if let Some(path) = save {
        std::fs::write(path, serde_json::to_string_pretty(&response.hourly)?)
            .with_context(|| format!("Failed to write {}", path))?;
        info!("Saved hourly forecast to {}", path);
    }

    let series = HourlySeries::try_from(response.hourly)?;
    for (t, code) in series.time().iter().zip(series.weather_code()) {
        debug!("{}: {}", t, code);
    }
    let storyboard = build(&series);
    println!("{}", to_json(&storyboard, pretty)?);
    Ok(())
}
