//! Open-Meteo forecast payloads.
//!
//! Only the `hourly` block is interpreted. Both the legacy variable names
//! (`weathercode`, `cloudcover`) and the current ones (`weather_code`,
//! `cloud_cover`) are accepted.

use crate::error::InvalidSeriesError;
use crate::series::HourlySeries;
use crate::weather_code::WeatherCode;
use lockloop_utils::dates::parse_hour;
use serde::{Deserialize, Serialize};

/// Hourly variables requested from the forecast endpoint.
pub const HOURLY_VARIABLES: &str = "precipitation_probability,weathercode,cloudcover,rain";

/// Top level of a forecast response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenMeteoResponse {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub timezone: Option<String>,
    pub hourly: OpenMeteoHourly,
}

/// The `hourly` block: parallel arrays, one entry per hour.
///
/// Every array is optional at the wire level, and every entry is nullable
/// and wider than its final type, so that absent arrays, `null` entries and
/// out-of-range numbers surface as [`InvalidSeriesError`] instead of a
/// generic decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenMeteoHourly {
    #[serde(default)]
    pub time: Option<Vec<String>>,
    #[serde(default)]
    pub precipitation_probability: Option<Vec<Option<i64>>>,
    #[serde(default, alias = "weather_code")]
    pub weathercode: Option<Vec<Option<i64>>>,
    #[serde(default, alias = "cloud_cover")]
    pub cloudcover: Option<Vec<Option<i64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<Vec<Option<f64>>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Response(OpenMeteoResponse),
    Hourly(OpenMeteoHourly),
}

impl OpenMeteoHourly {
    /// Decode either a full forecast response or a bare `hourly` object.
    pub fn from_json_str(json: &str) -> Result<OpenMeteoHourly, serde_json::Error> {
        let payload: Payload = serde_json::from_str(json)?;
        Ok(match payload {
            Payload::Response(response) => response.hourly,
            Payload::Hourly(hourly) => hourly,
        })
    }
}

impl TryFrom<OpenMeteoHourly> for HourlySeries {
    type Error = InvalidSeriesError;

    fn try_from(value: OpenMeteoHourly) -> Result<Self, Self::Error> {
        let raw_time = value.time.ok_or(InvalidSeriesError::MissingArray("time"))?;
        let precipitation_probability = narrow(
            "precipitation_probability",
            value.precipitation_probability,
        )?;
        let weather_code = narrow("weathercode", value.weathercode)?
            .into_iter()
            .map(WeatherCode)
            .collect();
        let cloud_cover = narrow("cloudcover", value.cloudcover)?;
        let rain = value
            .rain
            .map(|rain| {
                rain.into_iter()
                    .enumerate()
                    .map(|(index, mm)| {
                        mm.ok_or(InvalidSeriesError::MissingValue { field: "rain", index })
                    })
                    .collect::<Result<Vec<f64>, _>>()
            })
            .transpose()?;

        let time = raw_time
            .into_iter()
            .enumerate()
            .map(|(index, t)| {
                parse_hour(&t).map_err(|_| InvalidSeriesError::UnparsableTimestamp { index, value: t })
            })
            .collect::<Result<Vec<_>, _>>()?;

        HourlySeries::new(time, precipitation_probability, weather_code, cloud_cover, rain)
    }
}

/// Narrow a required wire array of nullable integers to `u8`. Percentages
/// above 100 pass here and are rejected by [`HourlySeries::new`].
fn narrow(
    field: &'static str,
    values: Option<Vec<Option<i64>>>,
) -> Result<Vec<u8>, InvalidSeriesError> {
    values
        .ok_or(InvalidSeriesError::MissingArray(field))?
        .into_iter()
        .enumerate()
        .map(|(index, v)| {
            let v = v.ok_or(InvalidSeriesError::MissingValue { field, index })?;
            u8::try_from(v).map_err(|_| InvalidSeriesError::OutOfRange {
                field,
                index,
                value: v.to_string(),
            })
        })
        .collect()
}
