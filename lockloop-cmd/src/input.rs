//! Loading a saved hourly series from disk.

use anyhow::Context;
use clap::ValueEnum;
use lockloop_meteo::open_meteo::OpenMeteoHourly;
use lockloop_meteo::HourlySeries;
use log::info;
use std::path::Path;

/// On-disk format of an hourly series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Open-Meteo forecast response, or its bare `hourly` object
    Json,
    /// Headed CSV: time,precipitation_probability,weather_code,cloud_cover[,rain]
    Csv,
}

impl InputFormat {
    /// Guess from the file extension; anything but `.csv` is read as JSON.
    pub fn from_path(path: &str) -> InputFormat {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
            _ => InputFormat::Json,
        }
    }
}

/// Parse an hourly series from a string in the given format.
pub fn parse_series(data: &str, format: InputFormat) -> anyhow::Result<HourlySeries> {
    let series = match format {
        InputFormat::Json => {
            let hourly = OpenMeteoHourly::from_json_str(data)
                .context("Failed to decode Open-Meteo JSON")?;
            HourlySeries::try_from(hourly)?
        }
        InputFormat::Csv => HourlySeries::from_csv(data)?,
    };
    Ok(series)
}

/// Read and validate an hourly series from `path`.
pub fn load_series(path: &str, format: Option<InputFormat>) -> anyhow::Result<HourlySeries> {
    let format = format.unwrap_or_else(|| InputFormat::from_path(path));
    let data = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    let series =
        parse_series(&data, format).with_context(|| format!("Invalid hourly series in {}", path))?;
    info!("Loaded {} hourly samples from {} ({:?})", series.len(), path, format);
    Ok(series)
}
