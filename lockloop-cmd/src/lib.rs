//! Command implementations for the lockloop CLI.
//!
//! Provides subcommands for building a storyboard from a saved series, from
//! a live Open-Meteo forecast, and for detecting a single sky transition.

use clap::Subcommand;

pub mod fetch;
pub mod input;
pub mod storyboard;
pub mod transition;

pub use input::InputFormat;

#[derive(Subcommand)]
pub enum Command {
    /// Build a storyboard from a saved hourly series
    Storyboard {
        /// Path to an Open-Meteo JSON response or an hourly CSV
        #[arg(short = 'i', long)]
        input: String,

        /// Input format (detected from the file extension when omitted)
        #[arg(short = 'f', long, value_enum)]
        format: Option<InputFormat>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Detect the first sky transition in a saved hourly series
    Transition {
        /// Path to an Open-Meteo JSON response or an hourly CSV
        #[arg(short = 'i', long)]
        input: String,

        /// Input format (detected from the file extension when omitted)
        #[arg(short = 'f', long, value_enum)]
        format: Option<InputFormat>,

        /// Precipitation probability (%) at or above which an hour is rainy
        #[arg(long, default_value_t = 50)]
        high: u8,

        /// Precipitation probability (%) at or below which the next hour is dry
        #[arg(long, default_value_t = 20)]
        low: u8,
    },

    /// Fetch today's hourly forecast from Open-Meteo and build its storyboard
    Fetch {
        /// Latitude in decimal degrees
        #[arg(long, default_value_t = 37.5, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, default_value_t = 126.95, allow_negative_numbers = true)]
        lon: f64,

        /// Day to fetch as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Timezone for the returned local timestamps
        #[arg(long, default_value = "Asia/Seoul")]
        timezone: String,

        /// Also write the raw hourly JSON to this path
        #[arg(long)]
        save: Option<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Storyboard {
            input,
            format,
            pretty,
        } => storyboard::run_storyboard(&input, format, pretty),
        Command::Transition {
            input,
            format,
            high,
            low,
        } => transition::run_transition(&input, format, high, low),
        Command::Fetch {
            lat,
            lon,
            date,
            timezone,
            save,
            pretty,
        } => {
            fetch::run_fetch(lat, lon, date.as_deref(), &timezone, save.as_deref(), pretty).await
        }
    }
}

/// Serialize a value as JSON, compact or pretty.
pub(crate) fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}
