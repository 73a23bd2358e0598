//! Hourly weather series types and loaders.
//!
//! [`series::HourlySeries`] is the validated input consumed by the
//! storyboard builder. It can be assembled directly, decoded from an
//! Open-Meteo `hourly` block ([`open_meteo`]) or read from CSV. The `api`
//! feature adds the Open-Meteo HTTP fetch.

#[cfg(feature = "api")]
pub mod api;
pub mod error;
pub mod open_meteo;
pub mod series;
pub mod weather_code;

pub use error::InvalidSeriesError;
pub use series::HourlySeries;
pub use weather_code::WeatherCode;
