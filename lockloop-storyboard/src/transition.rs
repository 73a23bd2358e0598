//! Single sky transition detection.
//!
//! A coarser companion to the storyboard: finds the first hour where the
//! sky visibly changes, either rain giving way to clear or heavy cloud
//! breaking to sun.

use lockloop_meteo::HourlySeries;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cloud cover (percent) at or above which an hour is cloudy.
pub const CLOUDY_FROM: u8 = 70;

/// Cloud cover (percent) at or below which the next hour is sunny.
pub const SUNNY_UP_TO: u8 = 30;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sky {
    Rain,
    Clear,
    Cloudy,
    Sunny,
}

impl fmt::Display for Sky {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sky::Rain => "RAIN",
            Sky::Clear => "CLEAR",
            Sky::Cloudy => "CLOUDY",
            Sky::Sunny => "SUNNY",
        };
        f.write_str(label)
    }
}

/// Precipitation probability thresholds for a rain-to-clear transition.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct TransitionThresholds {
    /// Probability (percent) at or above which the hour is rainy.
    pub rain_high: u8,
    /// Probability (percent) at or below which the following hour is dry.
    pub rain_low: u8,
}

impl Default for TransitionThresholds {
    fn default() -> Self {
        TransitionThresholds {
            rain_high: 50,
            rain_low: 20,
        }
    }
}

/// Sky before and after hour index `index`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct Transition {
    pub from: Sky,
    pub to: Sky,
    pub index: usize,
}

/// First rain-to-clear hour by precipitation probability; failing that, the
/// first cloudy-to-sunny hour by cloud cover; failing that, sunny all day.
pub fn detect_transition(series: &HourlySeries, thresholds: TransitionThresholds) -> Transition {
    let probs = series.precipitation_probability();
    let rain_to_clear = probs
        .windows(2)
        .position(|w| w[0] >= thresholds.rain_high && w[1] <= thresholds.rain_low);
    if let Some(index) = rain_to_clear {
        return Transition {
            from: Sky::Rain,
            to: Sky::Clear,
            index,
        };
    }

    let clouds = series.cloud_cover();
    let cloud_to_sun = clouds
        .windows(2)
        .position(|w| w[0] >= CLOUDY_FROM && w[1] <= SUNNY_UP_TO);
    if let Some(index) = cloud_to_sun {
        return Transition {
            from: Sky::Cloudy,
            to: Sky::Sunny,
            index,
        };
    }

    Transition {
        from: Sky::Sunny,
        to: Sky::Sunny,
        index: 0,
    }
}
