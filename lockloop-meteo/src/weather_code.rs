use serde::{Deserialize, Serialize};
use std::fmt;

/// Codes denoting any form of liquid precipitation, drizzle through violent
/// thunderstorm.
pub const RAIN_CODES: [u8; 16] = [51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 80, 81, 82, 95, 96, 99];

/// Heavy categories used to grade an episode when no rain amounts are
/// available. Includes heavy snow (75), which is not a rain code.
pub const HEAVY_CODES: [u8; 4] = [65, 75, 82, 99];

/// Thunderstorm categories.
pub const THUNDERSTORM_CODES: [u8; 3] = [95, 96, 99];

/// A WMO weather interpretation code as reported by Open-Meteo.
///
/// The three code sets above are tested independently; none is assumed to
/// contain another.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherCode(pub u8);

impl WeatherCode {
    pub fn is_rain(&self) -> bool {
        RAIN_CODES.contains(&self.0)
    }

    pub fn is_heavy(&self) -> bool {
        HEAVY_CODES.contains(&self.0)
    }

    pub fn is_thunderstorm(&self) -> bool {
        THUNDERSTORM_CODES.contains(&self.0)
    }

    /// Human readable WMO label.
    pub fn description(&self) -> &'static str {
        match self.0 {
            0 => "Clear sky",
            1 => "Mainly clear",
            2 => "Partly cloudy",
            3 => "Overcast",
            45 => "Fog",
            48 => "Depositing rime fog",
            51 => "Light drizzle",
            53 => "Moderate drizzle",
            55 => "Dense drizzle",
            56 => "Light freezing drizzle",
            57 => "Dense freezing drizzle",
            61 => "Slight rain",
            63 => "Moderate rain",
            65 => "Heavy rain",
            66 => "Light freezing rain",
            67 => "Heavy freezing rain",
            71 => "Slight snow fall",
            73 => "Moderate snow fall",
            75 => "Heavy snow fall",
            77 => "Snow grains",
            80 => "Slight rain showers",
            81 => "Moderate rain showers",
            82 => "Violent rain showers",
            85 => "Slight snow showers",
            86 => "Heavy snow showers",
            95 => "Thunderstorm",
            96 => "Thunderstorm with slight hail",
            99 => "Thunderstorm with heavy hail",
            _ => "Unknown",
        }
    }
}

impl From<u8> for WeatherCode {
    fn from(value: u8) -> Self {
        WeatherCode(value)
    }
}

impl fmt::Display for WeatherCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rain_codes() {
        assert!(WeatherCode(51).is_rain());
        assert!(WeatherCode(63).is_rain());
        assert!(WeatherCode(95).is_rain());
        assert!(!WeatherCode(0).is_rain());
        assert!(!WeatherCode(3).is_rain());
        assert!(!WeatherCode(45).is_rain());
        // snow is not rain
        assert!(!WeatherCode(71).is_rain());
        assert!(!WeatherCode(75).is_rain());
    }

    #[test]
    fn test_heavy_codes_are_not_a_subset_of_rain_codes() {
        assert!(WeatherCode(75).is_heavy());
        assert!(!WeatherCode(75).is_rain());
        assert!(WeatherCode(82).is_heavy());
        assert!(!WeatherCode(81).is_heavy());
    }

    #[test]
    fn test_thunderstorm_codes() {
        for code in [95, 96, 99] {
            assert!(WeatherCode(code).is_thunderstorm());
        }
        assert!(!WeatherCode(82).is_thunderstorm());
        assert!(!WeatherCode(65).is_thunderstorm());
        // 96 is a storm code but not a heavy one
        assert!(!WeatherCode(96).is_heavy());
    }

    #[test]
    fn test_description_and_display() {
        assert_eq!(WeatherCode(0).description(), "Clear sky");
        assert_eq!(WeatherCode(99).description(), "Thunderstorm with heavy hail");
        assert_eq!(WeatherCode(42).description(), "Unknown");
        assert_eq!(WeatherCode(61).to_string(), "61 (Slight rain)");
    }

    #[test]
    fn test_serde_transparent() {
        let codes: Vec<WeatherCode> = serde_json::from_str("[0, 61, 95]").unwrap();
        assert_eq!(codes, vec![WeatherCode(0), WeatherCode(61), WeatherCode(95)]);
        assert_eq!(serde_json::to_string(&WeatherCode(3)).unwrap(), "3");
    }
}
