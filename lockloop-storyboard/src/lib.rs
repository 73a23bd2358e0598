//! Day storyboard for an hourly weather series.
//!
//! [`build`] reduces one day of hourly samples to a [`Storyboard`]: the rain
//! episodes, a single [`StoryType`] label for the day, a dominant condition
//! for morning, afternoon and evening, and whether any hour was stormy.
//!
//! # Usage
//!
//! ```rust
//! use lockloop_meteo::open_meteo::OpenMeteoHourly;
//! use lockloop_storyboard::{build_from_hourly, StoryType};
//!
//! let hourly = OpenMeteoHourly::from_json_str(r#"{
//!     "time": ["2024-07-01T09:00", "2024-07-01T10:00", "2024-07-01T11:00"],
//!     "precipitation_probability": [10, 80, 10],
//!     "weathercode": [2, 61, 1],
//!     "cloudcover": [60, 95, 20]
//! }"#).unwrap();
//! let storyboard = build_from_hourly(hourly).unwrap();
//! assert_eq!(storyboard.story_type, StoryType::PassingShowerThenClearing);
//! assert_eq!(storyboard.episodes.len(), 1);
//! ```

pub mod episode;
pub mod scene;
pub mod story;
pub mod transition;

pub use episode::{Episode, EpisodeKind};
pub use scene::{Condition, Scene, Segment};
pub use story::StoryType;

use lockloop_meteo::open_meteo::OpenMeteoHourly;
use lockloop_meteo::{HourlySeries, InvalidSeriesError};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Summary of one day's precipitation narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Storyboard {
    pub story_type: StoryType,
    /// Chronological.
    pub episodes: Vec<Episode>,
    /// Morning, afternoon, evening.
    pub scenes: Vec<Scene>,
    pub stormy: bool,
}

impl Storyboard {
    pub fn total_rain_hours(&self) -> u32 {
        episode::total_rain_hours(&self.episodes)
    }
}

/// Build the storyboard for a validated series. Pure and deterministic.
pub fn build(series: &HourlySeries) -> Storyboard {
    let episodes = episode::extract_episodes(series);
    let story_type = story::classify(series, &episodes);
    let scenes = scene::summarize_scenes(series);
    let stormy = series.weather_code().iter().any(|c| c.is_thunderstorm());

    for s in &scenes {
        debug!("{}: {}", s.segment(), s.condition());
    }
    info!(
        "Built storyboard: {} ({} episodes, {}h of rain, stormy: {})",
        story_type,
        episodes.len(),
        episode::total_rain_hours(&episodes),
        stormy
    );

    Storyboard {
        story_type,
        episodes,
        scenes,
        stormy,
    }
}

/// Validate an Open-Meteo `hourly` block and build its storyboard.
pub fn build_from_hourly(hourly: OpenMeteoHourly) -> Result<Storyboard, InvalidSeriesError> {
    let series = HourlySeries::try_from(hourly)?;
    Ok(build(&series))
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, NaiveDateTime};
    use lockloop_meteo::{HourlySeries, WeatherCode};

    /// 2024-07-01 at `hour`:00.
    pub fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    pub fn series_with_clouds(
        time: Vec<NaiveDateTime>,
        probs: Vec<u8>,
        codes: Vec<u8>,
        clouds: Vec<u8>,
        rain: Option<Vec<f64>>,
    ) -> HourlySeries {
        let codes = codes.into_iter().map(WeatherCode).collect();
        HourlySeries::new(time, probs, codes, clouds, rain).unwrap()
    }

    /// Cloud cover fixed at 50%.
    pub fn series_with_times(
        time: Vec<NaiveDateTime>,
        probs: Vec<u8>,
        codes: Vec<u8>,
        rain: Option<Vec<f64>>,
    ) -> HourlySeries {
        let clouds = vec![50; time.len()];
        series_with_clouds(time, probs, codes, clouds, rain)
    }

    /// A full day from hour 0 to 23.
    pub fn day(probs: Vec<u8>, codes: Vec<u8>, clouds: Vec<u8>) -> HourlySeries {
        series_with_clouds((0..24).map(at).collect(), probs, codes, clouds, None)
    }

    /// A full day, 50% cloud, rain (by probability) exactly at `hours`.
    pub fn rain_at(hours: &[usize]) -> HourlySeries {
        let mut probs = vec![10; 24];
        for h in hours {
            probs[*h] = 80;
        }
        day(probs, vec![3; 24], vec![50; 24])
    }
}
