use crate::episode::{total_rain_hours, Episode};
use lockloop_meteo::HourlySeries;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An episode this long makes the whole day prolonged rain.
pub const PROLONGED_EPISODE_HOURS: u32 = 4;

/// Total rain hours that make the day prolonged rain.
pub const PROLONGED_TOTAL_HOURS: u32 = 6;

/// Inclusive bounds on total rain hours for intermittent showers.
pub const INTERMITTENT_TOTAL_HOURS: (u32, u32) = (2, 4);

/// A passing shower lasts less than this.
pub const PASSING_SHOWER_MAX_HOURS: u32 = 2;

/// Cloud cover (percent) below which the sky counts as cleared.
pub const CLEARING_CLOUD_COVER: u8 = 40;

/// The single label summarizing the day's precipitation.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum StoryType {
    #[serde(rename = "Dry day")]
    DryDay,
    #[serde(rename = "Prolonged rain")]
    ProlongedRain,
    #[serde(rename = "Intermittent showers")]
    IntermittentShowers,
    #[serde(rename = "Passing shower then clearing")]
    PassingShowerThenClearing,
    #[serde(rename = "Showers")]
    Showers,
}

impl StoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryType::DryDay => "Dry day",
            StoryType::ProlongedRain => "Prolonged rain",
            StoryType::IntermittentShowers => "Intermittent showers",
            StoryType::PassingShowerThenClearing => "Passing shower then clearing",
            StoryType::Showers => "Showers",
        }
    }
}

impl fmt::Display for StoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify the day. Rules are checked in order and the first match wins:
///
/// 1. no rain hours: dry day
/// 2. any episode of 4h or more, or 6h of rain in total: prolonged rain
/// 3. two or more episodes totalling 2 to 4 hours: intermittent showers
/// 4. one episode shorter than 2h, followed by some hour with cloud cover
///    under 40%: passing shower then clearing
/// 5. anything else: showers
pub fn classify(series: &HourlySeries, episodes: &[Episode]) -> StoryType {
    let total = total_rain_hours(episodes);
    let (intermittent_min, intermittent_max) = INTERMITTENT_TOTAL_HOURS;

    if total < 1 {
        StoryType::DryDay
    } else if total >= PROLONGED_TOTAL_HOURS
        || episodes
            .iter()
            .any(|e| e.duration_hours >= PROLONGED_EPISODE_HOURS)
    {
        StoryType::ProlongedRain
    } else if episodes.len() >= 2 && (intermittent_min..=intermittent_max).contains(&total) {
        StoryType::IntermittentShowers
    } else if is_passing_shower(series, episodes) {
        StoryType::PassingShowerThenClearing
    } else {
        StoryType::Showers
    }
}

/// Exactly one short episode, and the lowest cloud cover strictly after it
/// is under the clearing threshold. Fails when nothing follows the episode.
fn is_passing_shower(series: &HourlySeries, episodes: &[Episode]) -> bool {
    let [episode] = episodes else {
        return false;
    };
    if episode.duration_hours >= PASSING_SHOWER_MAX_HOURS {
        return false;
    }
    series
        .time()
        .iter()
        .zip(series.cloud_cover())
        .filter(|(t, _)| **t > episode.end)
        .map(|(_, cloud)| *cloud)
        .min()
        .is_some_and(|lowest| lowest < CLEARING_CLOUD_COVER)
}
