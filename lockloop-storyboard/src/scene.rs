use lockloop_meteo::HourlySeries;
use lockloop_utils::dates::hour_of_day;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Mean cloud cover (percent) at or above which a segment is overcast.
pub const OVERCAST_CLOUD_COVER: f64 = 70.0;

/// Mean cloud cover (percent) at or above which a segment is cloudy.
pub const CLOUDY_CLOUD_COVER: f64 = 40.0;

/// A fixed part of the day.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Segment {
    Morning,
    Afternoon,
    Evening,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::Morning, Segment::Afternoon, Segment::Evening];

    /// Inclusive hour-of-day bounds.
    pub fn hours(&self) -> RangeInclusive<u32> {
        match self {
            Segment::Morning => 0..=11,
            Segment::Afternoon => 12..=17,
            Segment::Evening => 18..=23,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Morning => "Morning",
            Segment::Afternoon => "Afternoon",
            Segment::Evening => "Evening",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dominant condition of a segment.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Condition {
    Rain,
    Overcast,
    Cloudy,
    Clear,
    /// The series has no samples in the segment.
    #[serde(rename = "—")]
    NoData,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Rain => "Rain",
            Condition::Overcast => "Overcast",
            Condition::Cloudy => "Cloudy",
            Condition::Clear => "Clear",
            Condition::NoData => "—",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A segment and its dominant condition; serializes as a two element array.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct Scene(pub Segment, pub Condition);

impl Scene {
    pub fn segment(&self) -> Segment {
        self.0
    }

    pub fn condition(&self) -> Condition {
        self.1
    }
}

/// Dominant condition over the samples whose hour of day falls in `segment`.
///
/// Rain wins when at least half the samples are rain hours; otherwise the
/// mean cloud cover decides.
pub fn dominant_condition(series: &HourlySeries, segment: Segment) -> Condition {
    let hours = segment.hours();
    let indices: Vec<usize> = series
        .time()
        .iter()
        .enumerate()
        .filter(|(_, t)| hours.contains(&hour_of_day(t)))
        .map(|(i, _)| i)
        .collect();

    if indices.is_empty() {
        return Condition::NoData;
    }

    let rain_hours = indices.iter().filter(|i| series.is_rain(**i)).count();
    if rain_hours * 2 >= indices.len() {
        return Condition::Rain;
    }

    let cloud = series.cloud_cover();
    let mean_cloud =
        indices.iter().map(|i| f64::from(cloud[*i])).sum::<f64>() / indices.len() as f64;
    if mean_cloud >= OVERCAST_CLOUD_COVER {
        Condition::Overcast
    } else if mean_cloud >= CLOUDY_CLOUD_COVER {
        Condition::Cloudy
    } else {
        Condition::Clear
    }
}

/// Morning, afternoon and evening scenes, in that order.
pub fn summarize_scenes(series: &HourlySeries) -> Vec<Scene> {
    Segment::ALL
        .iter()
        .map(|segment| Scene(*segment, dominant_condition(series, *segment)))
        .collect()
}
