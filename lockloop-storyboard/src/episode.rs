//! Rain episode extraction.
//!
//! Two passes over the series: [`rain_runs`] finds every maximal run of
//! contiguous rain hours, then [`merge_runs`] joins neighbouring runs that are
//! separated by a single dry hour. Each surviving run becomes an [`Episode`].

use chrono::NaiveDateTime;
use lockloop_meteo::HourlySeries;
use lockloop_utils::dates::{format_hour, hours_between, is_one_hour_apart};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Peak hourly rain (mm) at which an episode is graded prolonged-strong.
pub const STRONG_RAIN_MM: f64 = 4.0;

/// Peak hourly rain (mm) at which an episode is graded moderate.
pub const MODERATE_RAIN_MM: f64 = 2.0;

/// Intensity grade of an episode.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum EpisodeKind {
    #[serde(rename = "light")]
    Light,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "prolonged-strong")]
    ProlongedStrong,
    /// Graded from weather codes only; rain amounts were not available.
    #[serde(rename = "light/moderate")]
    LightOrModerate,
}

impl EpisodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EpisodeKind::Light => "light",
            EpisodeKind::Moderate => "moderate",
            EpisodeKind::ProlongedStrong => "prolonged-strong",
            EpisodeKind::LightOrModerate => "light/moderate",
        }
    }

    /// Grade from the peak hourly rain amount.
    pub fn from_peak_rain(max_intensity: f64) -> EpisodeKind {
        if max_intensity >= STRONG_RAIN_MM {
            EpisodeKind::ProlongedStrong
        } else if max_intensity >= MODERATE_RAIN_MM {
            EpisodeKind::Moderate
        } else {
            EpisodeKind::Light
        }
    }
}

impl fmt::Display for EpisodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A run of rain hours after gap merging. `end` is inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(rename = "duration")]
    pub duration_hours: u32,
    pub kind: EpisodeKind,
    /// Peak hourly rain in mm; `None` when the series has no rain amounts.
    pub max_intensity: Option<f64>,
}

impl Episode {
    /// Build the episode covering indices `run` of `series`.
    ///
    /// `run` must be non-empty and within bounds.
    pub fn from_run(series: &HourlySeries, run: Range<usize>) -> Episode {
        let time = series.time();
        let start = time[run.start];
        let end = time[run.end - 1];
        let duration_hours = (hours_between(&start, &end) + 1) as u32;

        let (kind, max_intensity) = match series.rain() {
            Some(rain) => {
                let peak = rain[run.clone()]
                    .iter()
                    .copied()
                    .fold(f64::NEG_INFINITY, f64::max);
                (EpisodeKind::from_peak_rain(peak), Some(peak))
            }
            None => {
                let heavy = series.weather_code()[run].iter().any(|c| c.is_heavy());
                let kind = if heavy {
                    EpisodeKind::ProlongedStrong
                } else {
                    EpisodeKind::LightOrModerate
                };
                (kind, None)
            }
        };

        Episode {
            start,
            end,
            duration_hours,
            kind,
            max_intensity,
        }
    }
}

/// Every maximal run of contiguous rain hours, as half-open index ranges in
/// ascending order.
pub fn rain_runs(series: &HourlySeries) -> Vec<Range<usize>> {
    let n = series.len();
    let mut runs = Vec::new();
    let mut i = 0;
    while i < n {
        if !series.is_rain(i) {
            i += 1;
            continue;
        }
        let mut j = i + 1;
        while j < n && series.is_rain(j) {
            j += 1;
        }
        runs.push(i..j);
        i = j;
    }
    runs
}

/// Join runs separated by exactly one dry hour.
///
/// The dry hour must sit exactly one hour after the last rain hour and one
/// hour before the next rain hour, judged by the timestamps. Merging is
/// transitive, so rain, gap, rain, gap, rain collapses into a single run.
pub fn merge_runs(runs: Vec<Range<usize>>, time: &[NaiveDateTime]) -> Vec<Range<usize>> {
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(runs.len());
    for run in runs {
        if let Some(last) = merged.last_mut() {
            if run.start == last.end + 1 {
                if is_hourly_gap(time, last.end) {
                    last.end = run.end;
                    continue;
                }
                warn!(
                    "Not merging across dry hour {}: timestamps are not hourly",
                    format_hour(&time[last.end])
                );
            }
        }
        merged.push(run);
    }
    merged
}

/// The dry hour at `gap` is one hour after its predecessor and one hour
/// before its successor.
fn is_hourly_gap(time: &[NaiveDateTime], gap: usize) -> bool {
    gap >= 1
        && gap + 1 < time.len()
        && is_one_hour_apart(&time[gap - 1], &time[gap])
        && is_one_hour_apart(&time[gap], &time[gap + 1])
}

/// Extract the day's rain episodes in chronological order.
pub fn extract_episodes(series: &HourlySeries) -> Vec<Episode> {
    let runs = rain_runs(series);
    let merged = merge_runs(runs, series.time());
    merged
        .into_iter()
        .map(|run| {
            let episode = Episode::from_run(series, run);
            debug!(
                "Episode {} .. {} ({}h, {})",
                format_hour(&episode.start),
                format_hour(&episode.end),
                episode.duration_hours,
                episode.kind
            );
            episode
        })
        .collect()
}

/// Sum of episode durations.
pub fn total_rain_hours(episodes: &[Episode]) -> u32 {
    episodes.iter().map(|e| e.duration_hours).sum()
}
