//! Sky transition from a saved series.

use crate::input::{load_series, InputFormat};
use crate::to_json;
use lockloop_storyboard::transition::{detect_transition, TransitionThresholds};
use lockloop_utils::dates::format_hour;
use log::info;

/// Load a series from `input` and print its first sky transition as JSON.
pub fn run_transition(
    input: &str,
    format: Option<InputFormat>,
    high: u8,
    low: u8,
) -> anyhow::Result<()> {
    if low > high {
        anyhow::bail!("--low ({}) must not exceed --high ({})", low, high);
    }
    let series = load_series(input, format)?;
    let transition = detect_transition(
        &series,
        TransitionThresholds {
            rain_high: high,
            rain_low: low,
        },
    );
    if let Some(t) = series.time().get(transition.index) {
        info!(
            "{} -> {} at {}",
            transition.from,
            transition.to,
            format_hour(t)
        );
    }
    println!("{}", to_json(&transition, false)?);
    Ok(())
}
