//! Storyboard from a saved series.

use crate::input::{load_series, InputFormat};
use crate::to_json;
use lockloop_storyboard::build;

/// Load a series from `input`, build its storyboard and print it as JSON.
pub fn run_storyboard(
    input: &str,
    format: Option<InputFormat>,
    pretty: bool,
) -> anyhow::Result<()> {
    let series = load_series(input, format)?;
    let storyboard = build(&series);
    println!("{}", to_json(&storyboard, pretty)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_run_storyboard_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(include_str!("../../fixtures/passing_shower.json").as_bytes())
            .unwrap();
        let path = file.path().to_str().unwrap().to_string();
        assert!(run_storyboard(&path, None, true).is_ok());
    }

    #[test]
    fn test_run_storyboard_rejects_mismatched_arrays() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(
            br#"{"time": ["2024-07-01T00:00"], "precipitation_probability": [0, 1],
                "weathercode": [0], "cloudcover": [0]}"#,
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let err = run_storyboard(&path, Some(InputFormat::Json), false).unwrap_err();
        assert!(format!("{:#}", err).contains("precipitation_probability"));
    }
}
