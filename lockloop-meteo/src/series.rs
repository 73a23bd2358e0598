use crate::error::{InvalidSeriesError, Result};
use crate::weather_code::WeatherCode;
use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use lockloop_utils::dates::{format_hour, parse_hour};

/// Precipitation probability (percent) at or above which an hour counts as rain.
pub const RAIN_PROBABILITY_THRESHOLD: u8 = 50;

/// Upper bound of a percentage field.
pub const MAX_PERCENT: u8 = 100;

/// One calendar day of hourly weather samples.
///
/// The arrays are index-aligned and all have the same length. `time` never
/// decreases. Only `rain` is optional, and only for the whole series.
/// Construction goes through [`HourlySeries::new`] (or a loader built on it),
/// so every value of this type has passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySeries {
    time: Vec<NaiveDateTime>,
    precipitation_probability: Vec<u8>,
    weather_code: Vec<WeatherCode>,
    cloud_cover: Vec<u8>,
    rain: Option<Vec<f64>>,
}

impl HourlySeries {
    /// Validate and assemble a series from its parallel arrays.
    pub fn new(
        time: Vec<NaiveDateTime>,
        precipitation_probability: Vec<u8>,
        weather_code: Vec<WeatherCode>,
        cloud_cover: Vec<u8>,
        rain: Option<Vec<f64>>,
    ) -> Result<HourlySeries> {
        let expected = time.len();
        check_len("precipitation_probability", expected, precipitation_probability.len())?;
        check_len("weather_code", expected, weather_code.len())?;
        check_len("cloud_cover", expected, cloud_cover.len())?;
        if let Some(rain) = &rain {
            check_len("rain", expected, rain.len())?;
        }
        for (index, pair) in time.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(InvalidSeriesError::OutOfOrder {
                    index: index + 1,
                    value: format_hour(&pair[1]),
                });
            }
        }
        check_percent("precipitation_probability", &precipitation_probability)?;
        check_percent("cloud_cover", &cloud_cover)?;
        if let Some(rain) = &rain {
            if let Some((index, value)) = rain
                .iter()
                .enumerate()
                .find(|(_, mm)| !mm.is_finite() || **mm < 0.0)
            {
                return Err(InvalidSeriesError::OutOfRange {
                    field: "rain",
                    index,
                    value: value.to_string(),
                });
            }
        }
        Ok(HourlySeries {
            time,
            precipitation_probability,
            weather_code,
            cloud_cover,
            rain,
        })
    }

    /// Parse a headed CSV series.
    ///
    /// Columns are located by header name:
    /// `time,precipitation_probability,weather_code,cloud_cover[,rain]`.
    /// The legacy names `weathercode` and `cloudcover` are accepted. When the
    /// header carries `rain` every row must fill it.
    ///
    /// # Example CSV
    /// ```text
    /// time,precipitation_probability,weather_code,cloud_cover,rain
    /// 2024-07-01T00:00,10,3,85,0.0
    /// 2024-07-01T01:00,60,61,90,1.2
    /// ```
    pub fn from_csv(csv_data: &str) -> Result<HourlySeries> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_data.as_bytes());
        let headers = rdr.headers()?.clone();
        let column = |name: &str, alias: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name) || h.eq_ignore_ascii_case(alias))
        };
        let required = |name: &'static str, alias: &str| {
            column(name, alias).ok_or(InvalidSeriesError::MissingArray(name))
        };
        let time_col = required("time", "time")?;
        let probability_col = required("precipitation_probability", "precipitation_probability")?;
        let code_col = required("weather_code", "weathercode")?;
        let cloud_col = required("cloud_cover", "cloudcover")?;
        let rain_col = column("rain", "rain");
        let has_rain = rain_col.is_some();

        let mut time = Vec::new();
        let mut probability = Vec::new();
        let mut codes = Vec::new();
        let mut cloud = Vec::new();
        let mut rain = Vec::new();

        for (row, result) in rdr.records().enumerate() {
            let record = result?;
            let cell = |column: usize| record.get(column).unwrap_or("");

            let raw_time = cell(time_col);
            let t = parse_hour(raw_time).map_err(|_| InvalidSeriesError::UnparsableTimestamp {
                index: row,
                value: raw_time.to_string(),
            })?;
            time.push(t);
            probability.push(parse_cell(cell(probability_col), row, "precipitation_probability")?);
            codes.push(WeatherCode(parse_cell(cell(code_col), row, "weather_code")?));
            cloud.push(parse_cell(cell(cloud_col), row, "cloud_cover")?);
            if let Some(rain_col) = rain_col {
                rain.push(parse_cell(cell(rain_col), row, "rain")?);
            }
        }

        log::debug!("Read {} hourly rows from CSV (rain column: {})", time.len(), has_rain);
        HourlySeries::new(time, probability, codes, cloud, has_rain.then_some(rain))
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn time(&self) -> &[NaiveDateTime] {
        &self.time
    }

    pub fn precipitation_probability(&self) -> &[u8] {
        &self.precipitation_probability
    }

    pub fn weather_code(&self) -> &[WeatherCode] {
        &self.weather_code
    }

    pub fn cloud_cover(&self) -> &[u8] {
        &self.cloud_cover
    }

    /// Hourly rain amounts in millimeters, if the source supplied them.
    pub fn rain(&self) -> Option<&[f64]> {
        self.rain.as_deref()
    }

    /// Whether hour `i` is a rain hour: a precipitation weather code, or a
    /// precipitation probability of at least 50%.
    pub fn is_rain(&self, i: usize) -> bool {
        self.weather_code[i].is_rain()
            || self.precipitation_probability[i] >= RAIN_PROBABILITY_THRESHOLD
    }
}

fn check_len(field: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(InvalidSeriesError::LengthMismatch {
            field,
            expected,
            found,
        });
    }
    Ok(())
}

fn check_percent(field: &'static str, values: &[u8]) -> Result<()> {
    match values.iter().position(|v| *v > MAX_PERCENT) {
        Some(index) => Err(InvalidSeriesError::OutOfRange {
            field,
            index,
            value: values[index].to_string(),
        }),
        None => Ok(()),
    }
}

fn parse_cell<T: std::str::FromStr>(value: &str, row: usize, column: &'static str) -> Result<T> {
    value.parse::<T>().map_err(|_| InvalidSeriesError::InvalidValue {
        row,
        column,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn hours(n: u32) -> Vec<NaiveDateTime> {
        (0..n)
            .map(|h| {
                NaiveDate::from_ymd_opt(2024, 7, 1)
                    .unwrap()
                    .and_hms_opt(h, 0, 0)
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_new_valid_series() {
        let series = HourlySeries::new(
            hours(3),
            vec![10, 60, 0],
            vec![WeatherCode(0), WeatherCode(0), WeatherCode(61)],
            vec![20, 30, 40],
            None,
        )
        .unwrap();
        assert_eq!(series.len(), 3);
        assert!(series.rain().is_none());
        assert!(!series.is_rain(0));
        assert!(series.is_rain(1)); // probability
        assert!(series.is_rain(2)); // code
    }

    #[test]
    fn test_empty_series_is_valid() {
        let series = HourlySeries::new(vec![], vec![], vec![], vec![], None).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_probability_threshold_is_inclusive() {
        let series = HourlySeries::new(
            hours(2),
            vec![49, 50],
            vec![WeatherCode(2); 2],
            vec![0, 0],
            None,
        )
        .unwrap();
        assert!(!series.is_rain(0));
        assert!(series.is_rain(1));
    }

    #[test]
    fn test_length_mismatch() {
        let err = HourlySeries::new(hours(3), vec![0; 2], vec![WeatherCode(0); 3], vec![0; 3], None)
            .unwrap_err();
        match err {
            InvalidSeriesError::LengthMismatch {
                field,
                expected,
                found,
            } => {
                assert_eq!(field, "precipitation_probability");
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rain_length_mismatch() {
        let err = HourlySeries::new(
            hours(3),
            vec![0; 3],
            vec![WeatherCode(0); 3],
            vec![0; 3],
            Some(vec![0.0; 4]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            InvalidSeriesError::LengthMismatch { field: "rain", .. }
        ));
    }

    #[test]
    fn test_out_of_order() {
        let mut time = hours(3);
        time.swap(1, 2);
        let err = HourlySeries::new(time, vec![0; 3], vec![WeatherCode(0); 3], vec![0; 3], None)
            .unwrap_err();
        assert!(matches!(err, InvalidSeriesError::OutOfOrder { index: 2, .. }));
    }

    #[test]
    fn test_repeated_timestamp_is_allowed() {
        let mut time = hours(2);
        time[1] = time[0];
        assert!(HourlySeries::new(time, vec![0; 2], vec![WeatherCode(0); 2], vec![0; 2], None).is_ok());
    }

    #[test]
    fn test_from_csv_with_rain() {
        let csv_data = "\
time,precipitation_probability,weather_code,cloud_cover,rain
2024-07-01T00:00,10,3,85,0.0
2024-07-01T01:00,60,61,90,1.2
2024-07-01T02:00,20,2,35,0.0
";
        let series = HourlySeries::from_csv(csv_data).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.weather_code()[1], WeatherCode(61));
        assert_eq!(series.cloud_cover(), &[85, 90, 35]);
        assert_eq!(series.rain().unwrap(), &[0.0, 1.2, 0.0]);
    }

    #[test]
    fn test_from_csv_without_rain() {
        let csv_data = "\
time,precipitation_probability,weather_code,cloud_cover
2024-07-01T00:00,10,3,85
2024-07-01T01:00,60,61,90
";
        let series = HourlySeries::from_csv(csv_data).unwrap();
        assert_eq!(series.len(), 2);
        assert!(series.rain().is_none());
    }

    #[test]
    fn test_from_csv_bad_timestamp() {
        let csv_data = "\
time,precipitation_probability,weather_code,cloud_cover
2024-07-01T00:00,10,3,85
noon,60,61,90
";
        let err = HourlySeries::from_csv(csv_data).unwrap_err();
        assert!(matches!(
            err,
            InvalidSeriesError::UnparsableTimestamp { index: 1, .. }
        ));
    }

    #[test]
    fn test_new_rejects_bad_rain_amounts() {
        for bad in [f64::NAN, f64::INFINITY, -0.5] {
            let err = HourlySeries::new(
                hours(2),
                vec![80, 0],
                vec![WeatherCode(61), WeatherCode(0)],
                vec![90, 10],
                Some(vec![0.0, bad]),
            )
            .unwrap_err();
            assert!(
                matches!(err, InvalidSeriesError::OutOfRange { field: "rain", index: 1, .. }),
                "rain {bad} was accepted"
            );
        }
    }

    #[test]
    fn test_from_csv_rejects_nan_rain() {
        let csv_data = "\
time,precipitation_probability,weather_code,cloud_cover,rain
2024-07-01T09:00,80,61,90,NaN
2024-07-01T10:00,10,3,50,0.0
";
        let err = HourlySeries::from_csv(csv_data).unwrap_err();
        assert!(matches!(
            err,
            InvalidSeriesError::OutOfRange { field: "rain", index: 0, .. }
        ));
    }

    #[test]
    fn test_new_rejects_percent_above_100() {
        let err = HourlySeries::new(
            hours(3),
            vec![0; 3],
            vec![WeatherCode(0); 3],
            vec![50, 180, 20],
            None,
        )
        .unwrap_err();
        match err {
            InvalidSeriesError::OutOfRange { field, index, value } => {
                assert_eq!(field, "cloud_cover");
                assert_eq!(index, 1);
                assert_eq!(value, "180");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(HourlySeries::new(hours(1), vec![101], vec![WeatherCode(0)], vec![0], None).is_err());
        assert!(HourlySeries::new(hours(1), vec![100], vec![WeatherCode(0)], vec![100], None).is_ok());
    }

    #[test]
    fn test_from_csv_reads_columns_by_header_name() {
        let csv_data = "\
time,weather_code,precipitation_probability,rain,cloud_cover
2024-07-01T00:00,61,20,1.5,85
";
        let series = HourlySeries::from_csv(csv_data).unwrap();
        assert_eq!(series.weather_code(), &[WeatherCode(61)]);
        assert_eq!(series.precipitation_probability(), &[20]);
        assert_eq!(series.cloud_cover(), &[85]);
        assert_eq!(series.rain().unwrap(), &[1.5]);
    }

    #[test]
    fn test_from_csv_accepts_legacy_header_names() {
        let csv_data = "\
time,precipitation_probability,weathercode,cloudcover
2024-07-01T00:00,10,3,85
";
        let series = HourlySeries::from_csv(csv_data).unwrap();
        assert_eq!(series.weather_code(), &[WeatherCode(3)]);
        assert!(series.rain().is_none());
    }

    #[test]
    fn test_from_csv_missing_column() {
        let csv_data = "\
time,precipitation_probability,weather_code,clouds
2024-07-01T00:00,10,3,85
";
        let err = HourlySeries::from_csv(csv_data).unwrap_err();
        assert!(matches!(err, InvalidSeriesError::MissingArray("cloud_cover")));
    }

    #[test]
    fn test_from_csv_missing_rain_cell() {
        let csv_data = "\
time,precipitation_probability,weather_code,cloud_cover,rain
2024-07-01T00:00,10,3,85,
";
        let err = HourlySeries::from_csv(csv_data).unwrap_err();
        assert!(matches!(
            err,
            InvalidSeriesError::InvalidValue { column: "rain", .. }
        ));
    }
}
