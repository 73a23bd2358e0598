//! Error types for hourly series construction and fetching.
use thiserror::Error;

/// A series that cannot be analyzed. Raised before any analysis starts; no
/// partial result exists when this is returned.
#[derive(Error, Debug)]
pub enum InvalidSeriesError {
    /// Parallel arrays disagree on length
    #[error("Array `{field}` has {found} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    /// A required array is absent
    #[error("Required array `{0}` is missing")]
    MissingArray(&'static str),

    /// A timestamp could not be parsed
    #[error("Unparsable timestamp at index {index}: {value:?}")]
    UnparsableTimestamp { index: usize, value: String },

    /// A timestamp precedes the one before it
    #[error("Timestamp at index {index} ({value}) is earlier than its predecessor")]
    OutOfOrder { index: usize, value: String },

    /// A value outside its documented range: percentages above 100, or rain
    /// that is negative or not finite
    #[error("Value out of range in `{field}` at index {index}: {value}")]
    OutOfRange {
        field: &'static str,
        index: usize,
        value: String,
    },

    /// A null entry inside a required array
    #[error("Array `{field}` has no value at index {index}")]
    MissingValue { field: &'static str, index: usize },

    /// Failed to read CSV input
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A CSV cell holds a value of the wrong type
    #[error("Invalid value in row {row}, column `{column}`: {value:?}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Type alias for Results using InvalidSeriesError
pub type Result<T> = std::result::Result<T, InvalidSeriesError>;

/// Errors from the Open-Meteo forecast fetch
#[cfg(feature = "api")]
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Bad response status: {0}")]
    BadStatus(reqwest::StatusCode),
}
