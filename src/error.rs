//! Error types for bikeshare-stats

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while selecting, loading or reporting on trip data
#[derive(Debug, Error)]
pub enum BikeshareError {
    /// A city, month or day entered by the user is not one of the valid choices
    #[error("{value} is not a valid {kind} choice")]
    InvalidSelection { kind: SelectionKind, value: String },

    /// A city identifier has no backing data source
    #[error("no data source is configured for city '{city}'")]
    UnknownCity { city: String },

    /// The data source is missing a required column or holds an unparseable value
    #[error("malformed {city} data in column '{column}'{}: {message}", line_suffix(.line))]
    MalformedData {
        city: String,
        column: String,
        line: Option<u64>,
        message: String,
    },

    /// The data file for a city could not be opened
    #[error("cannot open {city} data at {}: {source}", .path.display())]
    DataSource {
        city: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV structure itself is broken (bad quoting, ragged rows, ...)
    #[error("CSV error in {city} data: {source}")]
    Csv {
        city: String,
        #[source]
        source: csv::Error,
    },

    /// Standard input closed while waiting for an answer
    #[error("input closed before a valid choice was entered")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("text formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Which prompt a selection belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    City,
    Month,
    Day,
}

impl std::fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionKind::City => write!(f, "city"),
            SelectionKind::Month => write!(f, "month"),
            SelectionKind::Day => write!(f, "day"),
        }
    }
}

fn line_suffix(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!(" at line {}", line),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, BikeshareError>;

/// Build an error for a required column that the source does not have
pub fn missing_column(city: &str, column: &str) -> BikeshareError {
    BikeshareError::MalformedData {
        city: city.to_string(),
        column: column.to_string(),
        line: None,
        message: "required column is missing".to_string(),
    }
}

/// Build an error for a value that failed to parse
pub fn invalid_value(city: &str, column: &str, line: Option<u64>, value: &str) -> BikeshareError {
    BikeshareError::MalformedData {
        city: city.to_string(),
        column: column.to_string(),
        line,
        message: format!("cannot parse value '{}'", value),
    }
}

pub fn invalid_selection(kind: SelectionKind, value: &str) -> BikeshareError {
    BikeshareError::InvalidSelection {
        kind,
        value: value.to_string(),
    }
}
