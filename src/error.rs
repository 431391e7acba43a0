// =============================================================================
// Input errors: structural problems with the bar history
// =============================================================================
//
// Everything in here is fatal: it is reported before any indicator is
// computed and no partial result is produced.  Numeric degeneracies inside the
// indicators (flat windows, zero losses) are not errors and never show up here.
// =============================================================================

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("required column '{column}' is missing from the input")]
    MissingColumn { column: &'static str },

    #[error("row {row}: required field '{field}' is empty")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: field '{field}' has invalid number '{value}'")]
    InvalidNumber {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("row {row}: invalid date '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("{date}: field '{field}' is not finite")]
    NonFinite { date: NaiveDate, field: &'static str },

    #[error("{date}: invalid price range (high {high}, low {low})")]
    InvalidRange { date: NaiveDate, high: f64, low: f64 },

    #[error("dates must be strictly increasing: {current} follows {previous}")]
    UnorderedDates {
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
