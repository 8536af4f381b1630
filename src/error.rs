use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Startup: dataset loading
// ---------------------------------------------------------------------------

/// Failure to build the [`Dataset`](crate::data::model::Dataset) at startup.
///
/// Always fatal: the dashboard has nothing to show without its table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}, column '{column}': invalid value '{value}' ({reason})")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Runtime: filter criteria
// ---------------------------------------------------------------------------

/// Inconsistent filter criteria. Only reported by explicit validation;
/// evaluation itself treats such criteria as matching nothing.
#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("date range starts {start} but ends {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },

    #[error("price range starts at {from} but ends at {to}")]
    InvertedPriceRange { from: f64, to: f64 },

    #[error("price bound {0} is not a finite number")]
    NonFinitePrice(f64),
}

// ---------------------------------------------------------------------------
// Startup: configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has unsupported value '{value}' (expected one of: {expected})")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}
