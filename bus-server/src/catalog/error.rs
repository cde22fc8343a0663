//! Catalog loading and lookup errors.

use std::io;

/// Errors from loading a preloaded CSV table.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Reading the file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The CSV could not be parsed.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is missing from the header row.
    #[error("missing column {0:?} in header row")]
    MissingColumn(&'static str),

    /// A data row carries an unusable value.
    #[error("row {row}: {message}")]
    BadRow { row: usize, message: String },
}

/// Errors from resolving a stop name to a single stop pole.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No stop in the catalog carries this display name.
    #[error("no stop named {0:?} in the catalog")]
    UnknownStopName(String),

    /// The 1-based candidate choice is outside the candidate list.
    #[error("choice {choice} is out of range (1..={count})")]
    ChoiceOutOfRange { choice: usize, count: usize },
}
