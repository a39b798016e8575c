use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// ErrorKind – coarse classification of pipeline failures
// ---------------------------------------------------------------------------

/// The category a pipeline failure falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source could not be parsed as CSV.
    Parse,
    /// The dataset does not have the expected columns.
    Schema,
    /// Network or filesystem failure.
    Io,
    /// Anything else (bad split parameters, empty input, ...).
    Unexpected,
}

// ---------------------------------------------------------------------------
// IngestError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to parse the csv file {locator}: {message}")]
    Parse { locator: String, message: String },

    #[error("missing column(s) in the dataset: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("expected {expected} columns after dropping placeholders, found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot split an empty dataset")]
    EmptyDataset,

    #[error("invalid split: {0}")]
    Split(String),
}

impl IngestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IngestError::Parse { .. } => ErrorKind::Parse,
            IngestError::Schema { .. } | IngestError::ColumnCount { .. } => ErrorKind::Schema,
            IngestError::Io { .. } | IngestError::Fetch { .. } | IngestError::Write { .. } => {
                ErrorKind::Io
            }
            IngestError::EmptyDataset | IngestError::Split(_) => ErrorKind::Unexpected,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IngestError::Io {
            path: path.into(),
            source,
        }
    }
}
