//! Error types for the extraction engine.

use thiserror::Error;

/// Errors that abort an extraction run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("Malformed cell address: {0:?}")]
    MalformedAddress(String),

    #[error("Malformed range: {0:?}")]
    MalformedRange(String),

    #[error("Malformed row range: {0:?}")]
    MalformedRowRange(String),

    #[error("Unknown length reference: {0:?}")]
    UnknownLength(String),

    #[error("Length reference {name:?} is not an integer count (found {found})")]
    LengthNotCount { name: String, found: String },

    #[error("Cell at row {row}, column {col} is outside the grid ({rows} rows x {cols} columns)")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("{section}.{name}: {source}")]
    Entry {
        section: &'static str,
        name: String,
        #[source]
        source: Box<ExtractError>,
    },
}

impl ExtractError {
    /// Attach the schema entry that was being processed.
    pub fn in_entry(self, section: &'static str, name: impl Into<String>) -> Self {
        ExtractError::Entry {
            section,
            name: name.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with entry context stripped.
    pub fn root(&self) -> &ExtractError {
        match self {
            ExtractError::Entry { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
