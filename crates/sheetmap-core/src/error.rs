//! Error types for sheetmap core.

use std::path::PathBuf;
use thiserror::Error;

use sheetmap_engine::ExtractError;

/// Errors that can occur while loading inputs or extracting a report
#[derive(Error, Debug)]
pub enum SheetmapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Invalid schema in {}: {source}", .path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config in {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Sheet not found: {name} (available: {})", .available.join(", "))]
    SheetNotFound { name: String, available: Vec<String> },

    #[error("Workbook has no sheets")]
    EmptyWorkbook,

    #[error("Refusing to read {}: file too large ({len} bytes, max {max})", .path.display())]
    FileTooLarge { path: PathBuf, len: u64, max: u64 },

    #[error("Sheet too large: {rows} rows x {cols} columns exceeds {max} cells")]
    SheetTooLarge { rows: usize, cols: usize, max: usize },

    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

pub type Result<T> = std::result::Result<T, SheetmapError>;
