//! sheetmap-core - Loaders, configuration and the report document.

pub mod config;
pub mod document;
pub mod error;
pub mod storage;

pub use config::{Config, load_config};
pub use document::Report;
pub use error::{Result, SheetmapError};
pub use storage::{LoadOptions, load_schema, load_sheet};

pub use sheetmap_engine::{Extraction, MappingSchema};
