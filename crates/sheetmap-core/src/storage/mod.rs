//! Storage: loading grids from CSV/workbook files and mapping schemas from JSON

mod csv;
mod schema;
mod workbook;

pub use self::csv::{load_csv, read_csv};
pub use schema::{load_schema, parse_schema};
pub use workbook::{load_workbook_sheet, sheet_names};

use sheetmap_engine::engine::Sheet;
use std::fs::File;
use std::path::Path;

use crate::error::{Result, SheetmapError};

/// Default cap on input file size (64 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 64 * 1_048_576;

/// Cap on the cells of a loaded grid, blanks included (about 320 MB of cells).
pub const MAX_SHEET_CELLS: usize = 10_000_000;

/// Grid file formats, chosen by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Tsv,
    Workbook,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<SourceFormat> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(SourceFormat::Csv),
            Some("tsv") | Some("tab") => Ok(SourceFormat::Tsv),
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "xla" | "xlam" | "ods") => {
                Ok(SourceFormat::Workbook)
            }
            _ => Err(SheetmapError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Options for [`load_sheet`].
#[derive(Clone, Debug, PartialEq)]
pub struct LoadOptions {
    /// Sheet name for workbooks; the first sheet when unset.
    pub sheet: Option<String>,
    pub max_file_bytes: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            sheet: None,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

/// Load a grid from any supported file.
pub fn load_sheet(path: &Path, options: &LoadOptions) -> Result<Sheet> {
    let format = SourceFormat::from_path(path)?;
    if format != SourceFormat::Workbook
        && let Some(sheet) = &options.sheet
    {
        log::warn!("ignoring sheet {sheet:?} for {}", path.display());
    }
    match format {
        SourceFormat::Csv => load_csv(path, b',', options.max_file_bytes),
        SourceFormat::Tsv => load_csv(path, b'\t', options.max_file_bytes),
        SourceFormat::Workbook => {
            load_workbook_sheet(path, options.sheet.as_deref(), options.max_file_bytes)
        }
    }
}

pub(crate) fn check_size(path: &Path, max_bytes: u64) -> Result<()> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > max_bytes {
        return Err(SheetmapError::FileTooLarge {
            path: path.to_path_buf(),
            len: meta.len(),
            max: max_bytes,
        });
    }
    Ok(())
}

pub(crate) fn check_extent(rows: usize, cols: usize) -> Result<()> {
    match rows.checked_mul(cols) {
        Some(cells) if cells <= MAX_SHEET_CELLS => Ok(()),
        _ => Err(SheetmapError::SheetTooLarge {
            rows,
            cols,
            max: MAX_SHEET_CELLS,
        }),
    }
}

pub(crate) fn open_capped(path: &Path, max_bytes: u64) -> Result<File> {
    check_size(path, max_bytes)?;
    Ok(File::open(path)?)
}

pub(crate) fn read_capped(path: &Path, max_bytes: u64) -> Result<String> {
    check_size(path, max_bytes)?;
    Ok(std::fs::read_to_string(path)?)
}
