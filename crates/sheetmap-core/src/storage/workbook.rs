//! Workbook import (xlsx, xlsm, xlsb, xls, ods) into a [`Sheet`].

use calamine::{Data, Reader, open_workbook_auto};
use sheetmap_engine::engine::{Grid, Scalar, Sheet};
use std::path::Path;

use super::{check_extent, check_size};
use crate::error::{Result, SheetmapError};

/// Names of the sheets in a workbook, in workbook order.
pub fn sheet_names(path: &Path, max_bytes: u64) -> Result<Vec<String>> {
    check_size(path, max_bytes)?;
    let workbook = open_workbook_auto(path)?;
    Ok(workbook.sheet_names())
}

/// Load one sheet of a workbook; the first sheet when `sheet` is `None`.
///
/// Cells keep their absolute positions, so `A1` in a schema is `A1` in the
/// workbook even when the used area starts further down.
pub fn load_workbook_sheet(path: &Path, sheet: Option<&str>, max_bytes: u64) -> Result<Sheet> {
    check_size(path, max_bytes)?;
    let mut workbook = open_workbook_auto(path)?;

    let available = workbook.sheet_names();
    let name = match sheet {
        Some(name) if available.iter().any(|n| n == name) => name.to_string(),
        Some(name) => {
            return Err(SheetmapError::SheetNotFound {
                name: name.to_string(),
                available,
            });
        }
        None => available.first().cloned().ok_or(SheetmapError::EmptyWorkbook)?,
    };

    let range = workbook.worksheet_range(&name)?;
    let Some((start_row, start_col)) = range.start() else {
        log::warn!("sheet {name} in {} is empty", path.display());
        return Ok(Sheet::new());
    };

    // NOTE: calamine `Range` iterators return coordinates relative to `range.start()`.
    let (start_row, start_col) = (start_row as usize, start_col as usize);
    // Size by the cells holding data, not the declared dimension, which a
    // single formatted blank can push out to XFD1048576.
    let (rows, cols) = range.used_cells().fold((0, 0), |(rows, cols), (row, col, _)| {
        (rows.max(start_row + row + 1), cols.max(start_col + col + 1))
    });
    check_extent(rows, cols)?;

    let mut out = Sheet::with_size(rows, cols);
    for (row, col, value) in range.used_cells() {
        out.set(start_row + row, start_col + col, convert_value(value));
    }

    log::debug!(
        "loaded sheet {name} from {}: {} rows x {} columns",
        path.display(),
        out.row_count(),
        out.col_count()
    );
    Ok(out)
}

/// Dates come out the way a JSON encoder writes a naive datetime.
const ISO_DATETIME: &str = "%Y-%m-%dT%H:%M:%S";

fn convert_value(value: &Data) -> Scalar {
    match value {
        Data::Empty => Scalar::Blank,
        Data::Bool(v) => Scalar::Bool(*v),
        Data::Int(v) => Scalar::Int(*v),
        Data::Float(v) => Scalar::Float(*v),
        Data::String(v) => Scalar::Text(v.clone()),
        Data::DateTime(v) => match v.as_datetime() {
            Some(dt) if v.is_datetime() => Scalar::Text(dt.format(ISO_DATETIME).to_string()),
            _ => Scalar::Float(v.as_f64()),
        },
        Data::DateTimeIso(v) => Scalar::Text(v.clone()),
        Data::DurationIso(v) => Scalar::Text(v.clone()),
        Data::Error(e) => Scalar::Text(e.to_string()),
    }
}
