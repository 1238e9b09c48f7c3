//! Grid reads for single cells and rectangular ranges.
//!
//! Both readers accept a row override so that a repeated-row component can
//! reuse a column-only address while the row comes from the enclosing span.

use serde::Serialize;
use std::ops::Range;

use super::cell_ref::CellRef;
use super::grid::{Grid, Scalar};
use super::range::CellRange;
use crate::error::{ExtractError, Result};

/// An extracted value: one scalar for a cell, a flat list for a range.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

fn read(grid: &dyn Grid, row: usize, col: usize) -> Result<Scalar> {
    grid.cell(row, col)
        .cloned()
        .ok_or_else(|| ExtractError::OutOfBounds {
            row,
            col,
            rows: grid.row_count(),
            cols: grid.col_count(),
        })
}

/// Read one cell, optionally from `row_override` instead of the cell's own row.
pub fn extract_cell(grid: &dyn Grid, cell: CellRef, row_override: Option<usize>) -> Result<Scalar> {
    let row = row_override.unwrap_or(cell.row);
    log::trace!("read {} at ({row}, {})", cell, cell.col);
    read(grid, row, cell.col)
}

/// Read a range flattened in row-major order.
///
/// With `row_override`, only that row is read across the range's columns.
pub fn extract_range(
    grid: &dyn Grid,
    range: CellRange,
    row_override: Option<usize>,
) -> Result<Vec<Scalar>> {
    let rows = match row_override {
        Some(row) => row..row.saturating_add(1),
        None => range.rows.indices(),
    };
    let cols = range.cols.indices();
    log::trace!("read {range} over rows {rows:?}");

    if rows.is_empty() || cols.is_empty() {
        return Ok(Vec::new());
    }
    check_extent(grid, &rows, &cols)?;

    let mut values = Vec::with_capacity(rows.len() * cols.len());
    for row in rows {
        for col in cols.clone() {
            values.push(read(grid, row, col)?);
        }
    }
    Ok(values)
}

/// Reject a non-empty block that leaves the grid, naming the first cell a
/// row-major walk would hit outside it.
fn check_extent(grid: &dyn Grid, rows: &Range<usize>, cols: &Range<usize>) -> Result<()> {
    let (row_count, col_count) = (grid.row_count(), grid.col_count());
    let first_outside = if rows.start >= row_count {
        Some((rows.start, cols.start))
    } else if cols.end > col_count {
        Some((rows.start, cols.start.max(col_count)))
    } else if rows.end > row_count {
        Some((row_count, cols.start))
    } else {
        None
    };

    match first_outside {
        Some((row, col)) => Err(ExtractError::OutOfBounds {
            row,
            col,
            rows: row_count,
            cols: col_count,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::grid::Sheet;

    /// Columns A-D, rows 1-4: A = 1..4, B = 5..8, C = 9..12, D = 13..16.
    fn sheet() -> Sheet {
        Sheet::from_rows(
            (0..4)
                .map(|r| (0..4).map(|c| Scalar::Int(c * 4 + r + 1)).collect())
                .collect(),
        )
    }

    #[test]
    fn test_extract_cell() {
        let grid = sheet();
        assert_eq!(extract_cell(&grid, CellRef::parse("A1").unwrap(), None), Ok(Scalar::Int(1)));
        assert_eq!(extract_cell(&grid, CellRef::parse("C3").unwrap(), None), Ok(Scalar::Int(11)));
    }

    #[test]
    fn test_extract_cell_with_row_override() {
        let grid = sheet();
        assert_eq!(
            extract_cell(&grid, CellRef::parse("A1").unwrap(), Some(2)),
            Ok(Scalar::Int(3))
        );
        assert_eq!(
            extract_cell(&grid, CellRef::parse("B2").unwrap(), Some(3)),
            Ok(Scalar::Int(8))
        );
    }

    #[test]
    fn test_extract_cell_out_of_bounds() {
        let grid = sheet();
        assert_eq!(
            extract_cell(&grid, CellRef::parse("E1").unwrap(), None),
            Err(ExtractError::OutOfBounds { row: 0, col: 4, rows: 4, cols: 4 })
        );
        assert!(extract_cell(&grid, CellRef::parse("A1").unwrap(), Some(4)).is_err());
    }

    #[test]
    fn test_extract_range_row_major() {
        let grid = sheet();
        let values = extract_range(&grid, CellRange::parse("A1:B2").unwrap(), None).unwrap();
        assert_eq!(values, vec![Scalar::Int(1), Scalar::Int(5), Scalar::Int(2), Scalar::Int(6)]);
    }

    #[test]
    fn test_extract_range_single_row_override() {
        let grid = sheet();
        let values = extract_range(&grid, CellRange::parse("A1:C1").unwrap(), Some(1)).unwrap();
        assert_eq!(values, vec![Scalar::Int(2), Scalar::Int(6), Scalar::Int(10)]);
    }

    #[test]
    fn test_extract_range_out_of_bounds() {
        let grid = sheet();
        let err = extract_range(&grid, CellRange::parse("C4:E4").unwrap(), None).unwrap_err();
        assert!(matches!(err, ExtractError::OutOfBounds { row: 3, col: 4, .. }));
    }

    #[test]
    fn test_extract_range_partly_outside_names_first_missing_cell() {
        let grid = sheet();
        let err = extract_range(&grid, CellRange::parse("B3:B6").unwrap(), None).unwrap_err();
        assert_eq!(err, ExtractError::OutOfBounds { row: 4, col: 1, rows: 4, cols: 4 });
        let err = extract_range(&grid, CellRange::parse("E5:F6").unwrap(), None).unwrap_err();
        assert_eq!(err, ExtractError::OutOfBounds { row: 4, col: 4, rows: 4, cols: 4 });
    }

    #[test]
    fn test_extract_huge_range_is_out_of_bounds() {
        let grid = Sheet::from_rows(vec![vec![Scalar::Int(1)]]);
        let err = extract_range(&grid, CellRange::parse("A1:XFD1048576").unwrap(), None).unwrap_err();
        assert_eq!(err, ExtractError::OutOfBounds { row: 0, col: 1, rows: 1, cols: 1 });

        let wide = CellRange::parse("A1:ZZZZZZZZZZZZZ1").unwrap();
        let err = extract_range(&grid, wide, Some(0)).unwrap_err();
        assert_eq!(err, ExtractError::OutOfBounds { row: 0, col: 1, rows: 1, cols: 1 });

        let err = extract_range(&grid, wide, Some(5)).unwrap_err();
        assert_eq!(err, ExtractError::OutOfBounds { row: 5, col: 0, rows: 1, cols: 1 });
    }

    #[test]
    fn test_extract_empty_range_reads_nothing() {
        let grid = sheet();
        let range = CellRange::parse("B2:A1").unwrap();
        assert_eq!(extract_range(&grid, range, None), Ok(vec![]));
    }

    #[test]
    fn test_value_serializes_untagged() {
        let value = Value::List(vec![Scalar::Int(1), Scalar::Blank]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"[1,""]"#);
        let value = Value::Scalar(Scalar::from("x"));
        assert_eq!(serde_json::to_string(&value).unwrap(), r#""x""#);
    }
}
