//! CSV/TSV import into a [`Sheet`].
//!
//! Every record is a grid row starting at A1; there is no header row.

use sheetmap_engine::engine::{Grid, Scalar, Sheet};
use std::io::Read;
use std::path::Path;

use super::{check_extent, open_capped};
use crate::error::Result;

/// Load a delimited text file.
pub fn load_csv(path: &Path, delimiter: u8, max_bytes: u64) -> Result<Sheet> {
    let file = open_capped(path, max_bytes)?;
    let sheet = read_csv(file, delimiter)?;
    log::debug!(
        "loaded {}: {} rows x {} columns",
        path.display(),
        sheet.row_count(),
        sheet.col_count()
    );
    Ok(sheet)
}

/// Read delimited text from any reader. Ragged rows are padded with blanks.
pub fn read_csv<R: Read>(reader: R, delimiter: u8) -> Result<Sheet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut rows: Vec<Vec<Scalar>> = Vec::new();
    let mut width = 0;
    for record in reader.records() {
        let record = record?;
        width = width.max(record.len());
        rows.push(record.iter().map(parse_csv_field).collect());
    }
    // Padding short rows to the widest one must not blow up a small file.
    check_extent(rows.len(), width)?;
    Ok(Sheet::from_rows(rows))
}

/// Parse a CSV field into a scalar
/// - Empty string -> Blank
/// - Valid integer -> Int, valid decimal -> Float (unless it has leading zeros like "007")
/// - Otherwise -> Text
pub(crate) fn parse_csv_field(field: &str) -> Scalar {
    if field.is_empty() {
        return Scalar::Blank;
    }

    // Keep explicit surrounding whitespace (typically from quoted CSV fields).
    let trimmed = field.trim();
    if field != trimmed {
        return Scalar::Text(field.to_string());
    }

    // Preserve strings that look like numbers but have leading zeros (e.g., "007", "00123")
    // unless they're just "0" or start with "0."
    if trimmed.starts_with('0')
        && trimmed.len() > 1
        && !trimmed.starts_with("0.")
        && trimmed.chars().nth(1).is_some_and(|c| c.is_ascii_digit())
    {
        return Scalar::Text(trimmed.to_string());
    }

    // "inf" and "NaN" parse as floats; only digits make a number here.
    if !trimmed.bytes().any(|b| b.is_ascii_digit()) {
        return Scalar::Text(trimmed.to_string());
    }

    if let Ok(n) = trimmed.parse::<i64>() {
        return Scalar::Int(n);
    }
    if let Ok(x) = trimmed.parse::<f64>() {
        return Scalar::Float(x);
    }

    Scalar::Text(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_csv_field_numbers() {
        assert_eq!(parse_csv_field("42"), Scalar::Int(42));
        assert_eq!(parse_csv_field("-7"), Scalar::Int(-7));
        assert_eq!(parse_csv_field("3.25"), Scalar::Float(3.25));
        assert_eq!(parse_csv_field("0"), Scalar::Int(0));
        assert_eq!(parse_csv_field("0.5"), Scalar::Float(0.5));
    }

    #[test]
    fn test_parse_csv_field_leading_zero() {
        assert_eq!(parse_csv_field("007"), Scalar::Text("007".into()));
    }

    #[test]
    fn test_parse_csv_field_text() {
        assert_eq!(parse_csv_field("hello"), Scalar::Text("hello".into()));
        assert_eq!(parse_csv_field("NaN"), Scalar::Text("NaN".into()));
        assert_eq!(parse_csv_field("inf"), Scalar::Text("inf".into()));
        assert_eq!(parse_csv_field("  padded  "), Scalar::Text("  padded  ".into()));
        assert_eq!(parse_csv_field(""), Scalar::Blank);
    }

    #[test]
    fn test_read_csv_ragged_rows() {
        let sheet = read_csv("a,1\nb\n,\"x, y\",2.5\n".as_bytes(), b',').unwrap();
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.col_count(), 3);
        assert_eq!(sheet.cell(0, 1), Some(&Scalar::Int(1)));
        assert_eq!(sheet.cell(1, 1), Some(&Scalar::Blank));
        assert_eq!(sheet.cell(2, 0), Some(&Scalar::Blank));
        assert_eq!(sheet.cell(2, 1), Some(&Scalar::Text("x, y".into())));
        assert_eq!(sheet.cell(2, 2), Some(&Scalar::Float(2.5)));
    }

    #[test]
    fn test_read_csv_refuses_huge_padded_grid() {
        // One very wide row padded out over many short rows.
        let mut text = ",".repeat(200_000);
        text.push('\n');
        text.push_str(&"a\n".repeat(60));

        assert!(matches!(
            read_csv(text.as_bytes(), b','),
            Err(crate::SheetmapError::SheetTooLarge { rows: 61, cols: 200_001, .. })
        ));
    }

    #[test]
    fn test_read_tsv() {
        let sheet = read_csv("a\tb\n1\t2\n".as_bytes(), b'\t').unwrap();
        assert_eq!(sheet.cell(1, 1), Some(&Scalar::Int(2)));
    }

    #[test]
    fn test_load_csv_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        std::fs::write(&path, "1,4,7\n2,5,8\n3,6,9\n").unwrap();

        let sheet = load_csv(&path, b',', 1024).unwrap();
        assert_eq!(sheet.cell(1, 1), Some(&Scalar::Int(5)));
    }

    #[test]
    fn test_load_csv_respects_size_cap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.csv");
        std::fs::write(&path, "1,2,3,4,5,6,7,8,9\n").unwrap();

        assert!(matches!(
            load_csv(&path, b',', 4),
            Err(crate::SheetmapError::FileTooLarge { max: 4, .. })
        ));
    }
}
