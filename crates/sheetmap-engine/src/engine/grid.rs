//! Grid data structures.
//!
//! - [`Scalar`] - A single cell value as delivered by a loader
//! - [`Grid`] - Read-only access to a rectangular table of scalars
//! - [`Sheet`] - Dense in-memory grid, the implementation loaders produce

use serde::{Serialize, Serializer};
use std::fmt;

/// A cell value. Blank cells serialize as empty strings.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Scalar {
    #[default]
    Blank,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Interpret the value as a whole number, if it is one.
    pub fn as_count(&self) -> Option<i64> {
        match self {
            Scalar::Int(n) => Some(*n),
            Scalar::Float(f) if f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(f) => {
                Some(*f as i64)
            }
            Scalar::Text(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Blank => "blank",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Text(_) => "text",
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Blank => serializer.serialize_str(""),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Int(n) => serializer.serialize_i64(*n),
            Scalar::Float(f) => serializer.serialize_f64(*f),
            Scalar::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Blank => Ok(()),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

/// Read-only rectangular table of scalars addressed by zero-based (row, col).
pub trait Grid {
    fn row_count(&self) -> usize;

    fn col_count(&self) -> usize;

    /// The value at `(row, col)`, or `None` outside the grid's extent.
    fn cell(&self, row: usize, col: usize) -> Option<&Scalar>;
}

/// Dense grid. Every row has `width` cells; short rows are padded with blanks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sheet {
    rows: Vec<Vec<Scalar>>,
    width: usize,
}

impl Sheet {
    pub fn new() -> Sheet {
        Sheet::default()
    }

    /// A blank grid of the given extent.
    pub fn with_size(rows: usize, cols: usize) -> Sheet {
        Sheet {
            rows: vec![vec![Scalar::Blank; cols]; rows],
            width: cols,
        }
    }

    /// Build from ragged rows, padding each to the widest one.
    pub fn from_rows(rows: Vec<Vec<Scalar>>) -> Sheet {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Scalar::Blank);
                row
            })
            .collect();
        Sheet { rows, width }
    }

    /// Set a cell, growing the grid as needed.
    pub fn set(&mut self, row: usize, col: usize, value: Scalar) {
        if col >= self.width {
            self.width = col + 1;
            for r in &mut self.rows {
                r.resize(self.width, Scalar::Blank);
            }
        }
        if row >= self.rows.len() {
            self.rows.resize(row + 1, vec![Scalar::Blank; self.width]);
        }
        self.rows[row][col] = value;
    }
}

impl Grid for Sheet {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn col_count(&self) -> usize {
        self.width
    }

    fn cell(&self, row: usize, col: usize) -> Option<&Scalar> {
        self.rows.get(row)?.get(col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_pads_ragged_rows() {
        let sheet = Sheet::from_rows(vec![
            vec![Scalar::Int(1)],
            vec![Scalar::Int(2), Scalar::Int(3), Scalar::Int(4)],
        ]);
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.col_count(), 3);
        assert_eq!(sheet.cell(0, 2), Some(&Scalar::Blank));
        assert_eq!(sheet.cell(1, 2), Some(&Scalar::Int(4)));
        assert_eq!(sheet.cell(2, 0), None);
        assert_eq!(sheet.cell(0, 3), None);
    }

    #[test]
    fn test_set_grows_grid() {
        let mut sheet = Sheet::new();
        sheet.set(2, 1, Scalar::from("x"));
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.col_count(), 2);
        assert_eq!(sheet.cell(2, 1), Some(&Scalar::Text("x".into())));
        assert_eq!(sheet.cell(0, 0), Some(&Scalar::Blank));
    }

    #[test]
    fn test_as_count() {
        assert_eq!(Scalar::Int(3).as_count(), Some(3));
        assert_eq!(Scalar::Float(4.0).as_count(), Some(4));
        assert_eq!(Scalar::Float(4.5).as_count(), None);
        assert_eq!(Scalar::Float(-2.0).as_count(), Some(-2));
        assert_eq!(Scalar::Float(1e300).as_count(), None);
        assert_eq!(Scalar::Float(9.3e18).as_count(), None);
        assert_eq!(Scalar::Float(f64::INFINITY).as_count(), None);
        assert_eq!(Scalar::Float(f64::NAN).as_count(), None);
        assert_eq!(Scalar::from(" 7 ").as_count(), Some(7));
        assert_eq!(Scalar::Blank.as_count(), None);
        assert_eq!(Scalar::Bool(true).as_count(), None);
    }

    #[test]
    fn test_serialize_blank_as_empty_string() {
        let values = vec![
            Scalar::Blank,
            Scalar::Int(5),
            Scalar::Float(1.5),
            Scalar::from("a"),
            Scalar::Bool(false),
        ];
        assert_eq!(
            serde_json::to_string(&values).unwrap(),
            r#"["",5,1.5,"a",false]"#
        );
    }
}
