//! Rectangular ranges in `A1:B2` notation.
//!
//! A range resolves to a pair of half-open intervals. The stop bound is the
//! stop address plus one, so `A1:A1` covers exactly one cell.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

use super::cell_ref::CellRef;
use crate::error::{ExtractError, Result};

/// Separator between the two corners of a range, and the two sides of a row span.
pub const RANGE_SEPARATOR: char = ':';

/// Half-open interval `[start, stop)` over row or column indices.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: usize,
    pub stop: usize,
}

impl Interval {
    pub fn new(start: usize, stop: usize) -> Interval {
        Interval { start, stop }
    }

    /// Number of indices covered. A stop before the start is empty.
    pub fn len(&self) -> usize {
        self.stop.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn indices(&self) -> Range<usize> {
        self.start..self.stop.max(self.start)
    }
}

/// A resolved rectangular range.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellRange {
    pub rows: Interval,
    pub cols: Interval,
}

impl CellRange {
    /// Build the range spanning `start` through `stop` inclusive.
    pub fn between(start: CellRef, stop: CellRef) -> CellRange {
        CellRange {
            rows: Interval::new(start.row, stop.row + 1),
            cols: Interval::new(start.col, stop.col + 1),
        }
    }

    /// Parse `<cell>:<cell>` notation.
    pub fn parse(notation: &str) -> Result<CellRange> {
        let malformed = || ExtractError::MalformedRange(notation.to_string());

        let mut parts = notation.split(RANGE_SEPARATOR);
        let (Some(start), Some(stop), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };
        if start.is_empty() || stop.is_empty() {
            return Err(malformed());
        }

        let start = CellRef::parse(start).map_err(|_| malformed())?;
        let stop = CellRef::parse(stop).map_err(|_| malformed())?;
        Ok(CellRange::between(start, stop))
    }

    /// Whether a notation string has the shape of a range rather than a single cell.
    pub fn is_range_notation(notation: &str) -> bool {
        notation.contains(RANGE_SEPARATOR)
    }
}

impl std::str::FromStr for CellRange {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = CellRef::new(self.rows.start, self.cols.start);
        let stop = CellRef::new(
            self.rows.stop.saturating_sub(1),
            self.cols.stop.saturating_sub(1),
        );
        write!(f, "{start}{RANGE_SEPARATOR}{stop}")
    }
}
