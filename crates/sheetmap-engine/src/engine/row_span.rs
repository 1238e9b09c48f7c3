//! Row-only spans such as `2:10`, `3:` or `:`.
//!
//! The start is a 1-based row number and becomes a 0-based index. The end is
//! the 1-based number of the last row, which is also the exclusive 0-based
//! stop. Either side may be omitted: no start means the first row, no end
//! means through the last row of the grid.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

use super::range::RANGE_SEPARATOR;
use crate::error::{ExtractError, Result};

/// Half-open row interval whose stop may be open-ended.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct RowSpan {
    pub start: usize,
    /// `None` runs through the last row of the grid.
    pub stop: Option<usize>,
}

impl RowSpan {
    pub fn new(start: usize, stop: Option<usize>) -> RowSpan {
        RowSpan { start, stop }
    }

    pub fn parse(notation: &str) -> Result<RowSpan> {
        let malformed = || ExtractError::MalformedRowRange(notation.to_string());

        let mut parts = notation.split(RANGE_SEPARATOR);
        let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };

        let parse_side = |side: &str| -> Result<Option<usize>> {
            let side = side.trim();
            if side.is_empty() {
                return Ok(None);
            }
            if !side.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            side.parse::<usize>().map(Some).map_err(|_| malformed())
        };

        let start = parse_side(start)?.map_or(0, |n| n.saturating_sub(1));
        let stop = parse_side(end)?;
        Ok(RowSpan::new(start, stop))
    }

    /// Concrete row indices for a grid with `row_count` rows.
    ///
    /// The stop is clamped to the grid, and a start at or past the stop
    /// yields no rows.
    pub fn rows(&self, row_count: usize) -> Range<usize> {
        let stop = self.stop.map_or(row_count, |stop| stop.min(row_count));
        self.start.min(stop)..stop
    }
}

impl std::str::FromStr for RowSpan {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RowSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{RANGE_SEPARATOR}", self.start + 1)?;
        if let Some(stop) = self.stop {
            write!(f, "{stop}")?;
        }
        Ok(())
    }
}
