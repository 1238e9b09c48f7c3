//! Extraction engine API.
//!
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`CellRange`], [`Interval`] - Rectangular ranges as half-open intervals
//! - [`RowSpan`] - Row-only spans, possibly open-ended
//! - [`LengthSpec`], [`SymbolTable`] - Literal or symbolic truncation bounds
//! - [`Grid`], [`Sheet`], [`Scalar`] - Read-only grid access
//! - [`extract_cell`], [`extract_range`] - Grid reads with row override
//! - [`MappingSchema`], [`ExtractionPlan`] - The mapping schema and its compiled form
//! - [`SchemaRunner`], [`run`] - Section-ordered extraction into an [`Extraction`]

mod cell_ref;
mod extract;
mod grid;
mod length;
mod range;
mod row_span;
mod runner;
mod schema;

pub use cell_ref::CellRef;
pub use extract::{Value, extract_cell, extract_range};
pub use grid::{Grid, Scalar, Sheet};
pub use length::{LengthSpec, SYMBOL_MARKER, SymbolTable, truncate};
pub use range::{CellRange, Interval, RANGE_SEPARATOR};
pub use row_span::RowSpan;
pub use runner::{Extraction, Record, SchemaRunner, run, stage};
pub use schema::{
    CellField, Component, ComponentEntry, ComponentField, DetailedComponent, DetailedRange,
    ExtractionPlan, MappingSchema, RangeEntry, RangeField, RepeatGroup, RowGroup,
};
