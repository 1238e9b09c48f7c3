//! Schema runner.
//!
//! Extraction walks the plan in a fixed order: cells, then ranges, then
//! repeated row groups. Each stage is a distinct type that only exposes the
//! next stage, so a length can only ever reference a value an earlier step
//! produced:
//!
//! ```
//! use sheetmap_engine::engine::{MappingSchema, Scalar, SchemaRunner, Sheet};
//!
//! let grid = Sheet::from_rows(vec![vec![Scalar::Int(2), Scalar::Int(7), Scalar::Int(8)]]);
//! let schema: MappingSchema = Default::default();
//! let plan = schema.compile().unwrap();
//!
//! let extraction = SchemaRunner::new(&grid)
//!     .cells(&plan.cells).unwrap()
//!     .ranges(&plan.ranges).unwrap()
//!     .repeat_rows(&plan.groups).unwrap()
//!     .finish();
//! assert!(extraction.cells.is_empty());
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use std::marker::PhantomData;

use super::extract::{Value, extract_cell, extract_range};
use super::grid::{Grid, Scalar};
use super::length::{SymbolTable, truncate};
use super::schema::{
    CELLS, COMPONENTS, CellField, Component, ComponentField, ExtractionPlan, RANGES, REPEAT_ROWS,
    RangeField, RowGroup,
};
use crate::error::Result;

/// One extracted record of a repeated row group.
pub type Record = IndexMap<String, Value>;

/// The result of a run, in schema declaration order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Extraction {
    pub cells: IndexMap<String, Scalar>,
    pub ranges: IndexMap<String, Vec<Scalar>>,
    #[serde(rename = "repeatRows")]
    pub repeat_rows: Vec<Record>,
}

/// Runner stages.
pub mod stage {
    pub struct Idle;
    pub struct CellsDone;
    pub struct RangesDone;
    pub struct Done;
}

pub struct SchemaRunner<'g, S> {
    grid: &'g dyn Grid,
    symbols: SymbolTable,
    output: Extraction,
    _stage: PhantomData<S>,
}

impl<'g, S> SchemaRunner<'g, S> {
    fn advance<T>(self) -> SchemaRunner<'g, T> {
        SchemaRunner {
            grid: self.grid,
            symbols: self.symbols,
            output: self.output,
            _stage: PhantomData,
        }
    }

    /// Values produced so far, available to length lookups.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }
}

impl<'g> SchemaRunner<'g, stage::Idle> {
    pub fn new(grid: &'g dyn Grid) -> Self {
        SchemaRunner {
            grid,
            symbols: SymbolTable::new(),
            output: Extraction::default(),
            _stage: PhantomData,
        }
    }

    pub fn cells(mut self, fields: &[CellField]) -> Result<SchemaRunner<'g, stage::CellsDone>> {
        log::debug!("extracting {} cells", fields.len());
        for field in fields {
            let value = extract_cell(self.grid, field.cell, None)
                .map_err(|e| e.in_entry(CELLS, &field.name))?;
            self.symbols.insert(&field.name, Value::Scalar(value.clone()));
            self.output.cells.insert(field.name.clone(), value);
        }
        Ok(self.advance())
    }
}

impl<'g> SchemaRunner<'g, stage::CellsDone> {
    /// Ranges may take their length from any cell or from an earlier range.
    pub fn ranges(mut self, fields: &[RangeField]) -> Result<SchemaRunner<'g, stage::RangesDone>> {
        log::debug!("extracting {} ranges", fields.len());
        for field in fields {
            let values = self
                .extract_range_field(field)
                .map_err(|e| e.in_entry(RANGES, &field.name))?;
            self.symbols.insert(&field.name, Value::List(values.clone()));
            self.output.ranges.insert(field.name.clone(), values);
        }
        Ok(self.advance())
    }

    fn extract_range_field(&self, field: &RangeField) -> Result<Vec<Scalar>> {
        let values = extract_range(self.grid, field.range, None)?;
        match &field.length {
            Some(length) => Ok(truncate(values, length.resolve(&self.symbols)?)),
            None => Ok(values),
        }
    }
}

impl<'g> SchemaRunner<'g, stage::RangesDone> {
    /// Repeat groups read the symbol table but never add to it, so a
    /// component cannot reference another component.
    pub fn repeat_rows(mut self, groups: &[RowGroup]) -> Result<SchemaRunner<'g, stage::Done>> {
        for (index, group) in groups.iter().enumerate() {
            let records = extract_group(self.grid, group, &self.symbols)
                .map_err(|e| e.in_entry(REPEAT_ROWS, group.label(index)))?;
            log::debug!("repeat group {}: {} records", group.label(index), records.len());
            self.output.repeat_rows.extend(records);
        }
        Ok(self.advance())
    }
}

impl SchemaRunner<'_, stage::Done> {
    pub fn finish(self) -> Extraction {
        self.output
    }
}

fn extract_group(grid: &dyn Grid, group: &RowGroup, symbols: &SymbolTable) -> Result<Vec<Record>> {
    // Lengths do not depend on the row, so resolve them once per group.
    let lengths = group
        .components
        .iter()
        .map(|field| match &field.length {
            Some(length) => length
                .resolve(symbols)
                .map(Some)
                .map_err(|e| e.in_entry(COMPONENTS, &field.name)),
            None => Ok(None),
        })
        .collect::<Result<Vec<_>>>()?;

    group
        .span
        .rows(grid.row_count())
        .map(|row| {
            group
                .components
                .iter()
                .zip(&lengths)
                .map(|(field, length)| {
                    let value = extract_component(grid, field, *length, row)
                        .map_err(|e| e.in_entry(COMPONENTS, &field.name))?;
                    Ok((field.name.clone(), value))
                })
                .collect::<Result<Record>>()
        })
        .collect()
}

fn extract_component(
    grid: &dyn Grid,
    field: &ComponentField,
    length: Option<i64>,
    row: usize,
) -> Result<Value> {
    match field.component {
        Component::Cell(cell) => extract_cell(grid, cell, Some(row)).map(Value::Scalar),
        Component::Range(range) => {
            let values = extract_range(grid, range, Some(row))?;
            Ok(Value::List(match length {
                Some(length) => truncate(values, length),
                None => values,
            }))
        }
    }
}

/// Run a compiled plan against a grid.
pub fn run(grid: &dyn Grid, plan: &ExtractionPlan) -> Result<Extraction> {
    Ok(SchemaRunner::new(grid)
        .cells(&plan.cells)?
        .ranges(&plan.ranges)?
        .repeat_rows(&plan.groups)?
        .finish())
}
