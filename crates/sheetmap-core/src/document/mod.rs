//! A report: one loaded grid paired with a compiled mapping.

use sheetmap_engine::engine::{ExtractionPlan, MappingSchema, Sheet};
use sheetmap_engine::{Extraction, run};
use std::path::Path;

use crate::error::Result;
use crate::storage::{LoadOptions, load_schema, load_sheet};

#[derive(Clone, Debug)]
pub struct Report {
    pub sheet: Sheet,
    pub plan: ExtractionPlan,
}

impl Report {
    /// Compile `schema` for use against `sheet`. Notation errors surface here,
    /// before any cell is read.
    pub fn new(sheet: Sheet, schema: &MappingSchema) -> Result<Report> {
        let plan = schema.compile()?;
        Ok(Report { sheet, plan })
    }

    /// Load the schema first, then the grid.
    pub fn open(grid_path: &Path, schema_path: &Path, options: &LoadOptions) -> Result<Report> {
        let schema = load_schema(schema_path, options.max_file_bytes)?;
        let plan = schema.compile()?;
        let sheet = load_sheet(grid_path, options)?;
        Ok(Report { sheet, plan })
    }

    pub fn extract(&self) -> Result<Extraction> {
        Ok(run(&self.sheet, &self.plan)?)
    }
}
