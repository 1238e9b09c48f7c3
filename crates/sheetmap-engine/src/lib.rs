//! sheetmap_engine - Cell/range notation and mapping-schema extraction.
//!
//! Pure and synchronous: `(Grid, MappingSchema) -> Extraction`. Loading grids
//! and schemas from files lives in `sheetmap-core`.

pub mod engine;
pub mod error;

pub use engine::{Extraction, MappingSchema, Scalar, Sheet, run};
pub use error::{ExtractError, Result};

/// Compile `schema` and run it against `grid`.
pub fn extract(grid: &dyn engine::Grid, schema: &MappingSchema) -> Result<Extraction> {
    run(grid, &schema.compile()?)
}
