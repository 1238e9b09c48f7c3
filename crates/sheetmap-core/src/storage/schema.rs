//! Mapping schema loading (JSON).

use sheetmap_engine::MappingSchema;
use std::path::Path;

use super::read_capped;
use crate::error::{Result, SheetmapError};

/// Load and deserialize a mapping schema file.
pub fn load_schema(path: &Path, max_bytes: u64) -> Result<MappingSchema> {
    let content = read_capped(path, max_bytes)?;
    parse_schema(&content).map_err(|source| SheetmapError::Schema {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_schema(content: &str) -> std::result::Result<MappingSchema, serde_json::Error> {
    serde_json::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schema() {
        let schema = parse_schema(
            r#"{
                "cells": {"title": "A1"},
                "ranges": {"row": "A2:C2"},
                "repeatRows": [{"range": "3:", "components": {"a": "A1"}}]
            }"#,
        )
        .unwrap();
        assert_eq!(schema.cells["title"], "A1");
        assert_eq!(schema.repeat_rows[0].range, "3:");
    }

    #[test]
    fn test_load_schema_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.json");
        std::fs::write(&path, r#"{"cells": ["A1"]}"#).unwrap();

        let err = load_schema(&path, 1024).unwrap_err();
        assert!(matches!(err, SheetmapError::Schema { .. }));
        assert!(err.to_string().contains("mapping.json"));
    }
}
