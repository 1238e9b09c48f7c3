//! Mapping schema model and its compilation into an [`ExtractionPlan`].
//!
//! The schema is the deserialized mapping document:
//!
//! ```json
//! {
//!   "cells": { "title": "B1" },
//!   "ranges": { "totals": "B4:F4", "codes": { "range": "A6:A40", "length": "@count" } },
//!   "repeatRows": [
//!     { "range": "10:", "components": { "sku": "A1", "sizes": { "column": "C1:H1", "length": 4 } } }
//!   ]
//! }
//! ```
//!
//! Compilation resolves every notation once, so the runner only deals with
//! coordinates. `rows` is accepted for `ranges` and `area` for `repeatRows`.

use indexmap::IndexMap;
use serde::Deserialize;

use super::cell_ref::CellRef;
use super::length::LengthSpec;
use super::range::CellRange;
use super::row_span::RowSpan;
use crate::error::Result;

pub const CELLS: &str = "cells";
pub const RANGES: &str = "ranges";
pub const REPEAT_ROWS: &str = "repeatRows";
pub const COMPONENTS: &str = "components";

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingSchema {
    #[serde(default)]
    pub cells: IndexMap<String, String>,
    #[serde(default, alias = "rows")]
    pub ranges: IndexMap<String, RangeEntry>,
    #[serde(default, rename = "repeatRows", alias = "area")]
    pub repeat_rows: Vec<RepeatGroup>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RangeEntry {
    Notation(String),
    Detailed(DetailedRange),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedRange {
    pub range: String,
    #[serde(default)]
    pub length: Option<LengthSpec>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepeatGroup {
    #[serde(default)]
    pub name: Option<String>,
    pub range: String,
    pub components: IndexMap<String, ComponentEntry>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ComponentEntry {
    Notation(String),
    Detailed(DetailedComponent),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedComponent {
    #[serde(alias = "range")]
    pub column: String,
    #[serde(default)]
    pub length: Option<LengthSpec>,
}

/// A compiled `cells` entry.
#[derive(Clone, Debug, PartialEq)]
pub struct CellField {
    pub name: String,
    pub cell: CellRef,
}

/// A compiled `ranges` entry.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeField {
    pub name: String,
    pub range: CellRange,
    pub length: Option<LengthSpec>,
}

/// Where a repeated-row component reads from. Only the columns are used;
/// the row comes from the group's span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Component {
    Cell(CellRef),
    Range(CellRange),
}

impl Component {
    pub fn parse(notation: &str) -> Result<Component> {
        if CellRange::is_range_notation(notation) {
            CellRange::parse(notation).map(Component::Range)
        } else {
            CellRef::parse(notation).map(Component::Cell)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComponentField {
    pub name: String,
    pub component: Component,
    pub length: Option<LengthSpec>,
}

/// A compiled `repeatRows` group.
#[derive(Clone, Debug, PartialEq)]
pub struct RowGroup {
    pub name: Option<String>,
    pub span: RowSpan,
    pub components: Vec<ComponentField>,
}

impl RowGroup {
    /// Name used in errors and logs: the group's name, or its position.
    pub fn label(&self, index: usize) -> String {
        group_label(self.name.as_deref(), index)
    }
}

fn group_label(name: Option<&str>, index: usize) -> String {
    name.map_or_else(|| format!("#{index}"), str::to_string)
}

/// A schema with every notation resolved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractionPlan {
    pub cells: Vec<CellField>,
    pub ranges: Vec<RangeField>,
    pub groups: Vec<RowGroup>,
}

impl MappingSchema {
    pub fn compile(&self) -> Result<ExtractionPlan> {
        let cells = self
            .cells
            .iter()
            .map(|(name, notation)| {
                let cell = CellRef::parse(notation).map_err(|e| e.in_entry(CELLS, name))?;
                Ok(CellField { name: name.clone(), cell })
            })
            .collect::<Result<Vec<_>>>()?;

        let ranges = self
            .ranges
            .iter()
            .map(|(name, entry)| {
                let (notation, length) = match entry {
                    RangeEntry::Notation(notation) => (notation, None),
                    RangeEntry::Detailed(detailed) => (&detailed.range, detailed.length.clone()),
                };
                let range = CellRange::parse(notation).map_err(|e| e.in_entry(RANGES, name))?;
                Ok(RangeField { name: name.clone(), range, length })
            })
            .collect::<Result<Vec<_>>>()?;

        let groups = self
            .repeat_rows
            .iter()
            .enumerate()
            .map(|(index, group)| {
                let label = group_label(group.name.as_deref(), index);
                compile_group(group, &label).map_err(|e| e.in_entry(REPEAT_ROWS, label))
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "compiled schema: {} cells, {} ranges, {} repeat groups",
            cells.len(),
            ranges.len(),
            groups.len()
        );
        Ok(ExtractionPlan { cells, ranges, groups })
    }
}

fn compile_group(group: &RepeatGroup, label: &str) -> Result<RowGroup> {
    let span = RowSpan::parse(&group.range)?;

    let components = group
        .components
        .iter()
        .map(|(name, entry)| {
            let (notation, length) = match entry {
                ComponentEntry::Notation(notation) => (notation, None),
                ComponentEntry::Detailed(detailed) => (&detailed.column, detailed.length.clone()),
            };
            let component = Component::parse(notation).map_err(|e| e.in_entry(COMPONENTS, name))?;
            let length = match (component, length) {
                (Component::Cell(_), Some(length)) => {
                    log::warn!(
                        "{REPEAT_ROWS}.{label}.{name}: length {length} ignored on single-cell component"
                    );
                    None
                }
                (_, length) => length,
            };
            Ok(ComponentField { name: name.clone(), component, length })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RowGroup { name: group.name.clone(), span, components })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;
    use crate::engine::range::Interval;
    use pretty_assertions::assert_eq;

    fn schema(json: &str) -> MappingSchema {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_sections_default_to_empty() {
        let plan = schema("{}").compile().unwrap();
        assert_eq!(plan, ExtractionPlan::default());
    }

    #[test]
    fn test_compile_preserves_declaration_order() {
        let plan = schema(r#"{"cells": {"z": "A1", "a": "B2", "m": "C3"}}"#)
            .compile()
            .unwrap();
        let names: Vec<_> = plan.cells.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
        assert_eq!(plan.cells[1].cell, CellRef::new(1, 1));
    }

    #[test]
    fn test_range_entry_forms() {
        let plan = schema(
            r#"{"ranges": {"plain": "A1:B1", "cut": {"range": "A2:A9", "length": "@n"}}}"#,
        )
        .compile()
        .unwrap();
        assert_eq!(plan.ranges[0].length, None);
        assert_eq!(plan.ranges[1].range.rows, Interval::new(1, 9));
        assert_eq!(plan.ranges[1].length, Some(LengthSpec::Symbol("n".into())));
    }

    #[test]
    fn test_section_aliases() {
        let parsed = schema(
            r#"{"rows": {"r": "A1:B1"}, "area": [{"range": "2:", "components": {"a": "A1"}}]}"#,
        );
        assert_eq!(parsed.ranges.len(), 1);
        assert_eq!(parsed.repeat_rows.len(), 1);
    }

    #[test]
    fn test_unknown_section_rejected() {
        let parsed: std::result::Result<MappingSchema, _> =
            serde_json::from_str(r#"{"cels": {"x": "A1"}}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_components_are_tagged_once() {
        let plan = schema(
            r#"{"repeatRows": [{"name": "items", "range": "2:4", "components": {
                "sku": "A1",
                "sizes": "B1:D1",
                "first": {"column": "B1:D1", "length": 2}
            }}]}"#,
        )
        .compile()
        .unwrap();
        let group = &plan.groups[0];
        assert_eq!(group.span, RowSpan::new(1, Some(4)));
        assert_eq!(group.components[0].component, Component::Cell(CellRef::new(0, 0)));
        assert!(matches!(group.components[1].component, Component::Range(_)));
        assert_eq!(group.components[2].length, Some(LengthSpec::Literal(2)));
    }

    #[test]
    fn test_length_on_cell_component_is_dropped() {
        let plan = schema(
            r#"{"repeatRows": [{"range": ":", "components": {"a": {"column": "A1", "length": 3}}}]}"#,
        )
        .compile()
        .unwrap();
        assert_eq!(plan.groups[0].components[0].length, None);
    }

    #[test]
    fn test_errors_name_the_entry() {
        let err = schema(r#"{"cells": {"total": "12"}}"#).compile().unwrap_err();
        assert_eq!(err, ExtractError::MalformedAddress("12".into()).in_entry(CELLS, "total"));

        let err = schema(r#"{"ranges": {"r": "A1:B2:C3"}}"#).compile().unwrap_err();
        assert_eq!(err.root(), &ExtractError::MalformedRange("A1:B2:C3".into()));

        let err = schema(r#"{"repeatRows": [{"range": "1-5", "components": {"a": "A1"}}]}"#)
            .compile()
            .unwrap_err();
        assert_eq!(err.to_string(), "repeatRows.#0: Malformed row range: \"1-5\"");

        let err = schema(
            r#"{"repeatRows": [{"name": "lines", "range": "1:", "components": {"bad": "A1:"}}]}"#,
        )
        .compile()
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "repeatRows.lines: components.bad: Malformed range: \"A1:\""
        );
    }
}
