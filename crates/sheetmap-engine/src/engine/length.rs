//! Length specs: literal or symbolic truncation bounds for extracted lists.
//!
//! A symbolic length names a value produced earlier in the same run
//! (`"@count"`, or just `"count"`). The [`SymbolTable`] holds everything
//! produced so far, in production order.

use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;

use super::extract::Value;
use super::grid::Scalar;
use crate::error::{ExtractError, Result};

/// Marker prefix for symbolic lengths.
pub const SYMBOL_MARKER: char = '@';

#[derive(Clone, Debug, Hash, Eq, PartialEq, Deserialize)]
#[serde(from = "RawLength")]
pub enum LengthSpec {
    Literal(i64),
    Symbol(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLength {
    Literal(i64),
    Symbol(String),
}

impl From<RawLength> for LengthSpec {
    fn from(raw: RawLength) -> Self {
        match raw {
            RawLength::Literal(n) => LengthSpec::Literal(n),
            RawLength::Symbol(s) => LengthSpec::parse(&s),
        }
    }
}

impl LengthSpec {
    /// Parse a textual length. Integers are literals, anything else is a
    /// symbol with an optional leading `@`.
    pub fn parse(spec: &str) -> LengthSpec {
        let spec = spec.trim();
        if let Ok(n) = spec.parse::<i64>() {
            return LengthSpec::Literal(n);
        }
        let name = spec.strip_prefix(SYMBOL_MARKER).unwrap_or(spec);
        LengthSpec::Symbol(name.to_string())
    }

    /// Resolve to a concrete bound using values produced so far.
    pub fn resolve(&self, symbols: &SymbolTable) -> Result<i64> {
        match self {
            LengthSpec::Literal(n) => Ok(*n),
            LengthSpec::Symbol(name) => {
                let value = symbols
                    .get(name)
                    .ok_or_else(|| ExtractError::UnknownLength(name.clone()))?;
                let not_count = |found: String| ExtractError::LengthNotCount {
                    name: name.clone(),
                    found,
                };
                match value {
                    Value::Scalar(scalar) => scalar
                        .as_count()
                        .ok_or_else(|| not_count(describe(scalar))),
                    Value::List(items) => Err(not_count(format!("list of {}", items.len()))),
                }
            }
        }
    }
}

fn describe(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Blank => "blank".to_string(),
        Scalar::Text(s) => format!("text {s:?}"),
        other => format!("{} {other}", other.type_name()),
    }
}

impl fmt::Display for LengthSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthSpec::Literal(n) => write!(f, "{n}"),
            LengthSpec::Symbol(name) => write!(f, "{SYMBOL_MARKER}{name}"),
        }
    }
}

/// Ordered name → value table of results produced so far.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SymbolTable {
    values: IndexMap<String, Value>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    /// Record a produced value. A later entry with the same name shadows the earlier one.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

/// Apply a resolved length to an extracted list.
///
/// A non-negative length keeps at most that many leading items; a negative
/// length drops that many items from the tail.
pub fn truncate<T>(mut values: Vec<T>, length: i64) -> Vec<T> {
    let keep = if length >= 0 {
        usize::try_from(length).unwrap_or(usize::MAX).min(values.len())
    } else {
        let drop = usize::try_from(length.unsigned_abs()).unwrap_or(usize::MAX);
        values.len().saturating_sub(drop)
    };
    values.truncate(keep);
    values
}
