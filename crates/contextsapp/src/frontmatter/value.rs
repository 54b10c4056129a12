//! Frontmatter value types and their string coercion.
//!
//! YAML frontmatter is loosely typed: the same key can hold a number in one
//! note and a string in the next. [`FrontmatterValue`] captures every shape a
//! value can take, and [`FrontmatterValue::coerce_to_string`] is the single
//! rule used when a filter needs to compare a stored value against text.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Runtime representation of a frontmatter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontmatterValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<FrontmatterValue>),
    Mapping(BTreeMap<String, FrontmatterValue>),
}

impl FrontmatterValue {
    /// Get the string if this is a String.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FrontmatterValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the items if this is a Sequence.
    pub fn as_sequence(&self) -> Option<&[FrontmatterValue]> {
        match self {
            FrontmatterValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FrontmatterValue::Null)
    }

    /// Render the value as text for equality checks.
    ///
    /// - Null: `"null"`
    /// - Bool: `"true"` / `"false"`
    /// - Integer: decimal digits
    /// - Float: shortest round-trip form; `1.0` is `"1"`, magnitudes outside
    ///   `[1e-6, 1e21)` use exponent form (`"1e+21"`), plus `"NaN"`,
    ///   `"Infinity"` and `"-Infinity"`
    /// - String: unchanged
    /// - Sequence: items joined with `,`, null items rendered empty
    /// - Mapping: `"[object Object]"`
    pub fn coerce_to_string(&self) -> String {
        match self {
            FrontmatterValue::Null => "null".to_string(),
            FrontmatterValue::Bool(b) => b.to_string(),
            FrontmatterValue::Integer(i) => i.to_string(),
            FrontmatterValue::Float(f) => format_float(*f),
            FrontmatterValue::String(s) => s.clone(),
            FrontmatterValue::Sequence(items) => items
                .iter()
                .map(|item| match item {
                    FrontmatterValue::Null => String::new(),
                    other => other.coerce_to_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            FrontmatterValue::Mapping(_) => "[object Object]".to_string(),
        }
    }
}

fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // Covers -0.0 as well
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let scientific = format!("{:e}", value);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => scientific,
    }
}

impl From<serde_yaml::Value> for FrontmatterValue {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => FrontmatterValue::Null,
            Value::Bool(b) => FrontmatterValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FrontmatterValue::Integer(i),
                None => FrontmatterValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => FrontmatterValue::String(s),
            Value::Sequence(items) => {
                FrontmatterValue::Sequence(items.into_iter().map(Into::into).collect())
            }
            Value::Mapping(map) => FrontmatterValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (mapping_key(k), v.into()))
                    .collect(),
            ),
            Value::Tagged(tagged) => tagged.value.into(),
        }
    }
}

/// YAML allows non-string keys (`1: one`); they are keyed by their text form.
pub(crate) fn mapping_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        other => FrontmatterValue::from(other).coerce_to_string(),
    }
}

impl From<&str> for FrontmatterValue {
    fn from(value: &str) -> Self {
        FrontmatterValue::String(value.to_string())
    }
}

impl From<String> for FrontmatterValue {
    fn from(value: String) -> Self {
        FrontmatterValue::String(value)
    }
}

impl From<bool> for FrontmatterValue {
    fn from(value: bool) -> Self {
        FrontmatterValue::Bool(value)
    }
}

impl From<i64> for FrontmatterValue {
    fn from(value: i64) -> Self {
        FrontmatterValue::Integer(value)
    }
}

impl From<f64> for FrontmatterValue {
    fn from(value: f64) -> Self {
        FrontmatterValue::Float(value)
    }
}

impl<T: Into<FrontmatterValue>> From<Vec<T>> for FrontmatterValue {
    fn from(items: Vec<T>) -> Self {
        FrontmatterValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}
