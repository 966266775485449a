//! Canonical value tree produced by normalization.
//!
//! A [`Value`] is either a typed [`Scalar`], a positionally dense
//! [`Value::List`], or a keyed [`Value::Map`]. The shape is fixed when the
//! tree is built and never reinterpreted during matching.

use std::collections::BTreeMap;

/// A typed primitive leaf.
///
/// Equality is strict: values of different variants are never equal, so
/// `String("0")` does not equal `Int(0)` and `Int(1)` does not equal
/// `Float(1.0)`. Floats use IEEE equality, so `NaN` never equals itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// Returns a human-readable type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::String(_) => "string",
        }
    }

    /// Converts a JSON number, keeping integers integral where they fit in `i64`.
    pub(crate) fn from_number(n: &serde_json::Number) -> Scalar {
        if let Some(i) = n.as_i64() {
            Scalar::Int(i)
        } else {
            // u64 beyond i64::MAX and genuine floats both land here
            Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Scalar::Null => serde_json::Value::Null,
            Scalar::Bool(b) => serde_json::Value::Bool(*b),
            Scalar::Int(i) => serde_json::Value::from(*i),
            Scalar::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Scalar::String(s) => serde_json::Value::String(s.clone()),
        }
    }
}

/// A normalized needle or haystack.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    /// Source keys were exactly `0, 1, ..., n-1` in that order.
    List(Vec<Value>),
    /// Any other key set. Integer keys are stored in their decimal form.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns a human-readable shape name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(s) => s.type_name(),
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// True for a `List` or `Map` with no entries.
    ///
    /// Empty collections are shape-polymorphic: they carry no element or key
    /// constraint, so the matcher treats them as compatible with anything.
    pub fn is_empty_collection(&self) -> bool {
        match self {
            Value::List(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            Value::Scalar(_) => false,
        }
    }

    /// Renders the tree back to JSON, for failure context and CLI output.
    ///
    /// Non-finite floats have no JSON form and render as `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Scalar(s) => s.to_json(),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}
