//! Raw needle/haystack input, before normalization.
//!
//! Every structured input reaches the normalizer through one capability: a
//! finite sequence of `(Key, Raw)` pairs, built with [`Raw::entries`]. The
//! `From` impls below are thin adapters onto that constructor for the native
//! collections and for `serde_json::Value`.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::value::{Scalar, Value};

/// A key as enumerated from the source structure.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Index(i64),
    Name(String),
}

impl Key {
    /// Builds a key from a name, collapsing canonical decimal integers
    /// (`"0"`, `"42"`, `"-7"`) to [`Key::Index`]. Names like `"01"`, `"+1"` or
    /// `"-0"` stay as names.
    pub fn from_name(name: impl Into<String>) -> Key {
        let name = name.into();
        match canonical_index(&name) {
            Some(i) => Key::Index(i),
            None => Key::Name(name),
        }
    }

    /// The string form used for `Value::Map` keys.
    pub fn into_map_key(self) -> String {
        match self {
            Key::Index(i) => i.to_string(),
            Key::Name(name) => name,
        }
    }
}

fn canonical_index(name: &str) -> Option<i64> {
    let digits = name.strip_prefix('-').unwrap_or(name);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if (digits.len() > 1 && digits.starts_with('0')) || name == "-0" {
        return None;
    }
    name.parse::<i64>().ok()
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Index(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Index(i64::from(i))
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        match i64::try_from(i) {
            Ok(i) => Key::Index(i),
            Err(_) => Key::Name(i.to_string()),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::from_name(name)
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::from_name(name)
    }
}

/// Raw input to the normalizer.
///
/// A top-level `Scalar(Scalar::String(_))` is JSON text and is decoded by the
/// normalizer; nested strings are plain string scalars. `Canonical` wraps an
/// already-normalized tree and passes through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Raw {
    Scalar(Scalar),
    Entries(Vec<(Key, Raw)>),
    Canonical(Value),
}

impl Raw {
    /// Eagerly collects a finite key-value enumeration.
    ///
    /// Encounter order is kept; it decides whether the normalizer produces a
    /// list or a map.
    pub fn entries<I, K, V>(pairs: I) -> Raw
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Raw>,
    {
        Raw::Entries(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// JSON text, decoded when passed directly to the facade.
    pub fn json(text: impl Into<String>) -> Raw {
        Raw::Scalar(Scalar::String(text.into()))
    }
}

impl From<Scalar> for Raw {
    fn from(s: Scalar) -> Self {
        Raw::Scalar(s)
    }
}

impl From<Value> for Raw {
    fn from(v: Value) -> Self {
        Raw::Canonical(v)
    }
}

impl From<bool> for Raw {
    fn from(b: bool) -> Self {
        Raw::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for Raw {
    fn from(i: i64) -> Self {
        Raw::Scalar(Scalar::Int(i))
    }
}

impl From<i32> for Raw {
    fn from(i: i32) -> Self {
        Raw::Scalar(Scalar::Int(i64::from(i)))
    }
}

impl From<u64> for Raw {
    fn from(u: u64) -> Self {
        Raw::Scalar(Scalar::from_number(&serde_json::Number::from(u)))
    }
}

impl From<f64> for Raw {
    fn from(f: f64) -> Self {
        Raw::Scalar(Scalar::Float(f))
    }
}

impl From<&str> for Raw {
    fn from(s: &str) -> Self {
        Raw::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for Raw {
    fn from(s: String) -> Self {
        Raw::Scalar(Scalar::String(s))
    }
}

impl<T: Into<Raw>> From<Option<T>> for Raw {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Raw::Scalar(Scalar::Null),
        }
    }
}

impl<T: Into<Raw>> From<Vec<T>> for Raw {
    fn from(items: Vec<T>) -> Self {
        Raw::entries(items.into_iter().enumerate())
    }
}

impl<T: Into<Raw>, const N: usize> From<[T; N]> for Raw {
    fn from(items: [T; N]) -> Self {
        Raw::entries(items.into_iter().enumerate())
    }
}

impl<K: Into<Key>, V: Into<Raw>> From<BTreeMap<K, V>> for Raw {
    fn from(map: BTreeMap<K, V>) -> Self {
        Raw::entries(map)
    }
}

/// Hash maps have no stable iteration order, so entries are sorted by key
/// (integer keys ascending, then names) to keep normalization deterministic.
impl<K, V, S> From<HashMap<K, V, S>> for Raw
where
    K: Into<Key>,
    V: Into<Raw>,
    S: BuildHasher,
{
    fn from(map: HashMap<K, V, S>) -> Self {
        let mut pairs: Vec<(Key, Raw)> =
            map.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        Raw::Entries(pairs)
    }
}

impl From<serde_json::Value> for Raw {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Raw::Scalar(Scalar::Null),
            serde_json::Value::Bool(b) => Raw::Scalar(Scalar::Bool(b)),
            serde_json::Value::Number(n) => Raw::Scalar(Scalar::from_number(&n)),
            serde_json::Value::String(s) => Raw::Scalar(Scalar::String(s)),
            serde_json::Value::Array(items) => Raw::from(items),
            // `preserve_order` keeps keys in document order
            serde_json::Value::Object(obj) => Raw::entries(obj),
        }
    }
}

impl From<&serde_json::Value> for Raw {
    fn from(v: &serde_json::Value) -> Self {
        Raw::from(v.clone())
    }
}
