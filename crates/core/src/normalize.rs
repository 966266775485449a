//! Raw input to canonical [`Value`] trees.
//!
//! Shape is decided here, once: an enumeration whose keys are exactly
//! `0, 1, ..., n-1` in encounter order becomes a `List`, anything else a
//! `Map`. Only the top-level input may be JSON text; nested strings are
//! string scalars.

use std::collections::BTreeMap;

use crate::error::{Role, SubsetError};
use crate::raw::{Key, Raw};
use crate::value::{Scalar, Value};

/// Normalize a raw needle or haystack.
///
/// `role` only labels the error when a string input fails to decode to a
/// JSON array or object.
pub fn normalize(raw: impl Into<Raw>, role: Role) -> Result<Value, SubsetError> {
    match raw.into() {
        Raw::Scalar(Scalar::String(text)) => decode_json(&text, role),
        other => Ok(build(other)),
    }
}

fn decode_json(text: &str, role: Role) -> Result<Value, SubsetError> {
    let decoded: serde_json::Value = serde_json::from_str(text).map_err(|e| {
        tracing::debug!(%role, error = %e, "string input is not valid JSON");
        SubsetError::MalformedJson { role }
    })?;

    match decoded {
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            Ok(build(Raw::from(decoded)))
        }
        scalar => {
            tracing::debug!(%role, decoded = %scalar, "string input decodes to a bare scalar");
            Err(SubsetError::MalformedJson { role })
        }
    }
}

fn build(raw: Raw) -> Value {
    match raw {
        Raw::Scalar(s) => Value::Scalar(s),
        Raw::Canonical(v) => v,
        Raw::Entries(pairs) => build_collection(pairs),
    }
}

fn build_collection(pairs: Vec<(Key, Raw)>) -> Value {
    if is_list_keys(&pairs) {
        return Value::List(pairs.into_iter().map(|(_, v)| build(v)).collect());
    }

    // Repeated keys: the last occurrence wins.
    let mut entries = BTreeMap::new();
    for (key, v) in pairs {
        entries.insert(key.into_map_key(), build(v));
    }
    Value::Map(entries)
}

fn is_list_keys(pairs: &[(Key, Raw)]) -> bool {
    pairs.iter().enumerate().all(|(position, (key, _))| match key {
        Key::Index(i) => usize::try_from(*i).is_ok_and(|i| i == position),
        Key::Name(_) => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn int(i: i64) -> Value {
        Value::Scalar(Scalar::Int(i))
    }

    fn string(s: &str) -> Value {
        Value::Scalar(Scalar::String(s.to_string()))
    }

    #[test]
    fn contiguous_indices_make_a_list() {
        let v = normalize(vec![1i64, 2, 3], Role::Needle).unwrap();
        assert_eq!(v, Value::List(vec![int(1), int(2), int(3)]));
    }

    #[test]
    fn out_of_order_indices_make_a_map() {
        let raw = Raw::entries([(1i64, "b"), (0i64, "a")]);
        let v = normalize(raw, Role::Needle).unwrap();
        let mut expected = BTreeMap::new();
        expected.insert("0".to_string(), string("a"));
        expected.insert("1".to_string(), string("b"));
        assert_eq!(v, Value::Map(expected));
    }

    #[test]
    fn sparse_indices_make_a_map() {
        let raw = Raw::entries([(0i64, "a"), (2i64, "c")]);
        assert!(matches!(normalize(raw, Role::Needle).unwrap(), Value::Map(_)));
    }

    #[test]
    fn json_object_with_integer_keys_is_a_list() {
        let v = normalize(r#"{"0":"a","1":"b"}"#, Role::Haystack).unwrap();
        assert_eq!(v, Value::List(vec![string("a"), string("b")]));
    }

    #[test]
    fn json_object_with_integer_keys_out_of_order_is_a_map() {
        let v = normalize(r#"{"1":"b","0":"a"}"#, Role::Needle).unwrap();
        let mut expected = BTreeMap::new();
        expected.insert("0".to_string(), string("a"));
        expected.insert("1".to_string(), string("b"));
        assert_eq!(v, Value::Map(expected));
    }

    #[test]
    fn json_object_with_eleven_ordered_integer_keys_is_a_list() {
        let text = format!(
            "{{{}}}",
            (0..=10)
                .map(|i| format!("\"{}\":{}", i, i))
                .collect::<Vec<_>>()
                .join(",")
        );
        let v = normalize(text.as_str(), Role::Needle).unwrap();
        assert_eq!(v, Value::List((0..=10).map(int).collect()));
    }

    #[test]
    fn empty_enumeration_is_an_empty_list() {
        let v = normalize(Vec::<i64>::new(), Role::Needle).unwrap();
        assert_eq!(v, Value::List(vec![]));
        let v = normalize("{}", Role::Needle).unwrap();
        assert!(v.is_empty_collection());
    }

    #[test]
    fn repeated_keys_keep_last_value() {
        let raw = Raw::entries([("a", 1i64), ("a", 2i64)]);
        let v = normalize(raw, Role::Needle).unwrap();
        let mut expected = BTreeMap::new();
        expected.insert("a".to_string(), int(2));
        assert_eq!(v, Value::Map(expected));
    }

    #[test]
    fn json_string_is_decoded() {
        let v = normalize(r#"{"foo":"bar"}"#, Role::Needle).unwrap();
        let mut expected = BTreeMap::new();
        expected.insert("foo".to_string(), string("bar"));
        assert_eq!(v, Value::Map(expected));
    }

    #[test]
    fn nested_strings_are_not_decoded() {
        let v = normalize(json!({"inner": "[1, 2]"}), Role::Needle).unwrap();
        let mut expected = BTreeMap::new();
        expected.insert("inner".to_string(), string("[1, 2]"));
        assert_eq!(v, Value::Map(expected));
    }

    #[test]
    fn numeric_looking_strings_stay_strings() {
        let v = normalize(json!(["0", 0]), Role::Needle).unwrap();
        assert_eq!(v, Value::List(vec![string("0"), int(0)]));
    }

    #[test]
    fn invalid_json_is_rejected_with_role() {
        let err = normalize("invalid json", Role::Needle).unwrap_err();
        assert_eq!(err, SubsetError::MalformedJson { role: Role::Needle });
        let err = normalize("", Role::Haystack).unwrap_err();
        assert_eq!(
            err,
            SubsetError::MalformedJson {
                role: Role::Haystack
            }
        );
    }

    #[test]
    fn bare_json_scalars_are_rejected() {
        for text in ["1", "\"foo\"", "null", "true"] {
            assert!(normalize(text, Role::Needle).is_err(), "{text}");
        }
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(normalize("[1] x", Role::Needle).is_err());
    }

    #[test]
    fn non_string_scalars_pass_through() {
        assert_eq!(normalize(5i64, Role::Needle).unwrap(), int(5));
    }

    #[test]
    fn renormalizing_is_a_no_op() {
        let first = normalize(r#"{"1":"b","0":"a","list":[{"x":null}]}"#, Role::Needle).unwrap();
        let second = normalize(first.clone(), Role::Needle).unwrap();
        assert_eq!(first, second);
    }
}
