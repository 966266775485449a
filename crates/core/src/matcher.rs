//! The recursive subset relation between two canonical values.
//!
//! Rules, first match wins:
//! 1. an empty needle collection matches anything;
//! 2. scalars match on strict type-and-value equality;
//! 3. maps match when every needle key is present in the haystack and its
//!    value matches recursively (extra haystack keys are ignored);
//! 4. lists match when needle elements can be assigned to distinct haystack
//!    elements, in any order;
//! 5. every other pairing is a shape mismatch.
//!
//! Inputs are assumed acyclic; recursion depth follows nesting depth.

use std::fmt;

use crate::bipartite;
use crate::value::{Scalar, Value};

/// True iff `needle` is a subset of `haystack`.
pub fn matches(needle: &Value, haystack: &Value) -> bool {
    if needle.is_empty_collection() {
        return true;
    }

    match (needle, haystack) {
        (Value::Scalar(a), Value::Scalar(b)) => a == b,
        (Value::Map(wanted), Value::Map(present)) => wanted
            .iter()
            .all(|(key, v)| present.get(key).is_some_and(|found| matches(v, found))),
        (Value::List(wanted), Value::List(present)) => list_matches(wanted, present),
        _ => false,
    }
}

fn list_matches(wanted: &[Value], present: &[Value]) -> bool {
    let found = bipartite::has_total_matching(wanted.len(), present.len(), |i, j| {
        matches(&wanted[i], &present[j])
    });
    if !found {
        tracing::trace!(
            needle_len = wanted.len(),
            haystack_len = present.len(),
            "no injective assignment for list elements"
        );
    }
    found
}

// ── Diagnostics ─────────────────────────────────────────────────────

/// Where and why a needle failed to match.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    /// JSONPath-like location in the needle, e.g. `$.users[0].name`.
    pub path: String,
    pub kind: MismatchKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MismatchKind {
    /// The haystack map has no entry for this key.
    MissingKey,
    ScalarDiffers { needle: Scalar, haystack: Scalar },
    ShapeDiffers {
        needle: &'static str,
        haystack: &'static str,
    },
    /// The needle list has more elements than the haystack list.
    ListTooShort { needle: usize, haystack: usize },
    /// This needle element matches no haystack element at all.
    NoCandidate,
    /// Each element has candidates, but not enough distinct ones.
    NoDistinctAssignment,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MismatchKind::MissingKey => write!(f, "{}: key missing from haystack", self.path),
            MismatchKind::ScalarDiffers { needle, haystack } => write!(
                f,
                "{}: expected {} {}, found {} {}",
                self.path,
                needle.type_name(),
                needle.to_json(),
                haystack.type_name(),
                haystack.to_json()
            ),
            MismatchKind::ShapeDiffers { needle, haystack } => {
                write!(f, "{}: expected {}, found {}", self.path, needle, haystack)
            }
            MismatchKind::ListTooShort { needle, haystack } => write!(
                f,
                "{}: needle list has {} elements, haystack list only {}",
                self.path, needle, haystack
            ),
            MismatchKind::NoCandidate => {
                write!(f, "{}: no haystack element matches", self.path)
            }
            MismatchKind::NoDistinctAssignment => write!(
                f,
                "{}: list elements cannot each be matched by a distinct haystack element",
                self.path
            ),
        }
    }
}

/// Locate the first reason `needle` is not a subset of `haystack`.
///
/// Returns `None` exactly when [`matches`] returns true. Map keys are visited
/// in sorted order.
pub fn find_mismatch(needle: &Value, haystack: &Value) -> Option<Mismatch> {
    let mut path = String::from("$");
    mismatch_at(needle, haystack, &mut path)
}

fn mismatch_at(needle: &Value, haystack: &Value, path: &mut String) -> Option<Mismatch> {
    if needle.is_empty_collection() {
        return None;
    }

    let kind = match (needle, haystack) {
        (Value::Scalar(a), Value::Scalar(b)) => {
            if a == b {
                return None;
            }
            MismatchKind::ScalarDiffers {
                needle: a.clone(),
                haystack: b.clone(),
            }
        }
        (Value::Map(wanted), Value::Map(present)) => {
            for (key, v) in wanted {
                let mark = path.len();
                push_key(path, key);
                let found = match present.get(key) {
                    Some(found) => mismatch_at(v, found, path),
                    None => Some(Mismatch {
                        path: path.clone(),
                        kind: MismatchKind::MissingKey,
                    }),
                };
                path.truncate(mark);
                if found.is_some() {
                    return found;
                }
            }
            return None;
        }
        (Value::List(wanted), Value::List(present)) => {
            if list_matches(wanted, present) {
                return None;
            }
            if wanted.len() > present.len() {
                MismatchKind::ListTooShort {
                    needle: wanted.len(),
                    haystack: present.len(),
                }
            } else if let Some(i) = wanted
                .iter()
                .position(|w| !present.iter().any(|p| matches(w, p)))
            {
                return Some(Mismatch {
                    path: format!("{}[{}]", path, i),
                    kind: MismatchKind::NoCandidate,
                });
            } else {
                MismatchKind::NoDistinctAssignment
            }
        }
        _ => MismatchKind::ShapeDiffers {
            needle: needle.type_name(),
            haystack: haystack.type_name(),
        },
    };

    Some(Mismatch {
        path: path.clone(),
        kind,
    })
}

/// Appends `.key`, or `["key"]` when the key is empty or has characters
/// outside `[A-Za-z0-9_-]`.
fn push_key(path: &mut String, key: &str) {
    let plain = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if plain {
        path.push('.');
        path.push_str(key);
    } else {
        path.push('[');
        path.push_str(&serde_json::Value::String(key.to_string()).to_string());
        path.push(']');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Role;
    use crate::normalize::normalize;
    use serde_json::json;

    fn value(v: serde_json::Value) -> Value {
        normalize(v, Role::Needle).unwrap()
    }

    fn subset(needle: serde_json::Value, haystack: serde_json::Value) -> bool {
        matches(&value(needle), &value(haystack))
    }

    #[test]
    fn empty_needle_matches_anything() {
        assert!(subset(json!([]), json!([])));
        assert!(subset(json!([]), json!({"foo": "bar"})));
        assert!(subset(json!({}), json!([1, 2])));
        assert!(matches(&value(json!([])), &Value::Scalar(Scalar::Int(1))));
    }

    #[test]
    fn empty_haystack_contains_nothing() {
        assert!(!subset(json!({"foo": "bar"}), json!([])));
        assert!(!subset(json!([1]), json!({})));
    }

    #[test]
    fn scalars_match_strictly() {
        assert!(subset(json!({"foo": 0}), json!({"foo": 0})));
        assert!(!subset(json!({"foo": "0"}), json!({"foo": 0})));
        assert!(!subset(json!({"foo": null}), json!({"foo": false})));
        assert!(!subset(json!({"foo": 1}), json!({"foo": 1.0})));
    }

    #[test]
    fn maps_ignore_extra_haystack_keys() {
        assert!(subset(json!({"foo": "bar"}), json!({"foo": "bar", "bar": "foo"})));
        assert!(!subset(json!({"not foo": "bar"}), json!({"foo": "bar"})));
    }

    #[test]
    fn lists_are_order_independent() {
        assert!(subset(json!([3, 1]), json!([1, 2, 3])));
    }

    #[test]
    fn lists_are_injective() {
        assert!(!subset(json!([1, 1]), json!([1, 2, 3])));
        assert!(subset(json!([1, 1]), json!([1, 2, 1])));
    }

    #[test]
    fn nested_lists_match() {
        assert!(subset(json!([1, ["b", "c"], 4]), json!([1, ["a", "b", "c"], 3, 4])));
    }

    #[test]
    fn list_and_map_never_match() {
        assert!(!subset(json!([1]), json!({"a": 1})));
        assert!(!subset(json!({"a": 1}), json!([1])));
    }

    #[test]
    fn scalar_against_collection_fails() {
        assert!(!subset(json!({"friends": "name1"}), json!({"friends": ["name1"]})));
        assert!(!subset(json!({"friends": ["name1"]}), json!({"friends": "name1"})));
    }

    #[test]
    fn mismatch_reports_missing_key() {
        let m = find_mismatch(&value(json!({"a": {"b": 1}})), &value(json!({"a": {}}))).unwrap();
        assert_eq!(m.path, "$.a.b");
        assert_eq!(m.kind, MismatchKind::MissingKey);
    }

    #[test]
    fn mismatch_path_brackets_unusual_keys() {
        let needle = value(json!({"a.b": {"": {"x[0]": 1, "q\"": 2}}}));
        let haystack = value(json!({"a.b": {"": {"z": 0}}}));
        let m = find_mismatch(&needle, &haystack).unwrap();
        assert_eq!(m.path, r#"$["a.b"][""]["q\""]"#);

        let haystack = value(json!({"a": {"b": 1}}));
        let m = find_mismatch(&value(json!({"a.b": 1})), &haystack).unwrap();
        assert_eq!(m.path, r#"$["a.b"]"#);
    }

    #[test]
    fn mismatch_reports_scalar_difference() {
        let m = find_mismatch(&value(json!({"foo": "0"})), &value(json!({"foo": 0}))).unwrap();
        assert_eq!(m.to_string(), "$.foo: expected string \"0\", found int 0");
    }

    #[test]
    fn mismatch_reports_list_element_without_candidate() {
        let needle = value(json!({"users": [{"name": "name1"}, {"name": "foo"}]}));
        let haystack = value(json!({"users": [{"name": "name1"}, {"name": "name2"}]}));
        let m = find_mismatch(&needle, &haystack).unwrap();
        assert_eq!(m.path, "$.users[1]");
        assert_eq!(m.kind, MismatchKind::NoCandidate);
    }

    #[test]
    fn mismatch_reports_competing_elements() {
        let m = find_mismatch(&value(json!([1, 1])), &value(json!([1, 2, 3]))).unwrap();
        assert_eq!(m.kind, MismatchKind::NoDistinctAssignment);
        assert_eq!(m.path, "$");
    }

    #[test]
    fn mismatch_reports_short_list() {
        let m = find_mismatch(&value(json!([1, 2, 3])), &value(json!([1, 2]))).unwrap();
        assert_eq!(
            m.kind,
            MismatchKind::ListTooShort {
                needle: 3,
                haystack: 2
            }
        );
    }

    #[test]
    fn mismatch_reports_shape() {
        let m = find_mismatch(&value(json!({"a": [1]})), &value(json!({"a": {"x": 1}}))).unwrap();
        assert_eq!(m.to_string(), "$.a: expected list, found map");
    }

    #[test]
    fn no_mismatch_when_subset() {
        let needle = value(json!({"foo": ["b"]}));
        let haystack = value(json!({"foo": ["a", "b"], "bar": 1}));
        assert!(find_mismatch(&needle, &haystack).is_none());
    }
}
