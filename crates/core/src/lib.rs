//! haystack-core: structural subset matching for nested JSON-like values.
//!
//! Decides whether every key and element required by a *needle* is present,
//! with the same shape and value, in a *haystack*. Map keys must be present
//! with matching values; list elements match in any order, each needle
//! element against a distinct haystack element.
//!
//! # Public API
//!
//! - [`is_subset_of()`] / [`has_subset()`] -- normalize and match, returning
//!   an [`AssertionResult`]
//! - [`normalize()`] -- raw input to canonical [`Value`]
//! - [`matches()`] / [`find_mismatch()`] -- the subset relation on canonical values
//! - [`has_total_matching()`] / [`find_total_matching()`] -- injective
//!   assignment under a pairwise predicate
//!
//! Inputs must be acyclic. [`Raw`] owns its children, so a cycle cannot be
//! built through this API.

pub mod assertion;
pub mod bipartite;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod raw;
pub mod value;

pub use assertion::{has_subset, is_subset_of, AssertionResult, NOT_A_SUBSET, UNEXPECTED_SUBSET};
pub use bipartite::{find_total_matching, has_total_matching};
pub use error::{AssertionFailed, Role, SubsetError};
pub use matcher::{find_mismatch, matches, Mismatch, MismatchKind};
pub use normalize::normalize;
pub use raw::{Key, Raw};
pub use value::{Scalar, Value};
