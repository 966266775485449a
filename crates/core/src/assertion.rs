//! Public entry points: [`is_subset_of`] and [`has_subset`].
//!
//! Both normalize their inputs eagerly, so a malformed JSON string fails the
//! call itself. A needle that is not contained in the haystack is not an
//! error; it is an [`AssertionResult`] whose outcome is false.

use crate::error::{AssertionFailed, Role, SubsetError};
use crate::matcher::{self, Mismatch};
use crate::normalize::normalize;
use crate::raw::Raw;
use crate::value::Value;

/// Failure description for a needle that is not a subset.
pub const NOT_A_SUBSET: &str = "Failed asserting that array is a subset.";
/// Failure description for a negated assertion whose needle is a subset.
pub const UNEXPECTED_SUBSET: &str = "Failed asserting that array is not a subset.";

/// Outcome of a subset assertion, for an assertion runner to report.
#[derive(Debug, Clone, PartialEq)]
pub struct AssertionResult {
    success: bool,
    negated: bool,
    needle: Value,
    haystack: Value,
}

impl AssertionResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The description reported when this assertion fails.
    pub fn failure_message(&self) -> &'static str {
        if self.negated {
            UNEXPECTED_SUBSET
        } else {
            NOT_A_SUBSET
        }
    }

    pub fn needle(&self) -> &Value {
        &self.needle
    }

    pub fn haystack(&self) -> &Value {
        &self.haystack
    }

    /// Invert the expectation: succeed only if the needle is NOT a subset.
    pub fn negate(self) -> Self {
        AssertionResult {
            success: !self.success,
            negated: !self.negated,
            ..self
        }
    }

    /// Where the needle first fails to match, for a failed non-negated
    /// assertion. `None` in every other case.
    pub fn mismatch(&self) -> Option<Mismatch> {
        if self.success || self.negated {
            return None;
        }
        matcher::find_mismatch(&self.needle, &self.haystack)
    }

    /// Convert to a `Result`, attaching needle and haystack as context on failure.
    pub fn into_result(self) -> Result<(), AssertionFailed> {
        if self.success {
            return Ok(());
        }
        Err(AssertionFailed {
            message: self.failure_message().to_string(),
            detail: self.mismatch().map(|m| m.to_string()),
            needle: self.needle.to_json(),
            haystack: self.haystack.to_json(),
        })
    }
}

/// Assert that `needle` is a subset of `haystack`.
///
/// Either argument may be JSON text (an array or object), a native
/// collection, a `serde_json::Value`, or anything else convertible to [`Raw`].
pub fn is_subset_of(
    needle: impl Into<Raw>,
    haystack: impl Into<Raw>,
) -> Result<AssertionResult, SubsetError> {
    let needle = normalize(needle, Role::Needle)?;
    let haystack = normalize(haystack, Role::Haystack)?;

    let success = matcher::matches(&needle, &haystack);
    tracing::debug!(success, "subset assertion evaluated");

    Ok(AssertionResult {
        success,
        negated: false,
        needle,
        haystack,
    })
}

/// Assert that `haystack` contains `needle`.
///
/// Same evaluation as [`is_subset_of`] with the arguments swapped; error
/// messages still name each argument by its role.
pub fn has_subset(
    haystack: impl Into<Raw>,
    needle: impl Into<Raw>,
) -> Result<AssertionResult, SubsetError> {
    is_subset_of(needle, haystack)
}
