use std::fmt;

/// Which side of the subset relation an input plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Needle,
    Haystack,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Needle => write!(f, "needle"),
            Role::Haystack => write!(f, "haystack"),
        }
    }
}

/// Errors raised before any matching is attempted.
///
/// These signal misuse of the API, not a false assertion; a needle that is
/// simply not contained in its haystack is reported through
/// [`AssertionResult`](crate::AssertionResult) instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubsetError {
    /// A string input is not JSON, or decodes to a bare scalar.
    #[error("Given string as {role} is not a valid json list/object.")]
    MalformedJson { role: Role },
}

/// A failed assertion, for callers that prefer `?` over inspecting the result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct AssertionFailed {
    pub message: String,
    /// Location of the first mismatch, when the needle was expected to match.
    pub detail: Option<String>,
    pub needle: serde_json::Value,
    pub haystack: serde_json::Value,
}
