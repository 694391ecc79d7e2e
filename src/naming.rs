//! Similarity matching for key-not-found hints.
//!
//! When a required key is absent from an object, the decoder asks a
//! [`KeyMatcher`] which of the actually-present keys look like
//! convention-variant spellings of the requested one. The matches land in
//! `FailureReason::KeyNotFound::candidates`, turning a generic "not found"
//! into a hint about a camel/kebab/snake mismatch.

/// Finds present keys that plausibly mean the same thing as a missing one.
pub trait KeyMatcher: Send + Sync {
    /// Returns the subset of `present` considered reasonable matches for
    /// `requested`, in the order they appear in the object.
    fn candidates(&self, requested: &str, present: &[&str]) -> Vec<String>;
}

/// Matches keys across case and word-separator conventions.
///
/// Keys are compared after lowercasing and stripping `-` and `_`, so
/// `maxRetries`, `max-retries`, `max_retries` and `MAX_RETRIES` all fold
/// to the same shape.
///
/// # Example
///
/// ```rust
/// use decant::naming::{ConventionMatcher, KeyMatcher};
///
/// let matcher = ConventionMatcher;
/// let hits = matcher.candidates("max-retries", &["maxRetries", "timeout"]);
/// assert_eq!(hits, vec!["maxRetries"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionMatcher;

impl ConventionMatcher {
    fn fold(key: &str) -> String {
        key.chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect()
    }
}

impl KeyMatcher for ConventionMatcher {
    fn candidates(&self, requested: &str, present: &[&str]) -> Vec<String> {
        let wanted = Self::fold(requested);
        present
            .iter()
            .filter(|key| Self::fold(key) == wanted)
            .map(|key| key.to_string())
            .collect()
    }
}

/// A matcher that never suggests anything.
///
/// Use when convention hints are unwanted, e.g. for objects whose keys are
/// user data rather than schema field names.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl KeyMatcher for ExactMatcher {
    fn candidates(&self, _requested: &str, _present: &[&str]) -> Vec<String> {
        Vec::new()
    }
}
