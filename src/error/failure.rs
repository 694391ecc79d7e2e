//! Decode failure types.
//!
//! This module provides [`FailureReason`] for the closed set of atomic
//! decode problems, [`ConvertFailure`] pairing a reason with its path and
//! origin, and [`Failures`] for accumulating multiple failures without
//! ever dropping one.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::{ConfigPath, PathSegment};
use crate::tree::{ConfigOrigin, ConfigValueType};

/// One atomic decode problem.
///
/// The set is closed at use sites (decoders produce only these) but open at
/// the definition site: new reasons may be added in later versions, so
/// downstream matches need a wildcard arm.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum FailureReason {
    /// The node had a different shape than the decoder expected.
    WrongType {
        found: ConfigValueType,
        expected: Vec<ConfigValueType>,
    },
    /// A required key was absent from an object.
    ///
    /// `candidates` holds present keys that look like convention-variant
    /// spellings of the requested key (see [`crate::naming`]), so a user who
    /// wrote `maxRetries` instead of `max-retries` gets a specific hint.
    KeyNotFound {
        key: String,
        candidates: Vec<String>,
    },
    /// A fixed-arity sequence had the wrong number of elements.
    WrongSizeList { expected: usize, found: usize },
    /// The value was syntactically malformed before structural decoding.
    CannotParse { message: String },
    /// The configuration source could not be read at all.
    CannotRead { source: String, cause: String },
    /// A sum-type discriminator did not match any known variant tag.
    UnknownTag { found: String },
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::WrongType { found, expected } => {
                let expected = expected
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" or ");
                write!(f, "Expected type {}. Found {} instead.", expected, found)
            }
            FailureReason::KeyNotFound { key, candidates } => {
                write!(f, "Key not found: '{}'.", key)?;
                if !candidates.is_empty() {
                    let hints = candidates
                        .iter()
                        .map(|c| format!("'{}'", c))
                        .collect::<Vec<_>>()
                        .join(", ");
                    write!(f, " Similar keys found: {}.", hints)?;
                }
                Ok(())
            }
            FailureReason::WrongSizeList { expected, found } => {
                write!(
                    f,
                    "List of wrong size. Expected {} elements. Found {} elements instead.",
                    expected, found
                )
            }
            FailureReason::CannotParse { message } => {
                write!(f, "Unable to parse the configuration: {}.", message)
            }
            FailureReason::CannotRead { source, cause } => {
                write!(f, "Unable to read source {}: {}.", source, cause)
            }
            FailureReason::UnknownTag { found } => {
                write!(
                    f,
                    "Unexpected value '{}' for the type discriminator field.",
                    found
                )
            }
        }
    }
}

/// A single decode failure with full context.
///
/// `ConvertFailure` captures what went wrong ([`FailureReason`]), where in
/// the tree it happened (a [`ConfigPath`], built by prepending one segment
/// per level as the failure propagates outward) and, when the tree carries
/// provenance, the source line of the offending node.
///
/// Two failures with identical reason, origin and path are
/// indistinguishable.
///
/// # Example
///
/// ```rust
/// use decant::{ConvertFailure, FailureReason};
///
/// let failure = ConvertFailure::new(FailureReason::KeyNotFound {
///     key: "port".to_string(),
///     candidates: vec![],
/// })
/// .at_field("server");
///
/// assert_eq!(failure.path.to_string(), "server");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertFailure {
    /// What went wrong.
    pub reason: FailureReason,
    /// The origin of the offending node, when available.
    pub origin: Option<ConfigOrigin>,
    /// The route from the decode root to the failure.
    pub path: ConfigPath,
}

impl ConvertFailure {
    /// Creates a failure at the current node (empty path, no origin).
    pub fn new(reason: FailureReason) -> Self {
        Self {
            reason,
            origin: None,
            path: ConfigPath::root(),
        }
    }

    /// Sets the source origin and returns self for chaining.
    pub fn with_origin(mut self, origin: Option<ConfigOrigin>) -> Self {
        self.origin = origin;
        self
    }

    /// Returns this failure with a field segment prepended to its path.
    pub fn at_field(mut self, name: &str) -> Self {
        self.path = self.path.prepended(PathSegment::field(name));
        self
    }

    /// Returns this failure with an index segment prepended to its path.
    pub fn at_index(mut self, index: usize) -> Self {
        self.path = self.path.prepended(PathSegment::index(index));
        self
    }
}

impl Display for ConvertFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.reason)?;
        } else {
            write!(f, "{}: {}", self.path, self.reason)?;
        }
        if let Some(ref origin) = self.origin {
            write!(f, " ({})", origin)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConvertFailure {}

// ConvertFailure is Send + Sync since all fields are owned types. These
// assertions keep that true if the types change.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ConvertFailure>();
    assert_sync::<ConvertFailure>();
};

/// A non-empty ordered collection of decode failures.
///
/// `Failures` wraps a `NonEmptyVec<ConvertFailure>` so a failed decode
/// always carries at least one failure. It is the only failure
/// representation in the crate: a single failure is a list of one.
///
/// # Combining
///
/// `Failures` implements `Semigroup`; combination concatenates and never
/// drops an entry, which is what lets every field of a record report at
/// once:
///
/// ```rust
/// use decant::{ConvertFailure, FailureReason, Failures};
/// use stillwater::prelude::*;
///
/// let missing = |key: &str| {
///     Failures::single(ConvertFailure::new(FailureReason::KeyNotFound {
///         key: key.to_string(),
///         candidates: vec![],
///     }))
/// };
///
/// let combined = missing("host").combine(missing("port"));
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Failures(NonEmptyVec<ConvertFailure>);

impl Failures {
    /// Creates a `Failures` containing a single failure.
    pub fn single(failure: ConvertFailure) -> Self {
        Self(NonEmptyVec::singleton(failure))
    }

    /// Creates a `Failures` from a `Vec<ConvertFailure>`.
    ///
    /// # Panics
    ///
    /// Panics if the provided vec is empty. Use this only where a prior
    /// length check guarantees at least one failure.
    pub fn from_vec(failures: Vec<ConvertFailure>) -> Self {
        Self(NonEmptyVec::from_vec(failures).expect("Failures requires at least one failure"))
    }

    /// A singleton failure for an unreadable configuration source.
    ///
    /// Pre-structural: there is no tree yet, so nothing to accumulate
    /// against and no path to attach.
    pub fn cannot_read(source: impl Into<String>, cause: impl Into<String>) -> Self {
        Self::single(ConvertFailure::new(FailureReason::CannotRead {
            source: source.into(),
            cause: cause.into(),
        }))
    }

    /// A singleton failure for a source that failed to parse.
    ///
    /// Pre-structural, like [`Failures::cannot_read`]; the origin locates
    /// the syntax error when the parser knows it.
    pub fn cannot_parse(message: impl Into<String>, origin: Option<ConfigOrigin>) -> Self {
        Self::single(
            ConvertFailure::new(FailureReason::CannotParse {
                message: message.into(),
            })
            .with_origin(origin),
        )
    }

    /// Returns the number of failures in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns false since this collection is guaranteed non-empty.
    ///
    /// This method exists for API consistency but always returns false.
    pub fn is_empty(&self) -> bool {
        false // NonEmptyVec is never empty
    }

    /// Returns an iterator over the contained failures.
    pub fn iter(&self) -> impl Iterator<Item = &ConvertFailure> {
        self.0.iter()
    }

    /// Returns all failures at the specified path.
    pub fn at_path(&self, path: &ConfigPath) -> Vec<&ConvertFailure> {
        self.0.iter().filter(|f| &f.path == path).collect()
    }

    /// Returns the first failure in the collection.
    pub fn first(&self) -> &ConvertFailure {
        self.0.head()
    }

    /// Converts this collection into a `Vec<ConvertFailure>`.
    pub fn into_vec(self) -> Vec<ConvertFailure> {
        self.0.into_vec()
    }

    /// Prepends a field segment to the path of every contained failure.
    ///
    /// Called exactly once per object level descended, on the way out.
    pub fn at_field(self, name: &str) -> Self {
        self.map_failures(|f| f.at_field(name))
    }

    /// Prepends an index segment to the path of every contained failure.
    pub fn at_index(self, index: usize) -> Self {
        self.map_failures(|f| f.at_index(index))
    }

    fn map_failures(self, f: impl FnMut(ConvertFailure) -> ConvertFailure) -> Self {
        // Length is unchanged, so the list stays non-empty.
        Self::from_vec(self.into_vec().into_iter().map(f).collect())
    }
}

impl Semigroup for Failures {
    fn combine(self, other: Self) -> Self {
        Failures(self.0.combine(other.0))
    }
}

impl Display for Failures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Decoding failed with {} failure(s):", self.len())?;
        for (i, failure) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for Failures {}

impl IntoIterator for Failures {
    type Item = ConvertFailure;
    type IntoIter = std::vec::IntoIter<ConvertFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Failures {
    type Item = &'a ConvertFailure;
    type IntoIter = Box<dyn Iterator<Item = &'a ConvertFailure> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

// Failures is Send + Sync since it only contains ConvertFailure.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Failures>();
    assert_sync::<Failures>();
};
