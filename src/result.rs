//! The accumulation algebra every decode step runs through.
//!
//! [`DecodeResult`] is `stillwater::Validation` specialised to
//! [`Failures`]: either a decoded value or a non-empty failure list.
//! [`DecodeResultExt`] adds the two operations the traversal is built
//! from: `zip`, which pairs two results and concatenates their failure
//! lists, and the `at_field`/`at_index` path rewrites applied once per
//! nesting level. [`sequence`] folds any number of results; zero inputs
//! fold to success.

use stillwater::prelude::*;
use stillwater::Validation;

use crate::error::Failures;

/// The result of one decode step: a value or accumulated failures.
pub type DecodeResult<T> = Validation<T, Failures>;

/// Accumulation and path-tracking operations on [`DecodeResult`].
///
/// `map` comes from `Validation` itself and runs nothing on the failure
/// branch; the operations here are the ones specific to decoding.
pub trait DecodeResultExt<T>: Sized {
    /// Pairs two results, keeping every failure from both sides.
    ///
    /// Both success: success of the pair. Either failure: failure. Both
    /// failure: the concatenation of both failure lists, in order, with
    /// nothing dropped. Associative, with any success as identity, so
    /// n-ary combination by fold reports the same failures regardless of
    /// grouping.
    fn zip<U>(self, other: DecodeResult<U>) -> DecodeResult<(T, U)>;

    /// Prepends a field segment to every failure's path.
    ///
    /// Successes are untouched; they carry no path.
    fn at_field(self, name: &str) -> Self;

    /// Prepends an index segment to every failure's path.
    fn at_index(self, index: usize) -> Self;
}

impl<T> DecodeResultExt<T> for DecodeResult<T> {
    fn zip<U>(self, other: DecodeResult<U>) -> DecodeResult<(T, U)> {
        match (self, other) {
            (Validation::Success(a), Validation::Success(b)) => Validation::Success((a, b)),
            (Validation::Failure(a), Validation::Failure(b)) => Validation::Failure(a.combine(b)),
            (Validation::Failure(a), _) => Validation::Failure(a),
            (_, Validation::Failure(b)) => Validation::Failure(b),
        }
    }

    fn at_field(self, name: &str) -> Self {
        match self {
            Validation::Success(v) => Validation::Success(v),
            Validation::Failure(failures) => Validation::Failure(failures.at_field(name)),
        }
    }

    fn at_index(self, index: usize) -> Self {
        match self {
            Validation::Success(v) => Validation::Success(v),
            Validation::Failure(failures) => Validation::Failure(failures.at_index(index)),
        }
    }
}

/// Folds any number of results into one, accumulating all failures.
///
/// Every input is inspected: successes collect in order, and the failure
/// lists of every failed input concatenate. Zero inputs yield
/// `Success(vec![])`, the identity of the accumulation.
pub fn sequence<T>(results: impl IntoIterator<Item = DecodeResult<T>>) -> DecodeResult<Vec<T>> {
    let mut values = Vec::new();
    let mut failures: Option<Failures> = None;

    for result in results {
        match result {
            Validation::Success(v) => values.push(v),
            Validation::Failure(f) => {
                failures = Some(match failures {
                    Some(acc) => acc.combine(f),
                    None => f,
                });
            }
        }
    }

    match failures {
        None => Validation::Success(values),
        Some(f) => Validation::Failure(f),
    }
}
