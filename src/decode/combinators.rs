//! Decoder combinators.
//!
//! The structs behind [`DecoderExt`](crate::DecoderExt): mapping,
//! fallible refinement, pairing, null-handling, plus the standalone
//! building blocks `succeed`, `lazy` and `custom` exposed through
//! [`Decode`](crate::Decode).

use stillwater::Validation;

use crate::decode::traits::Decoder;
use crate::error::{ConvertFailure, FailureReason, Failures};
use crate::result::{DecodeResult, DecodeResultExt};
use crate::tree::ConfigValue;

/// Transforms the output of an inner decoder.
///
/// The closure is boxed so the mapped decoder has a nameable type.
pub struct MappedDecoder<D: Decoder, U> {
    inner: D,
    f: Box<dyn Fn(D::Output) -> U + Send + Sync>,
}

impl<D: Decoder, U> MappedDecoder<D, U> {
    pub(crate) fn new<F>(inner: D, f: F) -> Self
    where
        F: Fn(D::Output) -> U + Send + Sync + 'static,
    {
        Self {
            inner,
            f: Box::new(f),
        }
    }
}

impl<D: Decoder, U> Decoder for MappedDecoder<D, U> {
    type Output = U;

    fn decode(&self, value: &ConfigValue) -> DecodeResult<U> {
        self.inner.decode(value).map(|v| (self.f)(v))
    }
}

/// Refines the output of an inner decoder through a fallible conversion.
///
/// `Err` messages become `CannotParse` failures with the origin of the
/// node under decode, so a string that fails a semantic parse points at
/// its source line.
pub struct AndThenDecoder<D: Decoder, U> {
    inner: D,
    f: Box<dyn Fn(D::Output) -> Result<U, String> + Send + Sync>,
}

impl<D: Decoder, U> AndThenDecoder<D, U> {
    pub(crate) fn new<F>(inner: D, f: F) -> Self
    where
        F: Fn(D::Output) -> Result<U, String> + Send + Sync + 'static,
    {
        Self {
            inner,
            f: Box::new(f),
        }
    }
}

impl<D: Decoder, U> Decoder for AndThenDecoder<D, U> {
    type Output = U;

    fn decode(&self, value: &ConfigValue) -> DecodeResult<U> {
        match self.inner.decode(value) {
            Validation::Success(v) => match (self.f)(v) {
                Ok(u) => Validation::Success(u),
                Err(message) => Validation::Failure(Failures::single(
                    ConvertFailure::new(FailureReason::CannotParse { message })
                        .with_origin(value.origin().cloned()),
                )),
            },
            Validation::Failure(failures) => Validation::Failure(failures),
        }
    }
}

/// Applies two decoders to the same node and pairs their outputs.
///
/// Failures from both sides accumulate; this is the product step of the
/// accumulation algebra lifted to decoders.
pub struct ZipDecoder<A, B> {
    left: A,
    right: B,
}

impl<A, B> ZipDecoder<A, B> {
    pub(crate) fn new(left: A, right: B) -> Self {
        Self { left, right }
    }
}

impl<A: Decoder, B: Decoder> Decoder for ZipDecoder<A, B> {
    type Output = (A::Output, B::Output);

    fn decode(&self, value: &ConfigValue) -> DecodeResult<Self::Output> {
        self.left.decode(value).zip(self.right.decode(value))
    }
}

/// Decodes null to `None` and delegates everything else.
pub struct OptionDecoder<D> {
    inner: D,
}

impl<D> OptionDecoder<D> {
    pub(crate) fn new(inner: D) -> Self {
        Self { inner }
    }
}

impl<D: Decoder> Decoder for OptionDecoder<D> {
    type Output = Option<D::Output>;

    fn decode(&self, value: &ConfigValue) -> DecodeResult<Self::Output> {
        if value.is_null() {
            Validation::Success(None)
        } else {
            self.inner.decode(value).map(Some)
        }
    }
}

/// Always succeeds with a clone of a fixed value.
///
/// The identity of n-ary combination: zipping any decoder with
/// `succeed(())` changes nothing about which failures appear. Also useful
/// as the payload decoder of tag-only sum variants.
pub struct SucceedDecoder<T> {
    value: T,
}

impl<T> SucceedDecoder<T> {
    pub(crate) fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone + Send + Sync> Decoder for SucceedDecoder<T> {
    type Output = T;

    fn decode(&self, _value: &ConfigValue) -> DecodeResult<T> {
        Validation::Success(self.value.clone())
    }
}

/// Builds the inner decoder on demand, once per descent.
///
/// This is what makes self-referential schemas expressible: the closure
/// refers to the function constructing the recursive decoder, and the
/// recursion is driven by the input tree's depth.
pub struct LazyDecoder<F> {
    build: F,
}

impl<F> LazyDecoder<F> {
    pub(crate) fn new(build: F) -> Self {
        Self { build }
    }
}

impl<D, F> Decoder for LazyDecoder<F>
where
    D: Decoder,
    F: Fn() -> D + Send + Sync,
{
    type Output = D::Output;

    fn decode(&self, value: &ConfigValue) -> DecodeResult<Self::Output> {
        (self.build)().decode(value)
    }
}

/// Wraps a plain function as a decoder.
///
/// The escape hatch for already-assembled decode logic that does not fit
/// the stock combinators.
pub struct FnDecoder<T> {
    f: Box<dyn Fn(&ConfigValue) -> DecodeResult<T> + Send + Sync>,
}

impl<T> FnDecoder<T> {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: Fn(&ConfigValue) -> DecodeResult<T> + Send + Sync + 'static,
    {
        Self { f: Box::new(f) }
    }
}

impl<T> Decoder for FnDecoder<T> {
    type Output = T;

    fn decode(&self, value: &ConfigValue) -> DecodeResult<T> {
        (self.f)(value)
    }
}
