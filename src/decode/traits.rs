//! The decoder capability and its composition helpers.
//!
//! This module provides the [`Decoder`] trait, a pure function from a
//! configuration node to a [`DecodeResult`], and [`DecoderExt`], the
//! extension methods that compose decoders into larger ones.

use std::sync::Arc;

use crate::decode::combinators::{
    AndThenDecoder, MappedDecoder, OptionDecoder, ZipDecoder,
};
use crate::result::DecodeResult;
use crate::tree::ConfigValue;

/// A pure function from a configuration node to a decoded value or an
/// accumulated failure list.
///
/// Decoders are composed recursively: a record decoder holds field
/// decoders, a list decoder holds an element decoder, and so on. Decoding
/// never mutates anything, so a decoder can be shared freely across
/// threads (hence the `Send + Sync` bound) and applied to many trees.
///
/// The trait is object-safe; composition helpers with generic signatures
/// live on [`DecoderExt`].
pub trait Decoder: Send + Sync {
    /// The type produced by a successful decode.
    type Output;

    /// Decodes a node.
    ///
    /// Returns `Validation::Success` with the decoded value, or
    /// `Validation::Failure` with every failure found beneath this node,
    /// each path-annotated relative to it.
    fn decode(&self, value: &ConfigValue) -> DecodeResult<Self::Output>;
}

/// A boxed, type-erased decoder.
pub type BoxDecoder<T> = Box<dyn Decoder<Output = T>>;

impl<D: Decoder + ?Sized> Decoder for Box<D> {
    type Output = D::Output;

    fn decode(&self, value: &ConfigValue) -> DecodeResult<Self::Output> {
        (**self).decode(value)
    }
}

impl<D: Decoder + ?Sized> Decoder for Arc<D> {
    type Output = D::Output;

    fn decode(&self, value: &ConfigValue) -> DecodeResult<Self::Output> {
        (**self).decode(value)
    }
}

/// Composition methods available on every sized decoder.
///
/// # Example
///
/// ```rust
/// use decant::{Decode, DecoderExt, ConfigValue};
/// use serde_json::json;
///
/// struct Server {
///     host: String,
///     port: i64,
/// }
///
/// let decoder = Decode::record(
///     Decode::field("host", Decode::string())
///         .zip(Decode::field("port", Decode::int()))
///         .map(|(host, port)| Server { host, port }),
/// );
///
/// let tree = ConfigValue::from(json!({"host": "localhost", "port": 8080}));
/// let server = decant::decode(&decoder, &tree).unwrap();
/// assert_eq!(server.host, "localhost");
/// assert_eq!(server.port, 8080);
/// ```
pub trait DecoderExt: Decoder + Sized {
    /// Transforms the decoded value. Runs nothing on the failure branch.
    fn map<U, F>(self, f: F) -> MappedDecoder<Self, U>
    where
        F: Fn(Self::Output) -> U + Send + Sync + 'static,
    {
        MappedDecoder::new(self, f)
    }

    /// Refines the decoded value through a fallible conversion.
    ///
    /// An `Err` becomes a single `CannotParse` failure carrying the
    /// origin of the node being decoded.
    fn and_then<U, F>(self, f: F) -> AndThenDecoder<Self, U>
    where
        F: Fn(Self::Output) -> Result<U, String> + Send + Sync + 'static,
    {
        AndThenDecoder::new(self, f)
    }

    /// Applies both decoders to the same node and pairs the outputs,
    /// accumulating failures from both sides.
    ///
    /// This is how records combine their fields: each field decoder runs
    /// independently and every failure survives.
    fn zip<D2: Decoder>(self, other: D2) -> ZipDecoder<Self, D2> {
        ZipDecoder::new(self, other)
    }

    /// Accepts null as `None` and decodes anything else with `self`.
    fn optional(self) -> OptionDecoder<Self> {
        OptionDecoder::new(self)
    }

    /// Erases the decoder type behind a box.
    fn boxed(self) -> BoxDecoder<Self::Output>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<D: Decoder> DecoderExt for D {}
