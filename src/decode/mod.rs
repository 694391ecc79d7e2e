//! Decoder construction and the terminal entry points.
//!
//! [`Decode`] is the factory for every built-in decoder; composition
//! happens through [`DecoderExt`]. The free functions [`decode`] and
//! [`decode_all`] sit at the outermost boundary, where accumulated
//! failures become a [`DecodeError`](crate::DecodeError).

mod combinators;
mod coproduct;
mod map;
mod record;
mod scalars;
mod sequence;
mod traits;

pub use combinators::{
    AndThenDecoder, FnDecoder, LazyDecoder, MappedDecoder, OptionDecoder, SucceedDecoder,
    ZipDecoder,
};
pub use coproduct::TaggedDecoder;
pub use map::MapDecoder;
pub use record::{FieldDecoder, OptionalFieldDecoder, RecordDecoder};
pub use scalars::{BoolDecoder, FloatDecoder, IntDecoder, StringDecoder, ValueDecoder};
pub use sequence::{ListDecoder, TupleDecode, TupleDecoder};
pub use traits::{BoxDecoder, Decoder, DecoderExt};

use rayon::prelude::*;
use stillwater::Validation;

use crate::error::{ConvertFailure, DecodeError, FailureReason, Failures};
use crate::result::DecodeResult;
use crate::tree::{ConfigValue, ConfigValueType};

/// A single `WrongType` failure carrying the node's own origin.
pub(crate) fn wrong_type<T>(value: &ConfigValue, expected: &[ConfigValueType]) -> DecodeResult<T> {
    Validation::Failure(Failures::single(
        ConvertFailure::new(FailureReason::WrongType {
            found: value.value_type(),
            expected: expected.to_vec(),
        })
        .with_origin(value.origin().cloned()),
    ))
}

/// Factory for the built-in decoders.
///
/// All constructors are associated functions, so decoder definitions read
/// as a single expression:
///
/// ```rust
/// use decant::{Decode, DecoderExt, ConfigValue};
/// use serde_json::json;
///
/// let decoder = Decode::record(
///     Decode::field("name", Decode::string())
///         .zip(Decode::optional_field("port", Decode::int()))
///         .map(|(name, port)| (name, port.unwrap_or(8080))),
/// );
///
/// let tree = ConfigValue::from(json!({"name": "api"}));
/// let (name, port) = decant::decode(&decoder, &tree).unwrap();
/// assert_eq!(name, "api");
/// assert_eq!(port, 8080);
/// ```
pub struct Decode;

impl Decode {
    /// A string node as `String`.
    pub fn string() -> StringDecoder {
        StringDecoder::new()
    }

    /// A whole-valued number node as `i64`.
    pub fn int() -> IntDecoder {
        IntDecoder::new()
    }

    /// A number node as `f64`.
    pub fn float() -> FloatDecoder {
        FloatDecoder::new()
    }

    /// A boolean node as `bool`.
    pub fn bool() -> BoolDecoder {
        BoolDecoder::new()
    }

    /// The node itself, undecoded.
    pub fn value() -> ValueDecoder {
        ValueDecoder::new()
    }

    /// Ignores the node and succeeds with a clone of `value`.
    pub fn succeed<T: Clone + Send + Sync>(value: T) -> SucceedDecoder<T> {
        SucceedDecoder::new(value)
    }

    /// A required field of an object.
    pub fn field<D: Decoder>(name: impl Into<String>, decoder: D) -> FieldDecoder<D> {
        FieldDecoder::new(name, decoder)
    }

    /// An optional field of an object; missing or null yields `None`.
    pub fn optional_field<D: Decoder>(
        name: impl Into<String>,
        decoder: D,
    ) -> OptionalFieldDecoder<D> {
        OptionalFieldDecoder::new(name, decoder)
    }

    /// A record: an object decoded by a product of field decoders.
    ///
    /// The wrapper contributes the object check, so a non-object input
    /// fails once instead of once per field.
    pub fn record<D: Decoder>(fields: D) -> RecordDecoder<D> {
        RecordDecoder::new(fields)
    }

    /// A homogeneous array as `Vec`.
    pub fn list<D: Decoder>(element: D) -> ListDecoder<D> {
        ListDecoder::new(element)
    }

    /// A fixed-arity array as a tuple of typed values.
    pub fn tuple<T: TupleDecode>(slots: T) -> TupleDecoder<T> {
        TupleDecoder::new(slots)
    }

    /// An object with dynamic keys as `IndexMap<String, _>`.
    pub fn map<D: Decoder>(element: D) -> MapDecoder<D> {
        MapDecoder::new(element)
    }

    /// A tagged sum type; add variants with
    /// [`variant`](TaggedDecoder::variant).
    pub fn tagged<T>(tag_field: impl Into<String>) -> TaggedDecoder<T> {
        TaggedDecoder::new(tag_field)
    }

    /// Defers decoder construction until a node is decoded.
    ///
    /// The closure runs once per descent, which is what lets a decoder
    /// refer to itself:
    ///
    /// ```rust
    /// use decant::{Decode, DecoderExt, ConfigValue, Decoder, BoxDecoder};
    /// use serde_json::json;
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct Tree {
    ///     label: String,
    ///     children: Vec<Tree>,
    /// }
    ///
    /// fn tree_decoder() -> BoxDecoder<Tree> {
    ///     Decode::record(
    ///         Decode::field("label", Decode::string())
    ///             .zip(Decode::field("children", Decode::list(Decode::lazy(tree_decoder))))
    ///             .map(|(label, children)| Tree { label, children }),
    ///     )
    ///     .boxed()
    /// }
    ///
    /// let tree = ConfigValue::from(json!({
    ///     "label": "root",
    ///     "children": [{"label": "leaf", "children": []}]
    /// }));
    /// let decoded = decant::decode(&tree_decoder(), &tree).unwrap();
    /// assert_eq!(decoded.children[0].label, "leaf");
    /// ```
    pub fn lazy<D, F>(build: F) -> LazyDecoder<F>
    where
        D: Decoder,
        F: Fn() -> D + Send + Sync,
    {
        LazyDecoder::new(build)
    }

    /// Wraps a plain function as a decoder.
    pub fn custom<T, F>(f: F) -> FnDecoder<T>
    where
        F: Fn(&ConfigValue) -> DecodeResult<T> + Send + Sync + 'static,
    {
        FnDecoder::new(f)
    }
}

/// Runs a decoder against a tree and unwraps the accumulation.
///
/// This is the boundary between the accumulating world and ordinary
/// `Result`-based error handling: a failed decode becomes one
/// [`DecodeError`] carrying every failure found, rendered against the
/// decoder's output type name.
pub fn decode<D: Decoder>(decoder: &D, value: &ConfigValue) -> Result<D::Output, DecodeError> {
    match decoder.decode(value) {
        Validation::Success(v) => Ok(v),
        Validation::Failure(failures) => Err(DecodeError::new(
            std::any::type_name::<D::Output>(),
            failures,
        )),
    }
}

/// Decodes many independent trees in parallel with one shared decoder.
///
/// Results come back in input order, one per tree; each keeps its own
/// accumulated failures rather than collapsing into a single error, since
/// the trees are unrelated documents.
pub fn decode_all<D>(decoder: &D, values: &[ConfigValue]) -> Vec<DecodeResult<D::Output>>
where
    D: Decoder,
    D::Output: Send,
{
    values.par_iter().map(|value| decoder.decode(value)).collect()
}
