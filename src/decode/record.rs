//! Record and field decoding.
//!
//! A record is decoded as a product of named fields: each field decoder
//! runs independently against its key and every field's failures survive
//! into the combined result. [`RecordDecoder`] guards the object check so
//! a non-object input fails once, not once per field.

use std::sync::Arc;

use stillwater::Validation;

use crate::decode::traits::Decoder;
use crate::decode::wrong_type;
use crate::error::{ConvertFailure, FailureReason, Failures};
use crate::naming::{ConventionMatcher, KeyMatcher};
use crate::result::{DecodeResult, DecodeResultExt};
use crate::tree::{ConfigValue, ConfigValueType};

/// Decodes one required field out of an object.
///
/// The element decoder runs against the value at `name`; its failures get
/// the field name prepended to their paths. A wholly-absent key produces
/// `KeyNotFound` at the current path, with candidate keys from the
/// configured [`KeyMatcher`] so convention mismatches surface as hints.
pub struct FieldDecoder<D> {
    name: String,
    decoder: D,
    matcher: Arc<dyn KeyMatcher>,
}

impl<D> FieldDecoder<D> {
    pub fn new(name: impl Into<String>, decoder: D) -> Self {
        Self {
            name: name.into(),
            decoder,
            matcher: Arc::new(ConventionMatcher),
        }
    }

    /// Replaces the similarity matcher used for key-not-found hints.
    pub fn with_matcher(mut self, matcher: impl KeyMatcher + 'static) -> Self {
        self.matcher = Arc::new(matcher);
        self
    }
}

impl<D: Decoder> Decoder for FieldDecoder<D> {
    type Output = D::Output;

    fn decode(&self, value: &ConfigValue) -> DecodeResult<Self::Output> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => return wrong_type(value, &[ConfigValueType::Object]),
        };

        match obj.get(&self.name) {
            Some(child) => self.decoder.decode(child).at_field(&self.name),
            None => {
                let present: Vec<&str> = obj.keys().map(String::as_str).collect();
                let candidates = self.matcher.candidates(&self.name, &present);
                Validation::Failure(Failures::single(
                    ConvertFailure::new(FailureReason::KeyNotFound {
                        key: self.name.clone(),
                        candidates,
                    })
                    .with_origin(value.origin().cloned()),
                ))
            }
        }
    }
}

/// Decodes one optional field out of an object.
///
/// A missing key or an explicit null yields `None`; a present value runs
/// the element decoder with the field name prepended to any failures.
pub struct OptionalFieldDecoder<D> {
    name: String,
    decoder: D,
}

impl<D> OptionalFieldDecoder<D> {
    pub fn new(name: impl Into<String>, decoder: D) -> Self {
        Self {
            name: name.into(),
            decoder,
        }
    }
}

impl<D: Decoder> Decoder for OptionalFieldDecoder<D> {
    type Output = Option<D::Output>;

    fn decode(&self, value: &ConfigValue) -> DecodeResult<Self::Output> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => return wrong_type(value, &[ConfigValueType::Object]),
        };

        match obj.get(&self.name) {
            None => Validation::Success(None),
            Some(child) if child.is_null() => Validation::Success(None),
            Some(child) => self.decoder.decode(child).at_field(&self.name).map(Some),
        }
    }
}

/// Guards a product of field decoders with a single object check.
///
/// A non-object input fails with exactly one `WrongType` and no
/// per-field attempts. For objects, the inner decoder (typically zipped [`FieldDecoder`]s)
/// runs and accumulates every field's failures. A record with no fields
/// is `Decode::record(Decode::succeed(..))` and always succeeds on
/// objects.
pub struct RecordDecoder<D> {
    inner: D,
}

impl<D> RecordDecoder<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

impl<D: Decoder> Decoder for RecordDecoder<D> {
    type Output = D::Output;

    fn decode(&self, value: &ConfigValue) -> DecodeResult<Self::Output> {
        if value.as_object().is_none() {
            return wrong_type(value, &[ConfigValueType::Object]);
        }
        self.inner.decode(value)
    }
}
