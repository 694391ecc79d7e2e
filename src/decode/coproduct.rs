//! Tagged sum-type decoding.

use std::sync::Arc;

use indexmap::IndexMap;

use stillwater::Validation;

use crate::decode::traits::{BoxDecoder, Decoder};
use crate::decode::wrong_type;
use crate::error::{ConvertFailure, FailureReason, Failures};
use crate::naming::{ConventionMatcher, KeyMatcher};
use crate::result::{DecodeResult, DecodeResultExt};
use crate::tree::{ConfigValue, ConfigValueType};

/// Decodes a flattened tagged object into one of several variants.
///
/// The object carries a string discriminator under `tag_field`; its value
/// selects a variant decoder, which then decodes the whole object (tag
/// included) so variant payload fields live beside the tag. Failures from
/// the selected variant keep their paths relative to the object itself.
///
/// Exactly one failure shape exists per way the dispatch can go wrong: a
/// missing tag is a `KeyNotFound`, a non-string tag a `WrongType` at the
/// tag field, an unrecognised tag an `UnknownTag` at the tag field.
///
/// # Example
///
/// ```rust
/// use decant::{Decode, DecoderExt, ConfigValue};
/// use serde_json::json;
///
/// #[derive(Debug, PartialEq, Clone)]
/// enum Auth {
///     Anonymous,
///     Token(String),
/// }
///
/// let decoder = Decode::tagged("type")
///     .variant("anonymous", Decode::succeed(Auth::Anonymous).boxed())
///     .variant(
///         "token",
///         Decode::field("value", Decode::string())
///             .map(Auth::Token)
///             .boxed(),
///     );
///
/// let tree = ConfigValue::from(json!({"type": "token", "value": "s3cret"}));
/// let auth = decant::decode(&decoder, &tree).unwrap();
/// assert_eq!(auth, Auth::Token("s3cret".to_string()));
/// ```
pub struct TaggedDecoder<T> {
    tag_field: String,
    variants: IndexMap<String, BoxDecoder<T>>,
    matcher: Arc<dyn KeyMatcher>,
}

impl<T> TaggedDecoder<T> {
    pub fn new(tag_field: impl Into<String>) -> Self {
        Self {
            tag_field: tag_field.into(),
            variants: IndexMap::new(),
            matcher: Arc::new(ConventionMatcher),
        }
    }

    /// Registers the decoder for one variant tag. Later registrations of
    /// the same tag replace earlier ones.
    pub fn variant(mut self, tag: impl Into<String>, decoder: BoxDecoder<T>) -> Self {
        self.variants.insert(tag.into(), decoder);
        self
    }

    /// Replaces the similarity matcher used when the tag field is missing.
    pub fn with_matcher(mut self, matcher: impl KeyMatcher + 'static) -> Self {
        self.matcher = Arc::new(matcher);
        self
    }
}

impl<T: Send + Sync> Decoder for TaggedDecoder<T> {
    type Output = T;

    fn decode(&self, value: &ConfigValue) -> DecodeResult<T> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => return wrong_type(value, &[ConfigValueType::Object]),
        };

        let tag_node = match obj.get(&self.tag_field) {
            Some(node) => node,
            None => {
                let present: Vec<&str> = obj.keys().map(String::as_str).collect();
                let candidates = self.matcher.candidates(&self.tag_field, &present);
                return Validation::Failure(Failures::single(
                    ConvertFailure::new(FailureReason::KeyNotFound {
                        key: self.tag_field.clone(),
                        candidates,
                    })
                    .with_origin(value.origin().cloned()),
                ));
            }
        };

        let tag = match tag_node.as_str() {
            Some(tag) => tag,
            None => {
                return wrong_type(tag_node, &[ConfigValueType::String])
                    .at_field(&self.tag_field)
            }
        };

        match self.variants.get(tag) {
            // The variant decoder sees the whole object, so its failure
            // paths are already relative to it.
            Some(decoder) => decoder.decode(value),
            None => Validation::Failure(
                Failures::single(
                    ConvertFailure::new(FailureReason::UnknownTag {
                        found: tag.to_string(),
                    })
                    .with_origin(tag_node.origin().cloned()),
                )
                .at_field(&self.tag_field),
            ),
        }
    }
}
