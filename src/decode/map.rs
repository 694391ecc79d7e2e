//! Dynamic-key object decoding.

use indexmap::IndexMap;

use stillwater::prelude::*;
use stillwater::Validation;

use crate::decode::traits::Decoder;
use crate::decode::wrong_type;
use crate::error::Failures;
use crate::result::{DecodeResult, DecodeResultExt};
use crate::tree::{ConfigValue, ConfigValueType};

/// Decodes an object whose keys are data, not schema.
///
/// Every value decodes with the same element decoder; failures accumulate
/// with the owning key prepended, so a bad entry in a map of servers reads
/// `servers.west.port` just like a record field would. Key order is
/// preserved from the input object.
pub struct MapDecoder<D> {
    element: D,
}

impl<D> MapDecoder<D> {
    pub fn new(element: D) -> Self {
        Self { element }
    }
}

impl<D: Decoder> Decoder for MapDecoder<D> {
    type Output = IndexMap<String, D::Output>;

    fn decode(&self, value: &ConfigValue) -> DecodeResult<Self::Output> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => return wrong_type(value, &[ConfigValueType::Object]),
        };

        let mut entries = IndexMap::with_capacity(obj.len());
        let mut failures: Option<Failures> = None;

        for (key, child) in obj {
            match self.element.decode(child).at_field(key) {
                Validation::Success(v) => {
                    entries.insert(key.clone(), v);
                }
                Validation::Failure(f) => {
                    failures = Some(match failures {
                        Some(acc) => acc.combine(f),
                        None => f,
                    });
                }
            }
        }

        match failures {
            None => Validation::Success(entries),
            Some(f) => Validation::Failure(f),
        }
    }
}
