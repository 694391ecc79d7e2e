//! A shared, named collection of decoders.
//!
//! Applications that assemble decoders at startup can park them here and
//! look them up by name later, across threads. Decoders for different
//! output types share one registry; retrieval is type-checked at runtime
//! via `Any` downcasting.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::decode::Decoder;
use crate::result::DecodeResult;
use crate::tree::ConfigValue;

/// Errors from registry operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// A decoder is already registered under this name.
    #[error("a decoder named '{0}' is already registered")]
    DuplicateName(String),

    /// No decoder with this name and output type exists.
    #[error("no decoder named '{0}' with the requested output type")]
    NotFound(String),
}

/// A thread-safe registry of named decoders.
///
/// Cloning is cheap and every clone shares the same underlying map, so a
/// registry populated during startup can be handed to worker threads as a
/// value.
///
/// # Example
///
/// ```rust
/// use decant::{Decode, DecoderRegistry, ConfigValue};
/// use serde_json::json;
///
/// let registry = DecoderRegistry::new();
/// registry
///     .register("port", Decode::field("port", Decode::int()))
///     .unwrap();
///
/// let tree = ConfigValue::from(json!({"port": 8080}));
/// let result = registry.decode::<i64>("port", &tree).unwrap();
/// assert_eq!(result.into_result().unwrap(), 8080);
/// ```
#[derive(Clone, Default)]
pub struct DecoderRegistry {
    decoders: Arc<RwLock<HashMap<String, Box<dyn Any + Send + Sync>>>>,
}

impl DecoderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a decoder under a unique name.
    ///
    /// Names are unique across all output types; registering a second
    /// decoder under an existing name fails even if the types differ.
    pub fn register<T: 'static>(
        &self,
        name: impl Into<String>,
        decoder: impl Decoder<Output = T> + 'static,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut decoders = self.decoders.write();
        if decoders.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        let entry: Arc<dyn Decoder<Output = T>> = Arc::new(decoder);
        decoders.insert(name, Box::new(entry));
        Ok(())
    }

    /// Looks up a decoder by name and output type.
    ///
    /// A name registered with a different output type behaves like an
    /// absent name: the stored entry will not downcast.
    pub fn get<T: 'static>(&self, name: &str) -> Result<Arc<dyn Decoder<Output = T>>, RegistryError> {
        self.decoders
            .read()
            .get(name)
            .and_then(|entry| entry.downcast_ref::<Arc<dyn Decoder<Output = T>>>())
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Runs the named decoder against a tree.
    ///
    /// The outer `Result` is about the registry (is there such a
    /// decoder?); the inner [`DecodeResult`] is the decode itself with its
    /// accumulated failures.
    pub fn decode<T: 'static>(
        &self,
        name: &str,
        value: &ConfigValue,
    ) -> Result<DecodeResult<T>, RegistryError> {
        let decoder = self.get::<T>(name)?;
        Ok(decoder.decode(value))
    }

    /// Whether any decoder is registered under this name.
    pub fn contains(&self, name: &str) -> bool {
        self.decoders.read().contains_key(name)
    }

    /// The number of registered decoders.
    pub fn len(&self) -> usize {
        self.decoders.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.read().is_empty()
    }
}
