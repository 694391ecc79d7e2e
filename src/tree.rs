//! The configuration tree consumed by decoders.
//!
//! This module provides [`ConfigValue`], an immutable tree of objects,
//! arrays and scalars, each node optionally carrying a [`ConfigOrigin`]
//! (source identifier plus 1-based line number) supplied by whatever
//! loader produced the tree. The crate only ever reads these trees.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::Value;

/// Where a configuration node came from.
///
/// Loaders that know their input attach one of these per node; decoders
/// carry it into failures so reports can point at the offending line.
/// "No location available" is a valid state everywhere an origin appears.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigOrigin {
    source: String,
    line: u32,
}

impl ConfigOrigin {
    /// Creates an origin from a source identifier and a 1-based line number.
    pub fn new(source: impl Into<String>, line: u32) -> Self {
        Self {
            source: source.into(),
            line,
        }
    }

    /// The source identifier (file path, URL, resource name).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The 1-based line number within the source.
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.line)
    }
}

/// The shape of a configuration node, used in wrong-type failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigValueType {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl Display for ConfigValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigValueType::Object => "OBJECT",
            ConfigValueType::Array => "ARRAY",
            ConfigValueType::String => "STRING",
            ConfigValueType::Number => "NUMBER",
            ConfigValueType::Boolean => "BOOLEAN",
            ConfigValueType::Null => "NULL",
        };
        write!(f, "{}", name)
    }
}

/// The payload of a configuration node.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    /// Key/value mapping with insertion order preserved.
    Object(IndexMap<String, ConfigValue>),
    /// Ordered sequence of nodes.
    Array(Vec<ConfigValue>),
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

/// An immutable node in a configuration tree.
///
/// Trees are owned by the caller and only read here. Every node may carry
/// an optional [`ConfigOrigin`]; trees converted from `serde_json::Value`
/// carry none.
///
/// # Example
///
/// ```rust
/// use decant::ConfigValue;
/// use serde_json::json;
///
/// let tree = ConfigValue::from(json!({"host": "localhost", "port": 8080}));
/// let obj = tree.as_object().unwrap();
/// assert_eq!(obj.get("host").and_then(|v| v.as_str()), Some("localhost"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValue {
    kind: ValueKind,
    origin: Option<ConfigOrigin>,
}

impl ConfigValue {
    /// Creates an object node from key/value entries, preserving order.
    pub fn object(entries: impl IntoIterator<Item = (String, ConfigValue)>) -> Self {
        Self::from_kind(ValueKind::Object(entries.into_iter().collect()))
    }

    /// Creates an array node.
    pub fn array(items: impl IntoIterator<Item = ConfigValue>) -> Self {
        Self::from_kind(ValueKind::Array(items.into_iter().collect()))
    }

    /// Creates a string node.
    pub fn string(value: impl Into<String>) -> Self {
        Self::from_kind(ValueKind::String(value.into()))
    }

    /// Creates a number node.
    pub fn number(value: f64) -> Self {
        Self::from_kind(ValueKind::Number(value))
    }

    /// Creates a boolean node.
    pub fn boolean(value: bool) -> Self {
        Self::from_kind(ValueKind::Boolean(value))
    }

    /// Creates a null node.
    pub fn null() -> Self {
        Self::from_kind(ValueKind::Null)
    }

    fn from_kind(kind: ValueKind) -> Self {
        Self { kind, origin: None }
    }

    /// Attaches a source origin and returns self for chaining.
    pub fn with_origin(mut self, origin: ConfigOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// The node payload.
    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// The node's source origin, if the loader supplied one.
    pub fn origin(&self) -> Option<&ConfigOrigin> {
        self.origin.as_ref()
    }

    /// The shape tag for this node.
    pub fn value_type(&self) -> ConfigValueType {
        match &self.kind {
            ValueKind::Object(_) => ConfigValueType::Object,
            ValueKind::Array(_) => ConfigValueType::Array,
            ValueKind::String(_) => ConfigValueType::String,
            ValueKind::Number(_) => ConfigValueType::Number,
            ValueKind::Boolean(_) => ConfigValueType::Boolean,
            ValueKind::Null => ConfigValueType::Null,
        }
    }

    /// Returns the object entries if this node is an object.
    pub fn as_object(&self) -> Option<&IndexMap<String, ConfigValue>> {
        match &self.kind {
            ValueKind::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the array items if this node is an array.
    pub fn as_array(&self) -> Option<&[ConfigValue]> {
        match &self.kind {
            ValueKind::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the string payload if this node is a string.
    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric payload if this node is a number.
    pub fn as_number(&self) -> Option<f64> {
        match &self.kind {
            ValueKind::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean payload if this node is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match &self.kind {
            ValueKind::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns true if this node is null.
    pub fn is_null(&self) -> bool {
        matches!(self.kind, ValueKind::Null)
    }
}

impl From<Value> for ConfigValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ConfigValue::null(),
            Value::Bool(b) => ConfigValue::boolean(b),
            // as_f64 covers every number serde_json produces without the
            // arbitrary_precision feature.
            Value::Number(n) => ConfigValue::number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => ConfigValue::string(s),
            Value::Array(items) => ConfigValue::array(items.into_iter().map(ConfigValue::from)),
            Value::Object(entries) => {
                ConfigValue::object(entries.into_iter().map(|(k, v)| (k, ConfigValue::from(v))))
            }
        }
    }
}

// ConfigValue is Send + Sync since all fields are owned types. Independent
// decode calls over shared trees rely on this staying true.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ConfigValue>();
    assert_sync::<ConfigValue>();
};
