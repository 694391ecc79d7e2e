//! # Decant
//!
//! A configuration decoding library that accumulates ALL decode failures,
//! reporting every problem in a configuration tree rather than
//! short-circuiting on the first one.
//!
//! ## Overview
//!
//! Decoders walk a provenance-carrying configuration tree and turn it into
//! typed values. When several parts of the tree are wrong, every failure
//! is collected with the exact path where it occurred, so one decode run
//! tells the user about the missing key, the mistyped port and the bad
//! list entry all at once. Accumulation rides on stillwater's `Validation`
//! type.
//!
//! ## Core Types
//!
//! - [`ConfigValue`]: A configuration tree node, optionally annotated with
//!   its source file and line
//! - [`ConvertFailure`]: A single decode failure with reason, path and
//!   origin
//! - [`Failures`]: A non-empty collection of decode failures
//! - [`Decode`]: Entry point for building decoders
//! - [`DecoderRegistry`]: A thread-safe store of named decoders
//!
//! ## Example
//!
//! ```rust
//! use decant::{Decode, DecoderExt, ConfigValue};
//! use serde_json::json;
//!
//! #[derive(Debug)]
//! struct Server {
//!     host: String,
//!     port: i64,
//! }
//!
//! let decoder = Decode::record(
//!     Decode::field("host", Decode::string())
//!         .zip(Decode::field("port", Decode::int()))
//!         .map(|(host, port)| Server { host, port }),
//! );
//!
//! // A valid tree decodes.
//! let tree = ConfigValue::from(json!({"host": "localhost", "port": 8080}));
//! assert!(decant::decode(&decoder, &tree).is_ok());
//!
//! // An invalid tree reports every failure at once.
//! let tree = ConfigValue::from(json!({"host": 1}));
//! let error = decant::decode(&decoder, &tree).unwrap_err();
//! assert_eq!(error.failures().len(), 2);
//! ```

pub mod decode;
pub mod error;
pub mod naming;
pub mod path;
pub mod registry;
pub mod result;
pub mod tree;

pub use decode::{decode, decode_all, BoxDecoder, Decode, Decoder, DecoderExt, TaggedDecoder};
pub use error::{render_failures, ConvertFailure, DecodeError, FailureReason, Failures};
pub use path::{ConfigPath, PathSegment};
pub use registry::{DecoderRegistry, RegistryError};
pub use result::{sequence, DecodeResult, DecodeResultExt};
pub use tree::{ConfigOrigin, ConfigValue, ConfigValueType, ValueKind};
