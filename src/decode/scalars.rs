//! Leaf decoders for scalar nodes.

use stillwater::Validation;

use crate::decode::traits::Decoder;
use crate::decode::wrong_type;
use crate::error::{ConvertFailure, FailureReason, Failures};
use crate::result::DecodeResult;
use crate::tree::{ConfigValue, ConfigValueType};

/// Decodes a string node to `String`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringDecoder;

impl StringDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for StringDecoder {
    type Output = String;

    fn decode(&self, value: &ConfigValue) -> DecodeResult<String> {
        match value.as_str() {
            Some(s) => Validation::Success(s.to_string()),
            None => wrong_type(value, &[ConfigValueType::String]),
        }
    }
}

/// Decodes a whole-valued number node to `i64`.
///
/// A non-number node is a `WrongType`; a number that is not a whole value
/// in `i64` range is a `CannotParse`, since the node had the right shape
/// but the literal does not denote an integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntDecoder;

impl IntDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for IntDecoder {
    type Output = i64;

    fn decode(&self, value: &ConfigValue) -> DecodeResult<i64> {
        let n = match value.as_number() {
            Some(n) => n,
            None => return wrong_type(value, &[ConfigValueType::Number]),
        };

        // i64::MAX itself rounds up to 2^63 as f64, so the upper bound is
        // an exclusive comparison against 2^63.
        let message = if n.fract() != 0.0 {
            format!("{} is not a whole number", n)
        } else if n < i64::MIN as f64 || n >= 2f64.powi(63) {
            format!("{} does not fit in a 64-bit integer", n)
        } else {
            return Validation::Success(n as i64);
        };

        Validation::Failure(Failures::single(
            ConvertFailure::new(FailureReason::CannotParse { message })
                .with_origin(value.origin().cloned()),
        ))
    }
}

/// Decodes a number node to `f64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatDecoder;

impl FloatDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for FloatDecoder {
    type Output = f64;

    fn decode(&self, value: &ConfigValue) -> DecodeResult<f64> {
        match value.as_number() {
            Some(n) => Validation::Success(n),
            None => wrong_type(value, &[ConfigValueType::Number]),
        }
    }
}

/// Decodes a boolean node to `bool`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolDecoder;

impl BoolDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for BoolDecoder {
    type Output = bool;

    fn decode(&self, value: &ConfigValue) -> DecodeResult<bool> {
        match value.as_bool() {
            Some(b) => Validation::Success(b),
            None => wrong_type(value, &[ConfigValueType::Boolean]),
        }
    }
}

/// The identity decoder: succeeds with a clone of the node itself.
///
/// Useful for deferring part of a tree to a later decode pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueDecoder;

impl ValueDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for ValueDecoder {
    type Output = ConfigValue;

    fn decode(&self, value: &ConfigValue) -> DecodeResult<ConfigValue> {
        Validation::Success(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ConfigOrigin;
    use serde_json::json;

    fn decode_err<D: Decoder>(decoder: &D, value: serde_json::Value) -> Failures
    where
        D::Output: std::fmt::Debug,
    {
        decoder
            .decode(&ConfigValue::from(value))
            .into_result()
            .unwrap_err()
    }

    #[test]
    fn test_string_decoder_accepts_string() {
        let result = StringDecoder::new().decode(&ConfigValue::from(json!("hello")));
        assert_eq!(result.into_result().unwrap(), "hello");
    }

    #[test]
    fn test_string_decoder_rejects_other_kinds() {
        for value in [json!(1), json!(true), json!(null), json!([]), json!({})] {
            let failures = decode_err(&StringDecoder::new(), value);
            assert_eq!(failures.len(), 1);
            assert!(matches!(
                failures.first().reason,
                FailureReason::WrongType {
                    found: _,
                    ref expected
                } if expected == &vec![ConfigValueType::String]
            ));
        }
    }

    #[test]
    fn test_int_decoder_accepts_whole_numbers() {
        let result = IntDecoder::new().decode(&ConfigValue::from(json!(42)));
        assert_eq!(result.into_result().unwrap(), 42);

        let result = IntDecoder::new().decode(&ConfigValue::from(json!(-7)));
        assert_eq!(result.into_result().unwrap(), -7);
    }

    #[test]
    fn test_int_decoder_rejects_fractional_number_as_cannot_parse() {
        let failures = decode_err(&IntDecoder::new(), json!(1.5));
        assert_eq!(failures.len(), 1);
        assert!(matches!(
            failures.first().reason,
            FailureReason::CannotParse { .. }
        ));
    }

    #[test]
    fn test_int_decoder_rejects_number_past_i64_range() {
        // 2^63 is a whole number but one past i64::MAX; it must not
        // saturate into range.
        let failures = decode_err(&IntDecoder::new(), json!(9_223_372_036_854_775_808u64));
        assert_eq!(failures.len(), 1);
        assert!(matches!(
            failures.first().reason,
            FailureReason::CannotParse { .. }
        ));
    }

    #[test]
    fn test_int_decoder_accepts_i64_min() {
        let result = IntDecoder::new().decode(&ConfigValue::from(json!(i64::MIN)));
        assert_eq!(result.into_result().unwrap(), i64::MIN);
    }

    #[test]
    fn test_int_decoder_rejects_non_number_as_wrong_type() {
        let failures = decode_err(&IntDecoder::new(), json!("42"));
        assert!(matches!(
            failures.first().reason,
            FailureReason::WrongType { .. }
        ));
    }

    #[test]
    fn test_wrong_type_failure_carries_origin() {
        let node = ConfigValue::string("x").with_origin(ConfigOrigin::new("app.conf", 3));
        let failures = IntDecoder::new().decode(&node).into_result().unwrap_err();
        assert_eq!(
            failures.first().origin,
            Some(ConfigOrigin::new("app.conf", 3))
        );
    }

    #[test]
    fn test_float_decoder() {
        let result = FloatDecoder::new().decode(&ConfigValue::from(json!(2.5)));
        assert_eq!(result.into_result().unwrap(), 2.5);

        let failures = decode_err(&FloatDecoder::new(), json!(false));
        assert!(matches!(
            failures.first().reason,
            FailureReason::WrongType { .. }
        ));
    }

    #[test]
    fn test_bool_decoder() {
        let result = BoolDecoder::new().decode(&ConfigValue::from(json!(true)));
        assert!(result.into_result().unwrap());

        let failures = decode_err(&BoolDecoder::new(), json!("true"));
        assert!(matches!(
            failures.first().reason,
            FailureReason::WrongType { .. }
        ));
    }

    #[test]
    fn test_value_decoder_is_identity() {
        let node = ConfigValue::from(json!({"any": ["shape", 1]}));
        let result = ValueDecoder::new().decode(&node);
        assert_eq!(result.into_result().unwrap(), node);
    }
}
