//! MeasValues value encoding.
//!
//! TRACK-IT stores raw measurement values as base64 text of their binary
//! representation:
//!
//! | Declared type       | Bytes                                  |
//! |---------------------|----------------------------------------|
//! | `String`            | UTF-8                                  |
//! | `Double`            | 8-byte little-endian IEEE-754 double   |
//! | `Long`, `Boolean`   | 8-byte little-endian signed integer    |
//!
//! Rust strings are always valid UTF-8, so text never needs replacement on
//! the way to bytes. The base64 text is mapped back to characters as ASCII,
//! with any non-ASCII byte written as an XML numeric character reference.

use std::fmt::Write as _;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

use trackit_model::{RecordValue, ValueKind, ValueType};

/// Width of packed numeric values.
pub const PACKED_WIDTH: usize = 8;

/// Failures of the value encoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("unsupported value type '{0}'")]
    UnsupportedType(String),

    #[error("value '{value}' is not a valid {value_type}")]
    InvalidValue { value: String, value_type: String },

    #[error("malformed encoded value: {0}")]
    Malformed(String),
}

impl EncodeError {
    fn invalid(value: &RecordValue, value_type: &ValueType) -> Self {
        Self::InvalidValue {
            value: value.literal(),
            value_type: value_type.as_str().to_string(),
        }
    }
}

/// Encode a value as the base64 text embedded in `<Values>`.
///
/// # Errors
///
/// Fails when the declared type is not encodable or the value cannot be
/// converted to it.
pub fn encode_value(value: &RecordValue, value_type: &ValueType) -> Result<String, EncodeError> {
    let bytes = pack_value(value, value_type)?;
    Ok(to_base64_text(&bytes))
}

/// Pack a value into its binary representation.
pub fn pack_value(value: &RecordValue, value_type: &ValueType) -> Result<Vec<u8>, EncodeError> {
    match value_type.kind() {
        ValueKind::String => Ok(value.literal().into_bytes()),
        ValueKind::Double => {
            let number = as_f64(value).ok_or_else(|| EncodeError::invalid(value, value_type))?;
            Ok(number.to_le_bytes().to_vec())
        }
        ValueKind::Long | ValueKind::Boolean => {
            let number = as_i64(value).ok_or_else(|| EncodeError::invalid(value, value_type))?;
            Ok(number.to_le_bytes().to_vec())
        }
        ValueKind::Other => Err(EncodeError::UnsupportedType(
            value_type.as_str().to_string(),
        )),
    }
}

/// Standard base64 of `bytes`, as text.
pub fn to_base64_text(bytes: &[u8]) -> String {
    let encoded = STANDARD.encode(bytes);
    ascii_with_char_refs(encoded.as_bytes())
}

/// Map bytes to ASCII text, replacing non-ASCII bytes with `&#N;`.
pub fn ascii_with_char_refs(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for &byte in bytes {
        if byte.is_ascii() {
            text.push(char::from(byte));
        } else {
            let _ = write!(text, "&#{byte};");
        }
    }
    text
}

/// Decode `<Values>` text back into a value of the declared type.
///
/// Long and Boolean values decode to [`RecordValue::Integer`].
pub fn decode_value(encoded: &str, value_type: &ValueType) -> Result<RecordValue, EncodeError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|err| EncodeError::Malformed(err.to_string()))?;
    match value_type.kind() {
        ValueKind::String => String::from_utf8(bytes)
            .map(RecordValue::Text)
            .map_err(|err| EncodeError::Malformed(err.to_string())),
        ValueKind::Double => Ok(RecordValue::Number(f64::from_le_bytes(packed(&bytes)?))),
        ValueKind::Long | ValueKind::Boolean => {
            Ok(RecordValue::Integer(i64::from_le_bytes(packed(&bytes)?)))
        }
        ValueKind::Other => Err(EncodeError::UnsupportedType(
            value_type.as_str().to_string(),
        )),
    }
}

fn packed(bytes: &[u8]) -> Result<[u8; PACKED_WIDTH], EncodeError> {
    bytes.try_into().map_err(|_| {
        EncodeError::Malformed(format!(
            "expected {PACKED_WIDTH} bytes, found {}",
            bytes.len()
        ))
    })
}

fn as_f64(value: &RecordValue) -> Option<f64> {
    match value {
        RecordValue::Number(number) => Some(*number),
        RecordValue::Integer(number) => Some(*number as f64),
        RecordValue::Boolean(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        RecordValue::Text(text) => text.trim().parse().ok(),
    }
}

/// Integral floats are accepted; fractional ones are rejected.
fn as_i64(value: &RecordValue) -> Option<i64> {
    match value {
        RecordValue::Integer(number) => Some(*number),
        RecordValue::Boolean(flag) => Some(i64::from(*flag)),
        RecordValue::Number(number) => integral(*number),
        RecordValue::Text(text) => {
            let trimmed = text.trim();
            trimmed
                .parse()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(integral))
        }
    }
}

fn integral(number: f64) -> Option<i64> {
    let in_range = number >= i64::MIN as f64 && number < i64::MAX as f64;
    (number.is_finite() && number.fract() == 0.0 && in_range).then_some(number as i64)
}
