//! Record values and declared value types.
//!
//! Source tables are loosely typed: a cell may hold text, an integer, a float
//! or a boolean, and the declared type column is free text ("Double",
//! "Boolean", "Modality", ...). These types keep the declared text verbatim
//! for output while classifying it once for encoding decisions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell value from a record table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecordValue {
    /// Text as read from the source (already whitespace-trimmed).
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Floating-point number.
    Number(f64),
    /// Native boolean.
    Boolean(bool),
}

impl RecordValue {
    /// Create a text value.
    pub fn text(value: impl Into<String>) -> Self {
        RecordValue::Text(value.into())
    }

    /// Returns true for the empty text value, which marks a record as skipped.
    pub fn is_blank(&self) -> bool {
        matches!(self, RecordValue::Text(text) if text.is_empty())
    }

    /// Returns the text when this is a textual value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RecordValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Returns true when the value is numeric zero or `false`.
    ///
    /// Text is never considered zero.
    pub fn is_zero(&self) -> bool {
        match self {
            RecordValue::Integer(value) => *value == 0,
            RecordValue::Number(value) => *value == 0.0,
            RecordValue::Boolean(value) => !*value,
            RecordValue::Text(_) => false,
        }
    }

    /// Literal string form, as written into parameter and analysis values.
    pub fn literal(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordValue::Text(text) => f.write_str(text),
            RecordValue::Integer(value) => write!(f, "{value}"),
            RecordValue::Number(value) => f.write_str(&format_number(*value)),
            RecordValue::Boolean(true) => f.write_str("True"),
            RecordValue::Boolean(false) => f.write_str("False"),
        }
    }
}

impl From<&str> for RecordValue {
    fn from(value: &str) -> Self {
        RecordValue::Text(value.to_string())
    }
}

impl From<String> for RecordValue {
    fn from(value: String) -> Self {
        RecordValue::Text(value)
    }
}

impl From<i64> for RecordValue {
    fn from(value: i64) -> Self {
        RecordValue::Integer(value)
    }
}

impl From<f64> for RecordValue {
    fn from(value: f64) -> Self {
        RecordValue::Number(value)
    }
}

impl From<bool> for RecordValue {
    fn from(value: bool) -> Self {
        RecordValue::Boolean(value)
    }
}

/// Integral floats keep one fractional digit (`20.0`), matching how
/// spreadsheet numbers are rendered by the source templates.
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Classification of a declared value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// UTF-8 text.
    String,
    /// 8-byte IEEE-754 double.
    Double,
    /// 8-byte signed integer.
    Long,
    /// Boolean carried as an 8-byte signed integer (0, 1 or 2).
    Boolean,
    /// Any other declared type (e.g. "Modality"). Valid for data types and
    /// parameters, not encodable as a measurement value.
    Other,
}

impl ValueKind {
    /// Classify declared type text (case-insensitive, surrounding whitespace ignored).
    pub fn classify(declared: &str) -> Self {
        let normalized = declared.trim().to_lowercase();
        match normalized.as_str() {
            "string" => ValueKind::String,
            "double" => ValueKind::Double,
            "long" => ValueKind::Long,
            "boolean" => ValueKind::Boolean,
            _ => ValueKind::Other,
        }
    }
}

/// A declared value type: the original text plus its classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ValueType {
    declared: String,
    kind: ValueKind,
}

impl ValueType {
    /// Wrap declared type text.
    pub fn new(declared: impl Into<String>) -> Self {
        let declared = declared.into();
        let kind = ValueKind::classify(&declared);
        Self { declared, kind }
    }

    /// The declared text, unchanged.
    pub fn as_str(&self) -> &str {
        &self.declared
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Declared type mentions "bool" anywhere (case-insensitive).
    pub fn is_boolean_like(&self) -> bool {
        self.declared.to_lowercase().contains("bool")
    }

    /// Declared type mentions "long" anywhere (case-insensitive).
    pub fn is_long_like(&self) -> bool {
        self.declared.to_lowercase().contains("long")
    }

    /// Whether values of this type can be binary-encoded for MeasData.
    pub fn is_encodable(&self) -> bool {
        self.kind != ValueKind::Other
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.declared)
    }
}

impl From<String> for ValueType {
    fn from(value: String) -> Self {
        ValueType::new(value)
    }
}

impl From<&str> for ValueType {
    fn from(value: &str) -> Self {
        ValueType::new(value)
    }
}

impl From<ValueType> for String {
    fn from(value: ValueType) -> Self {
        value.declared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_only_empty_text() {
        assert!(RecordValue::text("").is_blank());
        assert!(!RecordValue::text(" ").is_blank());
        assert!(!RecordValue::Integer(0).is_blank());
    }

    #[test]
    fn literal_forms() {
        assert_eq!(RecordValue::text("20.5").literal(), "20.5");
        assert_eq!(RecordValue::Integer(-3).literal(), "-3");
        assert_eq!(RecordValue::Number(20.5).literal(), "20.5");
        assert_eq!(RecordValue::Number(20.0).literal(), "20.0");
        assert_eq!(RecordValue::Boolean(true).literal(), "True");
        assert_eq!(RecordValue::Boolean(false).literal(), "False");
    }

    #[test]
    fn classify_is_case_insensitive_exact() {
        assert_eq!(ValueKind::classify("Double"), ValueKind::Double);
        assert_eq!(ValueKind::classify(" LONG "), ValueKind::Long);
        assert_eq!(ValueKind::classify("boolean"), ValueKind::Boolean);
        assert_eq!(ValueKind::classify("String"), ValueKind::String);
        assert_eq!(ValueKind::classify("Bool"), ValueKind::Other);
        assert_eq!(ValueKind::classify("Modality"), ValueKind::Other);
    }

    #[test]
    fn substring_helpers() {
        let bool_type = ValueType::new("Bool");
        assert!(bool_type.is_boolean_like());
        assert!(!bool_type.is_encodable());

        let long_type = ValueType::new("LongInteger");
        assert!(long_type.is_long_like());
        assert_eq!(long_type.as_str(), "LongInteger");
    }

    #[test]
    fn zero_detection() {
        assert!(RecordValue::Integer(0).is_zero());
        assert!(RecordValue::Number(0.0).is_zero());
        assert!(RecordValue::Boolean(false).is_zero());
        assert!(!RecordValue::text("0").is_zero());
        assert!(!RecordValue::Integer(5).is_zero());
    }
}
