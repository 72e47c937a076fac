//! Scalar field values

use std::fmt;

use serde::{Deserialize, Serialize};

/// An owned scalar value as it arrives from the record source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Null,
}

impl FieldValue {
    /// Borrowed view used by the engine stages
    pub fn as_value_ref(&self) -> ValueRef<'_> {
        match self {
            FieldValue::Number(n) => ValueRef::Number(*n),
            FieldValue::Text(s) => ValueRef::Text(s),
            FieldValue::Bool(b) => ValueRef::Bool(*b),
            FieldValue::Null => ValueRef::Null,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_value_ref().fmt(f)
    }
}

/// A borrowed scalar value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRef<'a> {
    Number(f64),
    Text(&'a str),
    Bool(bool),
    Null,
}

impl<'a> ValueRef<'a> {
    /// Returns the text if this is a string value
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            ValueRef::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a numeric value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ValueRef::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String form used for free-text search and coerced comparison.
    ///
    /// Integral numbers have no fractional part (`100`, not `100.0`).
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueRef::Number(n) => write!(f, "{}", n),
            ValueRef::Text(s) => f.write_str(s),
            ValueRef::Bool(b) => write!(f, "{}", b),
            ValueRef::Null => f.write_str("null"),
        }
    }
}
