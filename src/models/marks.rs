//! Marks value
//!
//! The store does not enforce a numeric type on the `marks` column, so a value
//! read back may be a number, arbitrary text, or NULL. `Marks` keeps all three
//! so that a row with bad marks still shows up in listings while statistics
//! can skip it.

use std::fmt;

use rusqlite::types::Value;
use serde::{Serialize, Serializer};

/// Lowest accepted mark at input time
pub const MIN_MARKS: f64 = 0.0;

/// Highest accepted mark at input time
pub const MAX_MARKS: f64 = 100.0;

/// A stored marks value
#[derive(Debug, Clone, PartialEq)]
pub enum Marks {
    /// A numeric score
    Score(f64),
    /// Text that does not parse as a number
    Unparsed(String),
    /// NULL or empty
    Missing,
}

impl Marks {
    /// The numeric value, if there is one
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Score(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    /// Coerce free text into marks; anything non-numeric is kept as `Unparsed`
    pub fn coerce(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Self::Score(v),
            _ => Self::Unparsed(trimmed.to_string()),
        }
    }

    /// Build marks from a value read out of the store
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::Integer(i) => Self::Score(*i as f64),
            Value::Real(f) => Self::Score(*f),
            Value::Text(s) => Self::coerce(s),
            Value::Blob(b) => Self::Unparsed(String::from_utf8_lossy(b).into_owned()),
        }
    }

    /// Convert to a bind value for a statement
    pub fn to_value(&self) -> Value {
        match self {
            Self::Score(v) => Value::Real(*v),
            Self::Unparsed(s) => Value::Text(s.clone()),
            Self::Missing => Value::Null,
        }
    }
}

impl From<f64> for Marks {
    fn from(value: f64) -> Self {
        Self::Score(value)
    }
}

impl fmt::Display for Marks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // same spelling the backup writer uses, so 85.0 shows as "85.0"
            Self::Score(v) => write!(f, "{:?}", v),
            Self::Unparsed(s) => write!(f, "{}", s),
            Self::Missing => Ok(()),
        }
    }
}

impl Serialize for Marks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Score(v) => serializer.serialize_f64(*v),
            Self::Unparsed(s) => serializer.serialize_str(s),
            Self::Missing => serializer.serialize_none(),
        }
    }
}
