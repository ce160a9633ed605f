//! Core type definitions for panel matching

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Column holding the identity of a candidate or professor
pub const NAME_FIELD: &str = "Name";
/// The only field compared numerically
pub const YEARS_OF_EXPERIENCE: &str = "Years of Experience";

/// A single cell of a profile row
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Missing,
}

static MISSING: FieldValue = FieldValue::Missing;

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    /// Text view used by string comparisons. Missing reads as "".
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            FieldValue::Missing => Some(""),
            FieldValue::Number(_) => None,
        }
    }

    /// Whole years, as in `int(value or 0)`.
    ///
    /// Returns `None` when the value cannot be read as an integer.
    pub fn as_years(&self) -> Option<i64> {
        match self {
            FieldValue::Missing => Some(0),
            FieldValue::Text(s) if s.is_empty() => Some(0),
            FieldValue::Text(s) => s.trim().parse::<i64>().ok(),
            FieldValue::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            FieldValue::Number(_) => None,
        }
    }

    /// Numeric view used for ordering results by experience
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{}", *n as i64),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Missing => Ok(()),
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

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

/// One candidate or professor row, keyed by column name in sheet order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    fields: IndexMap<String, FieldValue>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Lookup that never fails: absent fields read as `Missing`
    pub fn get(&self, field: &str) -> &FieldValue {
        self.fields.get(field).unwrap_or(&MISSING)
    }

    pub fn name(&self) -> String {
        self.get(NAME_FIELD).to_string()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Profile {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut profile = Profile::new();
        for (k, v) in iter {
            profile.insert(k, v);
        }
        profile
    }
}

/// A professor's position in a ranked panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    #[serde(rename = "Professor")]
    pub professor: String,
    #[serde(rename = "Relevance Score")]
    pub score: f64,
    /// Tie-break key; `None` when the professor has no usable value
    #[serde(rename = "Years of Experience", serialize_with = "serialize_experience")]
    pub experience: Option<f64>,
}

fn serialize_experience<S: Serializer>(value: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(years) => s.serialize_f64(*years),
        None => s.serialize_str("N/A"),
    }
}
