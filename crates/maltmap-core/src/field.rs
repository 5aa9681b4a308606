//! Loosely typed cell values as they arrive from the review table.
//!
//! Review exports mix numbers, free text, and blanks in the same column, so
//! every price and rating is carried as a [`FieldValue`] and interpreted
//! explicitly by the aggregation code.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Numeric shapes a spreadsheet export produces: optional sign, integer or
/// decimal digits, optional exponent, surrounding whitespace.
static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-?(\d+\.?|\.\d+|\d+\.\d+)([eE][-+]?\d+)?\s*$").expect("valid regex")
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Numeric(f64),
    Text(String),
    Missing,
}

impl FieldValue {
    /// Infers a value from a raw cell.
    ///
    /// Blank cells become [`FieldValue::Missing`], numeric-looking cells become
    /// [`FieldValue::Numeric`], everything else is kept verbatim as text.
    #[must_use]
    pub fn infer(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::Missing;
        }

        match parse_numeric(raw) {
            Some(n) => Self::Numeric(n),
            None => Self::Text(raw.to_owned()),
        }
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Returns the value as a finite number when it is one, or when it is
    /// text that reads as one.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Numeric(n) if n.is_finite() => Some(*n),
            Self::Numeric(_) | Self::Missing => None,
            Self::Text(s) => parse_numeric(s),
        }
    }

    /// Returns the raw text of a non-numeric value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Numeric(_) | Self::Missing => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Numeric(n) => write!(f, "{n}"),
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Missing => Ok(()),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

fn parse_numeric(raw: &str) -> Option<f64> {
    if !NUMERIC_RE.is_match(raw) {
        return None;
    }
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
