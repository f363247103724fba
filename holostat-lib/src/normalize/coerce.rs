//! Turns loosely formatted API values into numbers.
//!
//! The API reports most numbers as strings, sometimes with thousands separators,
//! and uses placeholder words when a value is not known. Anything that cannot be
//! read as a finite number of the requested kind becomes `None`.

use super::SentinelSet;
use serde_json::Value;

/// The numeric interpretation requested for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Integer,
    Float,
}

/// A successfully coerced number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "catalog integers are far below 2^53")]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }
}

/// Coerce a raw field value.
///
/// `None`, JSON null, booleans, arrays and objects all yield `None`.
#[must_use]
pub fn coerce(value: Option<&Value>, kind: NumericKind, sentinels: &SentinelSet) -> Option<Number> {
    match value? {
        Value::String(s) => coerce_str(s, kind, sentinels),
        Value::Number(n) => coerce_json_number(n, kind),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerce a textual value: sentinels give `None`, commas are stripped, whitespace is trimmed.
#[must_use]
pub fn coerce_str(text: &str, kind: NumericKind, sentinels: &SentinelSet) -> Option<Number> {
    if sentinels.contains(text) {
        return None;
    }

    let cleaned: String = text.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    match kind {
        NumericKind::Integer => cleaned.parse::<i64>().ok().map(Number::Int),
        NumericKind::Float => cleaned.parse::<f64>().ok().filter(|f| f.is_finite()).map(Number::Float),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "only whole values within i64 range reach the cast"
)]
fn coerce_json_number(n: &serde_json::Number, kind: NumericKind) -> Option<Number> {
    match kind {
        NumericKind::Integer => {
            if let Some(i) = n.as_i64() {
                return Some(Number::Int(i));
            }

            let f = n.as_f64()?;
            (f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then(|| Number::Int(f as i64))
        }
        NumericKind::Float => n.as_f64().filter(|f| f.is_finite()).map(Number::Float),
    }
}
