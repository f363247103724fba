use super::Number;
use chrono::NaiveDate;
use core::fmt::{Display, Formatter};
use serde::Serialize;

/// A single normalized cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Tokens(Vec<String>),

    /// Cross-references to other records, kept as opaque identifiers.
    Links(Vec<String>),
    Date(NaiveDate),
}

impl FieldValue {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The value as a float, for integer and float cells.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(Number::Int(*i).as_f64()),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Tokens or links; `None` for every other kind of cell.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Tokens(items) | Self::Links(items) => Some(items),
            _ => None,
        }
    }

    /// The keys this cell contributes when used for grouping.
    ///
    /// Multi-valued cells contribute one key per token, null contributes none.
    #[must_use]
    pub fn group_keys(&self) -> Vec<String> {
        match self {
            Self::Null => Vec::new(),
            Self::Tokens(items) | Self::Links(items) => items.clone(),
            _ => vec![self.to_string()],
        }
    }
}

impl From<Number> for FieldValue {
    fn from(number: Number) -> Self {
        match number {
            Number::Int(i) => Self::Int(i),
            Number::Float(f) => Self::Float(f),
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Tokens(items) | Self::Links(items) => write!(f, "{}", items.join(", ")),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}
