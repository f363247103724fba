use super::FieldValue;
use crate::facts::Catalog;
use chrono::NaiveDate;
use core::fmt::{Display, Formatter};

/// How a raw field is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, kept as-is after trimming.
    Text,

    /// A categorical label, lowercased and mapped through `(alias, canonical)` pairs.
    Category(&'static [(&'static str, &'static str)]),

    Integer,
    Float,

    /// A comma-separated multi-valued attribute.
    Tokens,

    /// A single cross-reference.
    Link,

    /// A list of cross-references.
    Links,

    /// An ISO-8601 calendar date.
    Date,
}

impl FieldKind {
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Category(_) => "category",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Tokens => "tokens",
            Self::Link => "link",
            Self::Links => "links",
            Self::Date => "date",
        }
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// What happens to a sentinel in a non-numeric field. Numeric fields always null sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentinelPolicy {
    /// Keep the placeholder as an ordinary value, so it can be counted.
    Keep,

    /// Treat the placeholder as a missing value.
    Null,
}

/// A field read straight from the raw record.
#[derive(Debug)]
pub struct FieldDef {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: FieldKind,
    pub sentinels: SentinelPolicy,
}

/// A column computed from the already-normalized columns of the same record.
#[derive(Debug)]
pub struct DerivedDef {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: FieldKind,
    pub compute: fn(&RecordValues<'_>) -> FieldValue,
}

/// The full column layout of one catalog's table.
#[derive(Debug)]
pub struct Schema {
    pub catalog: Catalog,
    pub fields: &'static [FieldDef],
    pub derived: &'static [DerivedDef],
}

/// Column metadata, independent of whether the column is raw or derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: FieldKind,
    pub derived: bool,
}

impl Schema {
    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.fields.len() + self.derived.len()
    }

    /// All columns: raw fields first, then derived columns, in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = Column> {
        let raw = self.fields.iter().map(|f| Column {
            name: f.name,
            description: f.description,
            kind: f.kind,
            derived: false,
        });
        let derived = self.derived.iter().map(|d| Column {
            name: d.name,
            description: d.description,
            kind: d.kind,
            derived: true,
        });
        raw.chain(derived)
    }

    /// Looks up a column by name, returning its position.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<(usize, Column)> {
        self.columns().enumerate().find(|(_, c)| c.name == name)
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns().map(|c| c.name).collect()
    }
}

/// Read access to the columns of a record computed so far.
#[derive(Debug)]
pub struct RecordValues<'a> {
    schema: &'static Schema,
    values: &'a [FieldValue],
}

impl<'a> RecordValues<'a> {
    #[must_use]
    pub const fn new(schema: &'static Schema, values: &'a [FieldValue]) -> Self {
        Self { schema, values }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a FieldValue> {
        let (index, _) = self.schema.column(name)?;
        self.values.get(index)
    }

    /// Numeric value of a column, widening integers.
    #[must_use]
    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_f64)
    }

    #[must_use]
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_i64)
    }

    #[must_use]
    pub fn text(&self, name: &str) -> Option<&'a str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    #[must_use]
    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        self.get(name).and_then(FieldValue::as_date)
    }

    /// Number of entries in a list column; null counts as empty.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.get(name).and_then(FieldValue::as_list).map_or(0, <[String]>::len)
    }
}

macro_rules! field {
    ($name:expr, $description:expr, $kind:expr) => {
        FieldDef {
            name: $name,
            description: $description,
            kind: $kind,
            sentinels: SentinelPolicy::Keep,
        }
    };
    ($name:expr, $description:expr, $kind:expr, $sentinels:ident) => {
        FieldDef {
            name: $name,
            description: $description,
            kind: $kind,
            sentinels: SentinelPolicy::$sentinels,
        }
    };
}

macro_rules! derived {
    ($name:expr, $description:expr, $kind:expr, $compute:expr) => {
        DerivedDef {
            name: $name,
            description: $description,
            kind: $kind,
            compute: $compute,
        }
    };
}

pub(crate) use {derived, field};
