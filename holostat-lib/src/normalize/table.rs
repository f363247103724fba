use super::{Column, FieldValue, Schema};
use crate::Result;
use crate::facts::Catalog;
use ohno::bail;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One normalized record.
#[derive(Debug, Clone)]
pub struct Row {
    schema: &'static Schema,
    values: Vec<FieldValue>,
}

impl Row {
    #[must_use]
    pub(crate) const fn new(schema: &'static Schema, values: Vec<FieldValue>) -> Self {
        Self { schema, values }
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        let (index, _) = self.schema.column(column)?;
        self.values.get(index)
    }

    #[must_use]
    pub fn value(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index)
    }

    #[must_use]
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// The human-readable label of the record: its `name`, or `title` for films.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.values.first().and_then(FieldValue::as_str)
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.schema, other.schema) && self.values == other.values
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.schema.columns().zip(&self.values) {
            map.serialize_entry(column.name, value)?;
        }
        map.end()
    }
}

/// The normalized form of one catalog: one row per raw record, in fetch order.
#[derive(Debug, Clone)]
pub struct Table {
    schema: &'static Schema,
    rows: Vec<Row>,
}

impl Table {
    #[must_use]
    pub(crate) const fn new(schema: &'static Schema, rows: Vec<Row>) -> Self {
        Self { schema, rows }
    }

    #[must_use]
    pub const fn schema(&self) -> &'static Schema {
        self.schema
    }

    #[must_use]
    pub const fn catalog(&self) -> Catalog {
        self.schema.catalog
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolves a column name, failing if the table has no such column.
    pub fn column(&self, name: &str) -> Result<(usize, Column)> {
        match self.schema.column(name) {
            Some(found) => Ok(found),
            None => bail!(
                "unknown column '{name}' in the {} table (available: {})",
                self.catalog(),
                self.schema.column_names().join(", ")
            ),
        }
    }

    /// Resolves a column name, failing unless the column holds numbers.
    pub fn numeric_column(&self, name: &str) -> Result<(usize, Column)> {
        let (index, column) = self.column(name)?;
        if !column.kind.is_numeric() {
            bail!("column '{name}' in the {} table holds {} values, not numbers", self.catalog(), column.kind);
        }
        Ok((index, column))
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows.serialize(serializer)
    }
}
