//! Turning raw catalog records into typed tables.
//!
//! Each catalog has a static [`Schema`] that says how every raw field is read and
//! which columns are computed from the others. [`normalize`] applies a schema to a
//! batch of records; it never fails and never drops a record.

mod coerce;
mod field_def;
mod field_value;
mod normalizer;
pub mod schemas;
mod sentinels;
mod split;
mod table;

pub use coerce::{Number, NumericKind, coerce, coerce_str};
pub use field_def::{Column, DerivedDef, FieldDef, FieldKind, RecordValues, Schema, SentinelPolicy};
pub use field_value::FieldValue;
pub use normalizer::normalize;
pub use sentinels::{DEFAULT_SENTINELS, SentinelSet};
pub use split::split;
pub use table::{Row, Table};
