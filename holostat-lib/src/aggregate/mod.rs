//! Summaries over normalized tables.
//!
//! All functions are pure: they read a [`Table`](crate::normalize::Table) and
//! fail only when asked about a column the table does not have, or for numbers
//! from a column that does not hold them.

mod aggregation;
mod grouping;
mod ranking;
mod stats;

pub use aggregation::{Aggregation, Summary, ValueCount, aggregate};
pub use grouping::{distribution_counts, group_mean};
pub use ranking::top_n;
pub use stats::{Description, correlation, describe};
