use super::{Description, correlation, describe, distribution_counts, group_mean, top_n};
use crate::Result;
use crate::normalize::{Row, Table};
use serde::Serialize;
use std::collections::BTreeMap;

/// A summary request, as issued by the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregation {
    TopN { field: String, n: usize },
    GroupMean { group: String, value: String },
    Distribution { field: String },
    Correlation { field_a: String, field_b: String },
    Describe { field: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// The result of an [`Aggregation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Summary {
    Ranked { field: String, rows: Vec<Row> },
    GroupMeans { group: String, value: String, means: BTreeMap<String, f64> },
    Distribution { field: String, counts: Vec<ValueCount> },
    Correlation { field_a: String, field_b: String, coefficient: Option<f64> },
    Description(Description),
}

/// Runs one aggregation over a table.
pub fn aggregate(table: &Table, request: &Aggregation) -> Result<Summary> {
    Ok(match request {
        Aggregation::TopN { field, n } => Summary::Ranked {
            field: field.clone(),
            rows: top_n(table, field, *n)?.into_iter().cloned().collect(),
        },
        Aggregation::GroupMean { group, value } => Summary::GroupMeans {
            group: group.clone(),
            value: value.clone(),
            means: group_mean(table, group, value)?,
        },
        Aggregation::Distribution { field } => Summary::Distribution {
            field: field.clone(),
            counts: distribution_counts(table, field)?
                .into_iter()
                .map(|(value, count)| ValueCount { value, count })
                .collect(),
        },
        Aggregation::Correlation { field_a, field_b } => Summary::Correlation {
            field_a: field_a.clone(),
            field_b: field_b.clone(),
            coefficient: correlation(table, field_a, field_b)?,
        },
        Aggregation::Describe { field } => Summary::Description(describe(table, field)?),
    })
}
