use crate::Result;
use crate::normalize::{FieldValue, Table};
use serde::Serialize;

/// Pearson correlation between two numeric columns.
///
/// Only rows where both values are present take part. Returns `None` when
/// fewer than two such rows exist or either column is constant over them.
pub fn correlation(table: &Table, field_a: &str, field_b: &str) -> Result<Option<f64>> {
    let (index_a, _) = table.numeric_column(field_a)?;
    let (index_b, _) = table.numeric_column(field_b)?;

    let pairs: Vec<(f64, f64)> = table
        .rows()
        .iter()
        .filter_map(|row| {
            let a = row.value(index_a).and_then(FieldValue::as_f64)?;
            let b = row.value(index_b).and_then(FieldValue::as_f64)?;
            Some((a, b))
        })
        .collect();

    Ok(pearson(&pairs))
}

#[expect(clippy::cast_precision_loss, reason = "row counts are far below 2^53")]
fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let (mut covariance, mut variance_a, mut variance_b) = (0.0, 0.0, 0.0);
    for (a, b) in pairs {
        let da = a - mean_a;
        let db = b - mean_b;
        covariance += da * db;
        variance_a += da * da;
        variance_b += db * db;
    }

    if variance_a == 0.0 || variance_b == 0.0 {
        return None;
    }

    Some((covariance / (variance_a.sqrt() * variance_b.sqrt())).clamp(-1.0, 1.0))
}

/// Summary statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Description {
    pub field: String,
    pub rows: usize,
    pub valued: usize,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Count, mean and range of a numeric column, ignoring nulls.
#[expect(clippy::cast_precision_loss, reason = "row counts are far below 2^53")]
pub fn describe(table: &Table, field: &str) -> Result<Description> {
    let (index, _) = table.numeric_column(field)?;

    let values: Vec<f64> = table
        .rows()
        .iter()
        .filter_map(|row| row.value(index).and_then(FieldValue::as_f64))
        .collect();

    let mean = (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64);
    let min = values.iter().copied().reduce(f64::min);
    let max = values.iter().copied().reduce(f64::max);

    Ok(Description {
        field: field.to_string(),
        rows: table.len(),
        valued: values.len(),
        mean,
        min,
        max,
    })
}
