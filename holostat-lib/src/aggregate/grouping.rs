use crate::Result;
use crate::normalize::{FieldValue, Table};
use std::collections::{BTreeMap, HashMap};

/// Mean of a numeric column per distinct value of a grouping column.
///
/// A multi-valued grouping cell puts its row into every group it names.
/// Rows with a null value or null group are skipped, so a group only appears
/// when at least one row contributed a value to it.
pub fn group_mean(table: &Table, group_field: &str, value_field: &str) -> Result<BTreeMap<String, f64>> {
    let (group_index, _) = table.column(group_field)?;
    let (value_index, _) = table.numeric_column(value_field)?;

    let mut sums: BTreeMap<String, (f64, u32)> = BTreeMap::new();
    for row in table.rows() {
        let Some(value) = row.value(value_index).and_then(FieldValue::as_f64) else {
            continue;
        };

        let keys = row.value(group_index).map(FieldValue::group_keys).unwrap_or_default();
        for key in keys {
            let entry = sums.entry(key).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    Ok(sums.into_iter().map(|(key, (sum, count))| (key, sum / f64::from(count))).collect())
}

/// How many rows carry each distinct value of a column, most frequent first.
///
/// Ties are ordered by value. Multi-valued cells count once per token.
pub fn distribution_counts(table: &Table, field: &str) -> Result<Vec<(String, usize)>> {
    let (index, _) = table.column(field)?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for row in table.rows() {
        for key in row.value(index).map(FieldValue::group_keys).unwrap_or_default() {
            *counts.entry(key).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|(key_a, count_a), (key_b, count_b)| count_b.cmp(count_a).then_with(|| key_a.cmp(key_b)));
    Ok(counts)
}
