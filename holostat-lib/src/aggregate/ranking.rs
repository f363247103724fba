use crate::Result;
use crate::normalize::{FieldValue, Row, Table};

/// The `n` rows with the largest values in a numeric column, largest first.
///
/// Rows whose value is null are left out. Ties keep their table order.
pub fn top_n<'a>(table: &'a Table, field: &str, n: usize) -> Result<Vec<&'a Row>> {
    let (index, _) = table.numeric_column(field)?;

    let mut ranked: Vec<(f64, &Row)> = table
        .rows()
        .iter()
        .filter_map(|row| row.value(index).and_then(FieldValue::as_f64).map(|v| (v, row)))
        .collect();

    ranked.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    ranked.truncate(n);

    Ok(ranked.into_iter().map(|(_, row)| row).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{Catalog, RawRecord};
    use crate::normalize::{SentinelSet, normalize};
    use serde_json::json;

    fn people(values: serde_json::Value) -> Table {
        let records: Vec<RawRecord> = serde_json::from_value(values).unwrap();
        normalize(Catalog::People.schema(), &records, &SentinelSet::default())
    }

    fn names<'a>(rows: &[&'a Row]) -> Vec<&'a str> {
        rows.iter().filter_map(|r| r.label()).collect()
    }

    #[test]
    fn largest_first_and_nulls_excluded() {
        let table = people(json!([
            {"name": "A", "height": "172"},
            {"name": "B", "height": "unknown"},
            {"name": "C", "height": "202"},
            {"name": "D", "height": "66"}
        ]));

        let top = top_n(&table, "height", 2).unwrap();
        assert_eq!(names(&top), ["C", "A"]);

        let all = top_n(&table, "height", 10).unwrap();
        assert_eq!(names(&all), ["C", "A", "D"]);
    }

    #[test]
    fn ties_keep_table_order() {
        let table = people(json!([
            {"name": "First", "mass": "80"},
            {"name": "Second", "mass": "80"},
            {"name": "Third", "mass": "90"}
        ]));
        let top = top_n(&table, "mass", 3).unwrap();
        assert_eq!(names(&top), ["Third", "First", "Second"]);
    }

    #[test]
    fn zero_rows_requested() {
        let table = people(json!([{"name": "A", "height": "1"}]));
        assert!(top_n(&table, "height", 0).unwrap().is_empty());
    }

    #[test]
    fn empty_table_is_not_an_error() {
        let table = people(json!([]));
        assert!(top_n(&table, "height", 3).unwrap().is_empty());
    }

    #[test]
    fn unknown_or_non_numeric_column_is_an_error() {
        let table = people(json!([{"name": "A"}]));
        let _ = top_n(&table, "wingspan", 3).unwrap_err();
        let _ = top_n(&table, "hair_color", 3).unwrap_err();
    }

    #[test]
    fn derived_columns_can_be_ranked() {
        let table = people(json!([
            {"name": "Extra", "films": ["1"]},
            {"name": "Star", "films": ["1", "2", "3"], "starships": ["x"]}
        ]));
        let top = top_n(&table, "popularity_index", 1).unwrap();
        assert_eq!(names(&top), ["Star"]);
    }
}
