use super::field_def::{FieldDef, FieldKind, RecordValues, SentinelPolicy};
use super::{FieldValue, NumericKind, Row, Schema, SentinelSet, Table, coerce, split};
use crate::facts::RawRecord;
use chrono::NaiveDate;
use serde_json::Value;

const LOG_TARGET: &str = " normalize";

/// Convert raw records into a typed table.
///
/// Every record yields exactly one row, in input order. Fields the record lacks
/// become null; unreadable values become null as well.
#[must_use]
pub fn normalize(schema: &'static Schema, records: &[RawRecord], sentinels: &SentinelSet) -> Table {
    let mut records_with_missing = 0;

    let rows: Vec<Row> = records
        .iter()
        .map(|record| {
            let (row, missing) = normalize_record(schema, record, sentinels);
            if missing > 0 {
                records_with_missing += 1;
            }
            row
        })
        .collect();

    if records_with_missing > 0 {
        log::warn!(
            target: LOG_TARGET,
            "{records_with_missing} of {} {} record(s) lacked one or more fields",
            records.len(),
            schema.catalog
        );
    }

    log::debug!(target: LOG_TARGET, "Normalized {} {} record(s)", rows.len(), schema.catalog);
    Table::new(schema, rows)
}

fn normalize_record(schema: &'static Schema, record: &RawRecord, sentinels: &SentinelSet) -> (Row, usize) {
    let mut values = Vec::with_capacity(schema.column_count());
    let mut missing = 0;

    for field in schema.fields {
        let raw = record.get(field.name);
        if raw.is_none() {
            missing += 1;
            log::trace!(target: LOG_TARGET, "{} record lacks field '{}'", schema.catalog, field.name);
        }
        values.push(read_field(field, raw, sentinels));
    }

    for def in schema.derived {
        let value = (def.compute)(&RecordValues::new(schema, &values));
        values.push(value);
    }

    (Row::new(schema, values), missing)
}

fn read_field(field: &FieldDef, raw: Option<&Value>, sentinels: &SentinelSet) -> FieldValue {
    match field.kind {
        FieldKind::Integer => coerce(raw, NumericKind::Integer, sentinels).map_or(FieldValue::Null, FieldValue::from),
        FieldKind::Float => coerce(raw, NumericKind::Float, sentinels).map_or(FieldValue::Null, FieldValue::from),
        FieldKind::Text | FieldKind::Link => read_text(raw, field.sentinels, sentinels).map_or(FieldValue::Null, FieldValue::Text),
        FieldKind::Category(aliases) => read_text(raw, field.sentinels, sentinels)
            .map_or(FieldValue::Null, |text| FieldValue::Text(canonical_category(&text, aliases))),
        FieldKind::Tokens => read_text(raw, field.sentinels, sentinels).map_or(FieldValue::Null, |text| FieldValue::Tokens(split(&text))),
        FieldKind::Links => match raw {
            Some(Value::Array(items)) => FieldValue::Links(items.iter().filter_map(Value::as_str).map(ToString::to_string).collect()),
            _ => FieldValue::Null,
        },
        FieldKind::Date => read_text(raw, SentinelPolicy::Null, sentinels)
            .and_then(|text| NaiveDate::parse_from_str(&text, "%Y-%m-%d").ok())
            .map_or(FieldValue::Null, FieldValue::Date),
    }
}

fn read_text(raw: Option<&Value>, policy: SentinelPolicy, sentinels: &SentinelSet) -> Option<String> {
    let text = match raw? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => return None,
    };

    if text.is_empty() || (policy == SentinelPolicy::Null && sentinels.contains(&text)) {
        return None;
    }

    Some(text)
}

fn canonical_category(text: &str, aliases: &[(&str, &str)]) -> String {
    let lowered = text.to_lowercase();
    aliases
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map_or(lowered, |(_, canonical)| (*canonical).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::schemas::{FILMS, PEOPLE, PLANETS, STARSHIPS, VEHICLES};
    use serde_json::json;

    fn records(values: Value) -> Vec<RawRecord> {
        serde_json::from_value(values).unwrap()
    }

    fn float(row: &Row, column: &str) -> Option<f64> {
        row.get(column).and_then(FieldValue::as_f64)
    }

    #[test]
    fn row_count_matches_record_count() {
        let input = records(json!([{"name": "Tatooine"}, {}, {"name": "Hoth", "unexpected": true}]));
        let table = normalize(&PLANETS, &input, &SentinelSet::default());
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[1].get("name"), Some(&FieldValue::Null));
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let table = normalize(&PLANETS, &[], &SentinelSet::default());
        assert!(table.is_empty());
        assert_eq!(table.catalog(), crate::facts::Catalog::Planets);
    }

    #[test]
    fn planet_fields_are_typed() {
        let input = records(json!([{
            "name": "Tatooine",
            "rotation_period": "23",
            "diameter": "10465",
            "climate": "arid",
            "terrain": "desert, canyons",
            "surface_water": "1",
            "population": "200000",
            "residents": ["https://swapi.dev/api/people/1/"],
            "films": []
        }]));
        let table = normalize(&PLANETS, &input, &SentinelSet::default());
        let row = &table.rows()[0];

        assert_eq!(float(row, "diameter"), Some(10465.0));
        assert_eq!(row.get("population"), Some(&FieldValue::Int(200_000)));
        assert_eq!(row.get("climate"), Some(&FieldValue::Tokens(vec!["arid".into()])));
        assert_eq!(row.get("terrain"), Some(&FieldValue::Tokens(vec!["desert".into(), "canyons".into()])));
        assert_eq!(row.get("residents").and_then(FieldValue::as_list).map(<[String]>::len), Some(1));
        assert_eq!(row.get("films"), Some(&FieldValue::Links(Vec::new())));
        assert_eq!(row.get("orbital_period"), Some(&FieldValue::Null));
    }

    #[test]
    fn numeric_sentinels_become_null_but_text_sentinels_are_kept() {
        let input = records(json!([{"name": "Yoda", "height": "66", "mass": "unknown", "hair_color": "n/a", "gender": "n/a", "birth_year": "unknown"}]));
        let table = normalize(&PEOPLE, &input, &SentinelSet::default());
        let row = &table.rows()[0];

        assert_eq!(row.get("mass"), Some(&FieldValue::Null));
        assert_eq!(row.get("hair_color"), Some(&FieldValue::Tokens(vec!["n/a".into()])));
        assert_eq!(row.get("gender"), Some(&FieldValue::Text("n/a".into())));
        assert_eq!(row.get("birth_year"), Some(&FieldValue::Null));
    }

    #[test]
    fn categories_are_lowercased_and_aliased() {
        let input = records(json!([{"name": "Wookie", "classification": "Mammals"}, {"name": "Trandoshan", "classification": "reptilian"}]));
        let table = normalize(crate::facts::Catalog::Species.schema(), &input, &SentinelSet::default());
        assert_eq!(table.rows()[0].get("classification"), Some(&FieldValue::Text("mammal".into())));
        assert_eq!(table.rows()[1].get("classification"), Some(&FieldValue::Text("reptile".into())));
    }

    #[test]
    fn vehicle_capacity_columns() {
        let input = records(json!([
            {"name": "Sand Crawler", "crew": "46", "passengers": "30", "cost_in_credits": "150000", "cargo_capacity": "50000"},
            {"name": "Ghost", "crew": "0", "passengers": "0", "cost_in_credits": "1000", "cargo_capacity": "10"},
            {"name": "Mystery", "crew": "unknown", "passengers": "2", "cost_in_credits": "unknown", "cargo_capacity": "none"}
        ]));
        let table = normalize(&VEHICLES, &input, &SentinelSet::default());

        let crawler = &table.rows()[0];
        assert_eq!(crawler.get("total_capacity"), Some(&FieldValue::Int(76)));
        assert!((float(crawler, "cost_per_capacity").unwrap() - 150_000.0 / 76.0).abs() < 1e-9);
        assert!((float(crawler, "cargo_to_person_ratio").unwrap() - 50_000.0 / 76.0).abs() < 1e-9);

        let ghost = &table.rows()[1];
        assert_eq!(ghost.get("total_capacity"), Some(&FieldValue::Int(0)));
        assert_eq!(ghost.get("cost_per_capacity"), Some(&FieldValue::Null));
        assert_eq!(ghost.get("cargo_to_person_ratio"), Some(&FieldValue::Float(0.0)));

        let mystery = &table.rows()[2];
        assert_eq!(mystery.get("total_capacity"), Some(&FieldValue::Int(2)));
        assert_eq!(mystery.get("cost_per_capacity"), Some(&FieldValue::Null));
        assert_eq!(mystery.get("cargo_to_person_ratio"), Some(&FieldValue::Float(0.0)));
    }

    #[test]
    fn starship_custom_score_fills_missing_with_zero() {
        let input = records(json!([
            {"name": "X-wing", "MGLT": "100", "hyperdrive_rating": "1.0", "crew": "1", "passengers": "0", "cargo_capacity": "110"},
            {"name": "Unknown ship", "MGLT": "unknown", "hyperdrive_rating": "n/a"}
        ]));
        let table = normalize(&STARSHIPS, &input, &SentinelSet::default());

        let expected = 0.4 * 100.0 + 0.3 * 1.0 + 0.2 * 1.0 + 0.1 * 110.0;
        assert!((float(&table.rows()[0], "custom_score").unwrap() - expected).abs() < 1e-9);
        assert_eq!(table.rows()[1].get("custom_score"), Some(&FieldValue::Float(0.0)));
    }

    #[test]
    fn film_derived_columns() {
        let input = records(json!([{
            "title": "A New Hope",
            "episode_id": 4,
            "opening_crawl": "It is a period of civil war.",
            "producer": "Gary Kurtz, Rick McCallum",
            "release_date": "1977-05-25",
            "characters": ["a", "b", "c"],
            "planets": ["p"]
        }]));
        let table = normalize(&FILMS, &input, &SentinelSet::default());
        let row = &table.rows()[0];

        assert_eq!(row.get("episode_id"), Some(&FieldValue::Int(4)));
        assert_eq!(row.get("release_year"), Some(&FieldValue::Int(1977)));
        assert_eq!(row.get("character_count"), Some(&FieldValue::Int(3)));
        assert_eq!(row.get("planet_count"), Some(&FieldValue::Int(1)));
        assert_eq!(row.get("starship_count"), Some(&FieldValue::Int(0)));
        assert_eq!(row.get("crawl_word_count"), Some(&FieldValue::Int(7)));
        assert_eq!(
            row.get("crawl_words"),
            Some(&FieldValue::Tokens(vec!["it".into(), "is".into(), "period".into(), "civil".into(), "war".into()]))
        );
        assert_eq!(row.get("producer"), Some(&FieldValue::Tokens(vec!["Gary Kurtz".into(), "Rick McCallum".into()])));
    }

    #[test]
    fn bad_dates_become_null() {
        let input = records(json!([{"title": "Bootleg", "release_date": "someday"}]));
        let table = normalize(&FILMS, &input, &SentinelSet::default());
        assert_eq!(table.rows()[0].get("release_date"), Some(&FieldValue::Null));
        assert_eq!(table.rows()[0].get("release_year"), Some(&FieldValue::Null));
    }

    #[test]
    fn people_popularity_index() {
        let input = records(json!([{
            "name": "Luke Skywalker",
            "films": ["1", "2", "3", "6"],
            "vehicles": ["14", "30"],
            "starships": ["12", "22"]
        }]));
        let table = normalize(&PEOPLE, &input, &SentinelSet::default());
        assert_eq!(table.rows()[0].get("popularity_index"), Some(&FieldValue::Int(12)));
    }

    #[test]
    fn custom_sentinels_reach_numeric_fields() {
        let input = records(json!([{"name": "Geonosis", "diameter": "none"}]));
        let table = normalize(&PLANETS, &input, &SentinelSet::new(["none"]));
        assert_eq!(table.rows()[0].get("diameter"), Some(&FieldValue::Null));
    }
}
