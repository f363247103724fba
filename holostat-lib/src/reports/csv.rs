use crate::Result;
use crate::aggregate::Summary;
use crate::facts::Catalog;
use crate::normalize::{FieldValue, Row, Table};
use core::fmt::Write;
use ohno::{IntoAppError, app_err};

type CsvWriter = csv::Writer<Vec<u8>>;

/// Write a whole table, one record per row, with every column.
pub fn generate_table<W: Write>(table: &Table, writer: &mut W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(Vec::new());
    write_rows(&mut csv, &table.schema().column_names(), table.rows())?;
    finish(csv, writer)
}

/// Write an aggregation result as a flat CSV table.
///
/// Ranked rows always carry the catalog's full header, even when nothing was ranked.
pub fn generate_summary<W: Write>(catalog: Catalog, summary: &Summary, writer: &mut W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(Vec::new());

    match summary {
        Summary::Ranked { rows, .. } => {
            write_rows(&mut csv, &catalog.schema().column_names(), rows)?;
        }
        Summary::GroupMeans { group, means, .. } => {
            csv.write_record([group.as_str(), "mean"]).into_app_err("writing CSV header")?;
            for (key, mean) in means {
                csv.write_record([key.clone(), mean.to_string()]).into_app_err("writing CSV row")?;
            }
        }
        Summary::Distribution { field, counts } => {
            csv.write_record([field.as_str(), "count"]).into_app_err("writing CSV header")?;
            for count in counts {
                csv.write_record([count.value.clone(), count.count.to_string()])
                    .into_app_err("writing CSV row")?;
            }
        }
        Summary::Correlation {
            field_a,
            field_b,
            coefficient,
        } => {
            csv.write_record(["field_a", "field_b", "coefficient"]).into_app_err("writing CSV header")?;
            csv.write_record([field_a.clone(), field_b.clone(), optional(*coefficient)])
                .into_app_err("writing CSV row")?;
        }
        Summary::Description(d) => {
            csv.write_record(["field", "rows", "valued", "mean", "min", "max"])
                .into_app_err("writing CSV header")?;
            csv.write_record([
                d.field.clone(),
                d.rows.to_string(),
                d.valued.to_string(),
                optional(d.mean),
                optional(d.min),
                optional(d.max),
            ])
            .into_app_err("writing CSV row")?;
        }
    }

    finish(csv, writer)
}

fn write_rows(csv: &mut CsvWriter, columns: &[&str], rows: &[Row]) -> Result<()> {
    csv.write_record(columns).into_app_err("writing CSV header")?;
    for row in rows {
        csv.write_record(row.values().iter().map(FieldValue::to_string))
            .into_app_err("writing CSV row")?;
    }
    Ok(())
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn finish<W: Write>(csv: CsvWriter, writer: &mut W) -> Result<()> {
    let bytes = csv.into_inner().map_err(|e| app_err!("flushing CSV output: {}", e.error()))?;
    let text = String::from_utf8(bytes).into_app_err("CSV output is not valid UTF-8")?;
    write!(writer, "{text}")?;
    Ok(())
}
