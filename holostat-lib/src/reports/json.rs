use crate::Result;
use crate::aggregate::Summary;
use crate::facts::Catalog;
use crate::normalize::Table;
use core::fmt::Write;
use serde_json::json;

/// Write a whole table as `{"catalog": ..., "rows": [...]}`.
pub fn generate_table<W: Write>(table: &Table, writer: &mut W) -> Result<()> {
    let output = json!({
        "catalog": table.catalog(),
        "rows": table,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

/// Write an aggregation result as `{"catalog": ..., "summary": {...}}`.
pub fn generate_summary<W: Write>(catalog: Catalog, summary: &Summary, writer: &mut W) -> Result<()> {
    let output = json!({
        "catalog": catalog,
        "summary": summary,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
