use super::common::{format_cell, format_float, truncate};
use crate::Result;
use crate::aggregate::{Description, Summary};
use crate::facts::Catalog;
use crate::normalize::{Column, Row, Table};
use core::fmt::Write;

/// Widest a console column may grow before its cells are truncated.
const MAX_COLUMN_WIDTH: usize = 40;

/// Render the selected columns of a table as aligned text.
pub fn generate_table<W: Write>(table: &Table, columns: &[usize], writer: &mut W) -> Result<()> {
    let all: Vec<Column> = table.schema().columns().collect();
    let selected: Vec<(usize, Column)> = columns.iter().filter_map(|&i| all.get(i).map(|c| (i, *c))).collect();

    write_grid(
        writer,
        &selected.iter().map(|(_, c)| c.name.to_string()).collect::<Vec<_>>(),
        &selected.iter().map(|(_, c)| c.kind.is_numeric()).collect::<Vec<_>>(),
        table.rows().iter().map(|row| {
            selected
                .iter()
                .map(|(i, _)| row.value(*i).map(format_cell).unwrap_or_default())
                .collect()
        }),
    )?;

    writeln!(writer, "\n{} {} row(s)", table.len(), table.catalog())?;
    Ok(())
}

/// Render an aggregation result as aligned text.
pub fn generate_summary<W: Write>(catalog: Catalog, summary: &Summary, writer: &mut W) -> Result<()> {
    match summary {
        Summary::Ranked { field, rows } => {
            writeln!(writer, "Top {} {catalog} by {field}\n", rows.len())?;
            write_ranked(writer, field, rows)?;
        }
        Summary::GroupMeans { group, value, means } => {
            writeln!(writer, "Mean {value} of {catalog} by {group}\n")?;
            write_grid(
                writer,
                &[group.clone(), format!("mean {value}")],
                &[false, true],
                means.iter().map(|(key, mean)| vec![key.clone(), format_float(*mean)]),
            )?;
        }
        Summary::Distribution { field, counts } => {
            writeln!(writer, "Distribution of {field} across {catalog}\n")?;
            write_grid(
                writer,
                &[field.clone(), "count".to_string()],
                &[false, true],
                counts.iter().map(|c| vec![c.value.clone(), c.count.to_string()]),
            )?;
        }
        Summary::Correlation {
            field_a,
            field_b,
            coefficient,
        } => match coefficient {
            Some(r) => writeln!(writer, "Correlation of {field_a} and {field_b} across {catalog}: {r:.4}")?,
            None => writeln!(
                writer,
                "Correlation of {field_a} and {field_b} across {catalog} is undefined (fewer than two rows with both values, or a constant column)"
            )?,
        },
        Summary::Description(description) => write_description(writer, catalog, description)?,
    }

    Ok(())
}

fn write_ranked<W: Write>(writer: &mut W, field: &str, rows: &[Row]) -> Result<()> {
    write_grid(
        writer,
        &["#".to_string(), "name".to_string(), field.to_string()],
        &[true, false, true],
        rows.iter().enumerate().map(|(rank, row)| {
            vec![
                (rank + 1).to_string(),
                row.label().unwrap_or_default().to_string(),
                row.get(field).map(format_cell).unwrap_or_default(),
            ]
        }),
    )
}

fn write_description<W: Write>(writer: &mut W, catalog: Catalog, description: &Description) -> Result<()> {
    let show = |v: Option<f64>| v.map_or_else(|| super::common::NULL_DISPLAY.to_string(), format_float);

    writeln!(writer, "{} across {catalog}\n", description.field)?;
    writeln!(writer, "  rows    {}", description.rows)?;
    writeln!(writer, "  valued  {}", description.valued)?;
    writeln!(writer, "  mean    {}", show(description.mean))?;
    writeln!(writer, "  min     {}", show(description.min))?;
    writeln!(writer, "  max     {}", show(description.max))?;
    Ok(())
}

fn write_grid<W: Write>(writer: &mut W, headers: &[String], right_align: &[bool], rows: impl Iterator<Item = Vec<String>>) -> Result<()> {
    let rows: Vec<Vec<String>> = rows.map(|cells| cells.iter().map(|c| truncate(c, MAX_COLUMN_WIDTH)).collect()).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_line(writer, headers, &widths, right_align)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_line(writer, &rule, &widths, right_align)?;
    for cells in &rows {
        write_line(writer, cells, &widths, right_align)?;
    }

    Ok(())
}

fn write_line<W: Write>(writer: &mut W, cells: &[String], widths: &[usize], right_align: &[bool]) -> Result<()> {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }

        let pad = width.saturating_sub(cell.chars().count());
        if right_align.get(i).copied().unwrap_or(false) {
            line.push_str(&" ".repeat(pad));
            line.push_str(cell);
        } else {
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
        }
    }

    writeln!(writer, "{}", line.trim_end())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{Aggregation, aggregate};
    use crate::facts::RawRecord;
    use crate::normalize::{SentinelSet, normalize};
    use serde_json::json;

    fn planets() -> Table {
        let records: Vec<RawRecord> = serde_json::from_value(json!([
            {"name": "Tatooine", "climate": "arid", "surface_water": "1", "diameter": "10465"},
            {"name": "Hoth", "climate": "frozen", "surface_water": "100", "diameter": "7200"},
            {"name": "Bespin", "climate": "temperate", "surface_water": "0", "diameter": "unknown"}
        ]))
        .unwrap();
        normalize(Catalog::Planets.schema(), &records, &SentinelSet::default())
    }

    #[test]
    fn table_is_aligned() {
        let table = planets();
        let columns = [0, 3];
        let mut out = String::new();
        generate_table(&table, &columns, &mut out).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "name      diameter");
        assert_eq!(lines[1], "--------  --------");
        assert_eq!(lines[2], "Tatooine     10465");
        assert_eq!(lines[4], "Bespin           -");
        assert!(out.contains("3 planets row(s)"));
    }

    #[test]
    fn ranking_lists_names_in_order() {
        let summary = aggregate(
            &planets(),
            &Aggregation::TopN {
                field: "diameter".into(),
                n: 2,
            },
        )
        .unwrap();
        let mut out = String::new();
        generate_summary(Catalog::Planets, &summary, &mut out).unwrap();

        assert!(out.starts_with("Top 2 planets by diameter"));
        let tatooine = out.find("Tatooine").unwrap();
        let hoth = out.find("Hoth").unwrap();
        assert!(tatooine < hoth);
        assert!(!out.contains("Bespin"));
    }

    #[test]
    fn group_means_and_undefined_correlation() {
        let summary = aggregate(
            &planets(),
            &Aggregation::GroupMean {
                group: "climate".into(),
                value: "surface_water".into(),
            },
        )
        .unwrap();
        let mut out = String::new();
        generate_summary(Catalog::Planets, &summary, &mut out).unwrap();
        assert!(out.contains("frozen"));
        assert!(out.contains("100"));

        let summary = Summary::Correlation {
            field_a: "diameter".into(),
            field_b: "surface_water".into(),
            coefficient: None,
        };
        let mut out = String::new();
        generate_summary(Catalog::Planets, &summary, &mut out).unwrap();
        assert!(out.contains("undefined"));
    }

    #[test]
    fn description_lines() {
        let summary = aggregate(&planets(), &Aggregation::Describe { field: "diameter".into() }).unwrap();
        let mut out = String::new();
        generate_summary(Catalog::Planets, &summary, &mut out).unwrap();
        assert!(out.contains("valued  2"));
        assert!(out.contains("max     10465"));
    }
}
