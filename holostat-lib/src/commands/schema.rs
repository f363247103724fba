use super::Host;
use crate::Result;
use crate::facts::Catalog;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Catalog whose columns to list
    #[arg(value_name = "CATALOG")]
    pub catalog: Catalog,
}

/// List the columns of a catalog's table without touching the network or cache.
pub fn show_schema<H: Host>(host: &mut H, args: &SchemaArgs) -> Result<()> {
    let schema = args.catalog.schema();
    let width = schema.columns().map(|c| c.name.len()).max().unwrap_or(0);

    let mut out = host.output();
    writeln!(out, "Columns of the {} table\n", args.catalog)?;
    for column in schema.columns() {
        let origin = if column.derived { "derived" } else { "raw" };
        writeln!(
            out,
            "  {:<width$}  {:<8}  {:<7}  {}",
            column.name,
            column.kind.label(),
            origin,
            column.description
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    #[test]
    fn lists_raw_and_derived_columns() {
        let mut host = TestHost::new();
        show_schema(&mut host, &SchemaArgs { catalog: Catalog::Starships }).unwrap();

        let out = host.output_str();
        assert!(out.starts_with("Columns of the starships table"));
        assert!(out.contains("MGLT"));
        assert!(out.lines().any(|l| l.contains("custom_score") && l.contains("derived") && l.contains("float")));
        assert!(out.lines().any(|l| l.contains("pilots") && l.contains("links") && l.contains("raw")));
    }
}
