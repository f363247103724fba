use super::Host;
use super::common::{Common, CommonArgs, OutputArgs};
use crate::Result;
use crate::facts::Catalog;
use crate::normalize::{FieldKind, Table};
use clap::Parser;

#[derive(Parser, Debug)]
pub struct TableArgs {
    /// Catalog to show
    #[arg(value_name = "CATALOG")]
    pub catalog: Catalog,

    /// Columns to show on the terminal (default is every column except cross-reference lists)
    #[arg(long, value_name = "COLUMNS", value_delimiter = ',')]
    pub columns: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Show a normalized catalog.
pub async fn process_table<H: Host>(host: &mut H, args: &TableArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;
    let table = common.table(args.catalog).await?;
    let columns = select_columns(&table, &args.columns)?;
    common.report_table(&table, &columns, &args.output)
}

fn select_columns(table: &Table, requested: &[String]) -> Result<Vec<usize>> {
    if requested.is_empty() {
        return Ok(table
            .schema()
            .columns()
            .enumerate()
            .filter(|(_, c)| c.kind != FieldKind::Links)
            .map(|(i, _)| i)
            .collect());
    }

    requested.iter().map(|name| table.column(name.trim()).map(|(i, _)| i)).collect()
}
