//! Command dispatch logic for holostat

use super::{
    CorrelationArgs, DescribeArgs, DistributionArgs, FetchArgs, GroupMeanArgs, InitArgs, SchemaArgs, TableArgs, TopArgs, init_config,
    process_correlation, process_describe, process_distribution, process_fetch, process_group_mean, process_table, process_top,
    show_schema,
};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "holostat", version, long_about = None)]
#[command(about = "Fetch, cache and summarize the Star Wars API catalogs")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: HolostatSubcommand,
}

#[derive(Subcommand, Debug)]
enum HolostatSubcommand {
    /// Fetch catalogs into the local cache
    Fetch(FetchArgs),
    /// Show a normalized catalog table
    Table(Box<TableArgs>),
    /// Rank rows by a numeric column
    Top(Box<TopArgs>),
    /// Average a numeric column per group
    GroupMean(Box<GroupMeanArgs>),
    /// Count the occurrences of each value of a column
    Distribution(Box<DistributionArgs>),
    /// Compute the Pearson correlation of two numeric columns
    Correlation(Box<CorrelationArgs>),
    /// Describe the spread of a numeric column
    Describe(Box<DescribeArgs>),
    /// List the columns of a catalog table
    Schema(SchemaArgs),
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        HolostatSubcommand::Fetch(args) => process_fetch(host, args).await,
        HolostatSubcommand::Table(args) => process_table(host, args).await,
        HolostatSubcommand::Top(args) => process_top(host, args).await,
        HolostatSubcommand::GroupMean(args) => process_group_mean(host, args).await,
        HolostatSubcommand::Distribution(args) => process_distribution(host, args).await,
        HolostatSubcommand::Correlation(args) => process_correlation(host, args).await,
        HolostatSubcommand::Describe(args) => process_describe(host, args).await,
        HolostatSubcommand::Schema(args) => show_schema(host, args),
        HolostatSubcommand::Init(args) => init_config(host, args),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_group_mean() {
        let cli = Cli::parse_from(["holostat", "group-mean", "planets", "climate", "population", "--json", "out.json"]);
        let HolostatSubcommand::GroupMean(args) = cli.command else {
            panic!("wrong subcommand");
        };
        assert_eq!(args.group, "climate");
        assert_eq!(args.value, "population");
        assert_eq!(args.output.json.as_deref().map(camino::Utf8Path::as_str), Some("out.json"));
    }

    #[test]
    fn parses_table_columns() {
        let cli = Cli::parse_from(["holostat", "table", "starships", "--columns", "name,MGLT"]);
        let HolostatSubcommand::Table(args) = cli.command else {
            panic!("wrong subcommand");
        };
        assert_eq!(args.columns, ["name", "MGLT"]);
    }

    #[test]
    fn unknown_catalog_rejected() {
        let _ = Cli::try_parse_from(["holostat", "table", "droids"]).unwrap_err();
    }

    #[tokio::test]
    async fn run_dispatches_schema() {
        let mut host = crate::commands::host::TestHost::new();
        run(&mut host, ["holostat", "schema", "films"]).await.unwrap();
        assert!(host.output_str().contains("release_year"));
    }
}
