use super::Host;
use super::common::{Common, CommonArgs, OutputArgs};
use crate::Result;
use crate::aggregate::{Aggregation, aggregate};
use crate::facts::Catalog;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct TopArgs {
    /// Catalog to rank
    #[arg(value_name = "CATALOG")]
    pub catalog: Catalog,

    /// Numeric column to rank by
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// Number of rows to show
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,

    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct GroupMeanArgs {
    /// Catalog to summarize
    #[arg(value_name = "CATALOG")]
    pub catalog: Catalog,

    /// Column whose values form the groups
    #[arg(value_name = "GROUP")]
    pub group: String,

    /// Numeric column to average
    #[arg(value_name = "VALUE")]
    pub value: String,

    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct DistributionArgs {
    /// Catalog to summarize
    #[arg(value_name = "CATALOG")]
    pub catalog: Catalog,

    /// Column whose values are counted
    #[arg(value_name = "FIELD")]
    pub field: String,

    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct CorrelationArgs {
    /// Catalog to summarize
    #[arg(value_name = "CATALOG")]
    pub catalog: Catalog,

    /// First numeric column
    #[arg(value_name = "FIELD_A")]
    pub field_a: String,

    /// Second numeric column
    #[arg(value_name = "FIELD_B")]
    pub field_b: String,

    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct DescribeArgs {
    /// Catalog to summarize
    #[arg(value_name = "CATALOG")]
    pub catalog: Catalog,

    /// Numeric column to describe
    #[arg(value_name = "FIELD")]
    pub field: String,

    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub async fn process_top<H: Host>(host: &mut H, args: &TopArgs) -> Result<()> {
    let request = Aggregation::TopN {
        field: args.field.clone(),
        n: args.count,
    };
    summarize(host, &args.common, &args.output, args.catalog, &request).await
}

pub async fn process_group_mean<H: Host>(host: &mut H, args: &GroupMeanArgs) -> Result<()> {
    let request = Aggregation::GroupMean {
        group: args.group.clone(),
        value: args.value.clone(),
    };
    summarize(host, &args.common, &args.output, args.catalog, &request).await
}

pub async fn process_distribution<H: Host>(host: &mut H, args: &DistributionArgs) -> Result<()> {
    let request = Aggregation::Distribution { field: args.field.clone() };
    summarize(host, &args.common, &args.output, args.catalog, &request).await
}

pub async fn process_correlation<H: Host>(host: &mut H, args: &CorrelationArgs) -> Result<()> {
    let request = Aggregation::Correlation {
        field_a: args.field_a.clone(),
        field_b: args.field_b.clone(),
    };
    summarize(host, &args.common, &args.output, args.catalog, &request).await
}

pub async fn process_describe<H: Host>(host: &mut H, args: &DescribeArgs) -> Result<()> {
    let request = Aggregation::Describe { field: args.field.clone() };
    summarize(host, &args.common, &args.output, args.catalog, &request).await
}

async fn summarize<H: Host>(host: &mut H, common_args: &CommonArgs, output: &OutputArgs, catalog: Catalog, request: &Aggregation) -> Result<()> {
    let mut common = Common::new(host, common_args)?;
    let table = common.table(catalog).await?;
    let summary = aggregate(&table, request)?;
    common.report_summary(catalog, &summary, output)
}
