//! Command-line interface and orchestration for holostat
//!
//! This module implements the CLI commands and wires the catalog access,
//! normalization, aggregation and reporting layers together.
//!
//! ## Commands
//!
//! - **fetch**: Warm the cache for one or more catalogs and report what was obtained
//! - **table**: Normalize a catalog and print or export its table
//! - **top**, **group-mean**, **distribution**, **correlation**, **describe**:
//!   Normalize a catalog and run a single aggregation over it
//! - **schema**: List the columns of a catalog without touching the network
//! - **init**: Generate a default configuration file
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate handler. Data commands share the `common` module, which sets up
//! logging, loads the configuration, opens the cache directory and builds the
//! fetcher before asking for payloads.

mod common;
mod config;
mod fetch;
mod host;
mod init;
mod progress_reporter;
mod run;
mod schema;
mod summarize;
mod table;

#[cfg(debug_assertions)]
pub use config::Config;

pub use fetch::{FetchArgs, process_fetch};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use progress_reporter::ProgressReporter;
pub use run::run;
pub use schema::{SchemaArgs, show_schema};
pub use summarize::{
    CorrelationArgs, DescribeArgs, DistributionArgs, GroupMeanArgs, TopArgs, process_correlation, process_describe, process_distribution,
    process_group_mean, process_top,
};
pub use table::{TableArgs, process_table};
