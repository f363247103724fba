#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for holostat
//!
//! This library consolidates all functionality for the holostat tool, which pulls the
//! six Star Wars API catalogs, caches them on disk, turns the loosely typed records
//! into typed tables and computes summaries over them.
//!
//! # Module Organization
//!
//! - [`facts`]: Catalog retrieval, pagination and the on-disk cache
//! - [`normalize`]: Per-catalog schemas, value coercion and table construction
//! - [`aggregate`]: Ranking, grouping and statistics over normalized tables
//! - [`reports`]: Console, CSV and JSON output
//! - [`commands`]: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod aggregate;
pub mod facts;
pub mod normalize;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

pub use crate::commands::{Host, run};
