//! Processing shared by every command that reads catalogs.

use super::ProgressReporter;
use super::config::Config;
use crate::Result;
use crate::aggregate::Summary;
use crate::facts::{CacheStore, Catalog, CatalogPayload, Catalogs, DirBackend, Fetcher};
use crate::normalize::Table;
use crate::reports::{
    generate_summary_console, generate_summary_csv, generate_summary_json, generate_table_console, generate_table_csv,
    generate_table_json,
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use core::time::Duration;
use directories::BaseDirs;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;
use std::sync::Arc;

/// Color mode configuration for progress output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if stderr is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared by every command that reads catalogs
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to configuration file (default is `holostat.toml` in the current directory)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Directory where fetched catalogs are cached
    #[arg(long, value_name = "PATH", env = "HOLOSTAT_CACHE_DIR")]
    pub cache_dir: Option<Utf8PathBuf>,

    /// Root URL of the catalog API, overriding the configuration file
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Ignore cached data and fetch everything fresh
    #[arg(long)]
    pub ignore_cached: bool,

    /// Control when to use colored progress output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

/// Where to send table and summary output
#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Write the result to a CSV file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Write the result to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Print the result to the terminal. If omitted, it is printed only when no file is written.
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,
}

impl OutputArgs {
    const fn show_console(&self) -> bool {
        self.console || (self.csv.is_none() && self.json.is_none())
    }
}

pub struct Common<'a, H: super::Host> {
    pub catalogs: Catalogs,
    host: &'a mut H,
    progress: ProgressReporter,
}

impl<'a, H: super::Host> Common<'a, H> {
    /// Create a new Common processor with logger, config and catalog access
    pub fn new(host: &'a mut H, args: &CommonArgs) -> Result<Self> {
        Self::init_logging(args.log_level);

        let mut config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
        if let Some(base_url) = &args.base_url {
            config.base_url.clone_from(base_url);
        }

        let cache_dir = if let Some(cache_path) = &args.cache_dir {
            cache_path.as_std_path().to_path_buf()
        } else {
            BaseDirs::new()
                .into_app_err("could not determine cache directory")?
                .cache_dir()
                .join("holostat")
        };

        let delay = if args.log_level == LogLevel::None {
            Duration::from_millis(300)
        } else {
            Duration::from_secs(365 * 24 * 60 * 60)
        };

        let use_colors = match args.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                use std::io::{IsTerminal, stderr};
                stderr().is_terminal()
            }
        };

        let backend = DirBackend::new(&cache_dir)?;
        let store = CacheStore::new(Arc::new(backend), args.ignore_cached);
        let fetcher = Fetcher::new(&config.base_url, &config.user_agent, config.request_timeout)?;
        let catalogs = Catalogs::new(store, fetcher, config.sentinel_set());

        Ok(Self {
            catalogs,
            host,
            progress: ProgressReporter::new(delay, use_colors),
        })
    }

    /// Initialize logger based on log level
    fn init_logging(log_level: LogLevel) {
        let level = match log_level {
            LogLevel::None => return,
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);

        // A logger may already be installed when several commands run in one process
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
            .try_init();
    }

    /// Obtain several catalogs, showing progress while any of them goes to the network.
    pub async fn payloads(&self, catalogs: &[Catalog]) -> Vec<Result<CatalogPayload>> {
        self.catalogs.payloads(catalogs, &self.progress).await
    }

    /// Obtain and normalize one catalog, warning when the data is incomplete.
    pub async fn table(&mut self, catalog: Catalog) -> Result<Table> {
        let payload = self
            .catalogs
            .payloads(&[catalog], &self.progress)
            .await
            .pop()
            .into_app_err_with(|| format!("no result was produced for the {catalog} catalog"))??;

        if !payload.complete {
            let _ = writeln!(
                self.host.error(),
                "warning: the {catalog} catalog is incomplete; results cover {} record(s)",
                payload.records.len()
            );
        }

        Ok(self.catalogs.to_table(&payload))
    }

    pub fn host(&mut self) -> &mut H {
        self.host
    }

    /// Emit a table to every requested output.
    pub fn report_table(&mut self, table: &Table, columns: &[usize], output: &OutputArgs) -> Result<()> {
        if output.show_console() {
            let mut text = String::new();
            generate_table_console(table, columns, &mut text)?;
            let _ = write!(self.host.output(), "{text}");
        }

        if let Some(filename) = &output.csv {
            let mut text = String::new();
            generate_table_csv(table, &mut text)?;
            fs::write(filename, text).into_app_err_with(|| format!("writing CSV output to '{filename}'"))?;
        }

        if let Some(filename) = &output.json {
            let mut text = String::new();
            generate_table_json(table, &mut text)?;
            fs::write(filename, text).into_app_err_with(|| format!("writing JSON output to '{filename}'"))?;
        }

        Ok(())
    }

    /// Emit an aggregation result to every requested output.
    pub fn report_summary(&mut self, catalog: Catalog, summary: &Summary, output: &OutputArgs) -> Result<()> {
        if output.show_console() {
            let mut text = String::new();
            generate_summary_console(catalog, summary, &mut text)?;
            let _ = write!(self.host.output(), "{text}");
        }

        if let Some(filename) = &output.csv {
            let mut text = String::new();
            generate_summary_csv(catalog, summary, &mut text)?;
            fs::write(filename, text).into_app_err_with(|| format!("writing CSV output to '{filename}'"))?;
        }

        if let Some(filename) = &output.json {
            let mut text = String::new();
            generate_summary_json(catalog, summary, &mut text)?;
            fs::write(filename, text).into_app_err_with(|| format!("writing JSON output to '{filename}'"))?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    fn args(cache_dir: &Utf8Path) -> CommonArgs {
        CommonArgs {
            config: None,
            cache_dir: Some(cache_dir.to_owned()),
            base_url: Some("http://127.0.0.1:9/api/".to_string()),
            ignore_cached: false,
            color: ColorMode::Never,
            log_level: LogLevel::None,
        }
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn builds_outside_an_async_runtime() {
        let tmp = tempfile::tempdir().unwrap();
        let cache_dir = Utf8PathBuf::from_path_buf(tmp.path().join("nested")).unwrap();

        let mut host = TestHost::new();
        let _common = Common::new(&mut host, &args(&cache_dir)).unwrap();

        assert!(cache_dir.is_dir());
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let cache_dir = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        let mut common_args = args(&cache_dir);
        common_args.base_url = Some("not a url".to_string());

        let mut host = TestHost::new();
        assert!(Common::new(&mut host, &common_args).is_err());
    }

    #[test]
    fn console_is_the_fallback_output() {
        assert!(OutputArgs::default().show_console());
        let to_file = OutputArgs {
            csv: Some(Utf8PathBuf::from("out.csv")),
            ..OutputArgs::default()
        };
        assert!(!to_file.show_console());
    }
}
