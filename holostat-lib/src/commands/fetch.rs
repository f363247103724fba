use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::facts::{Catalog, PayloadSource};
use clap::Parser;
use ohno::bail;
use std::io::Write;
use strum::IntoEnumIterator;

#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Catalogs to fetch (default is all six)
    #[arg(value_name = "CATALOG")]
    pub catalogs: Vec<Catalog>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Warm the cache for the requested catalogs and report what was obtained.
pub async fn process_fetch<H: Host>(host: &mut H, args: &FetchArgs) -> Result<()> {
    let catalogs: Vec<Catalog> = if args.catalogs.is_empty() {
        Catalog::iter().collect()
    } else {
        args.catalogs.clone()
    };

    let mut common = Common::new(host, &args.common)?;
    let results = common.payloads(&catalogs).await;

    let mut failures = 0;
    for (catalog, result) in catalogs.iter().zip(results) {
        match result {
            Ok(payload) => {
                let source = match payload.source {
                    PayloadSource::Cache => "cache",
                    PayloadSource::Network => "network",
                };
                let _ = write!(
                    common.host().output(),
                    "{:<10} {:>5} record(s)  from {source:<7}  fetched {}",
                    catalog.name(),
                    payload.records.len(),
                    payload.fetched_at.format("%Y-%m-%d %H:%M UTC")
                );

                if payload.complete {
                    let _ = writeln!(common.host().output());
                } else {
                    failures += 1;
                    let _ = writeln!(common.host().output(), "  (incomplete)");
                    if let Some(e) = &payload.error {
                        let _ = writeln!(common.host().error(), "{catalog}: {e:#}");
                    }
                }
            }
            Err(e) => {
                failures += 1;
                let _ = writeln!(common.host().error(), "{catalog}: {e:#}");
            }
        }
    }

    if failures > 0 {
        bail!("{failures} catalog(s) could not be fetched completely");
    }

    Ok(())
}
