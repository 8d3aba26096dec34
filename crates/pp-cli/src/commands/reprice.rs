//! `pricepoints reprice`: stream repriced catalog rows to stdout.

use anyhow::{Context, Result};
use pp_feed::RepriceReport;
use std::io;
use std::path::PathBuf;
use tracing::info;

use super::{build_settings, PricingArgs};

/// Header once, then every row of every file in order. A file that cannot
/// be read or holds a malformed row stops the run; rows already written stay
/// on stdout.
pub fn run_reprice(args: &PricingArgs, marker: Option<String>, files: &[PathBuf]) -> Result<()> {
    let settings = build_settings(args, marker)?;

    let stdout = io::stdout();
    let mut out = pp_feed::output_writer(stdout.lock());
    pp_feed::write_header(&mut out)?;

    let mut total = RepriceReport::default();
    for path in files {
        let report = pp_feed::reprice_file(path, &settings.resolver, &settings.marker, &mut out)
            .with_context(|| format!("failed to load products from {}", path.display()))?;
        total.merge(&report);
    }

    info!(
        files = files.len(),
        rows_read = total.rows_read,
        rows_repriced = total.rows_repriced,
        rows_unchanged = total.rows_unchanged,
        rows_no_valid_price = total.rows_no_valid_price,
        "reprice complete"
    );

    Ok(())
}
