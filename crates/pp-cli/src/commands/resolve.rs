//! `pricepoints resolve`: one-off price lookup.

use anyhow::Result;
use pp_core::ResolveError;
use pp_feed::{price_to_cents, Cents};

use super::{build_settings, PricingArgs};

/// Prints the resolved price with two decimals, or the marker when no
/// price in range qualifies (exit status stays 0 in that case).
pub fn run_resolve(
    args: &PricingArgs,
    marker: Option<String>,
    current: &str,
    min: &str,
    max: &str,
) -> Result<()> {
    let settings = build_settings(args, marker)?;

    let current = price_to_cents(current, "current")?;
    let min = price_to_cents(min, "min")?;
    let max = price_to_cents(max, "max")?;

    match settings
        .resolver
        .resolve(current.raw(), min.raw(), max.raw())
    {
        Ok(price) => println!("{}", Cents::new(price)),
        Err(ResolveError::NoValidPrice { .. }) => println!("{}", settings.marker),
    }

    Ok(())
}
