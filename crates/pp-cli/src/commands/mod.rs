//! Command handler modules for the `pricepoints` CLI.
//!
//! Settings resolution shared by `reprice` and `resolve` lives here.
//! Command-specific logic lives in the submodules.

pub mod reprice;
pub mod resolve;

use anyhow::{Context, Result};
use clap::Args;
use pp_config::{
    load_layered_yaml, parse_price_points, report_unused_keys, RepricingConfig, UnusedKeyPolicy,
};
use pp_core::{PriceResolver, TieBreak};
use tracing::{info, warn};

/// Flags that decide how prices are resolved.
#[derive(Args, Debug, Clone)]
pub struct PricingArgs {
    /// Comma separated list of price points, e.g. 3,5,9 (overrides config)
    #[arg(long = "price-points", allow_hyphen_values = true)]
    pub price_points: Option<String>,

    /// Selects lower prices rather than higher prices when both are equally close
    #[arg(long, default_value_t = false)]
    pub prefer_lower_prices: bool,

    /// Selects higher prices on a tie, overriding prefer_lower_prices in config
    #[arg(long, default_value_t = false, conflicts_with = "prefer_lower_prices")]
    pub prefer_greater_prices: bool,

    /// Layered YAML config paths in merge order (repeatable or comma separated)
    #[arg(long = "config", env = "PRICEPOINTS_CONFIG", value_delimiter = ',')]
    pub config_paths: Vec<String>,

    /// Fail instead of warning when the config has keys nothing reads
    #[arg(long, default_value_t = false)]
    pub strict_config: bool,
}

impl PricingArgs {
    /// Tie-break preference given on the command line, if any.
    fn prefer_lower_flag(&self) -> Option<bool> {
        match (self.prefer_lower_prices, self.prefer_greater_prices) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        }
    }
}

/// Effective settings after merging flags over config over defaults.
#[derive(Debug)]
pub struct Settings {
    pub resolver: PriceResolver,
    pub marker: String,
}

pub fn build_settings(args: &PricingArgs, marker: Option<String>) -> Result<Settings> {
    let cfg = load_repricing_config(args)?;

    let points = match &args.price_points {
        Some(raw) => parse_price_points(raw)?,
        None => cfg.price_points.clone().unwrap_or_default(),
    };

    let prefer_lower = args
        .prefer_lower_flag()
        .or(cfg.prefer_lower_prices)
        .unwrap_or(false);

    let resolver = PriceResolver::new(&points)
        .context("failed to load price points")?
        .with_tie_break(TieBreak::from_prefer_lower(prefer_lower));

    let marker = marker
        .or(cfg.no_valid_price_marker)
        .unwrap_or_else(|| pp_feed::DEFAULT_NO_VALID_PRICE_MARKER.to_string());

    info!(
        points = ?resolver.points(),
        tie_break = resolver.tie_break().as_str(),
        marker = %marker,
        "resolver ready"
    );

    Ok(Settings { resolver, marker })
}

fn load_repricing_config(args: &PricingArgs) -> Result<RepricingConfig> {
    if args.config_paths.is_empty() {
        return Ok(RepricingConfig::default());
    }

    let path_refs: Vec<&str> = args.config_paths.iter().map(|s| s.as_str()).collect();
    let loaded = load_layered_yaml(&path_refs)?;

    let policy = if args.strict_config {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    let report = report_unused_keys(&loaded.config_json, policy)?;
    for pointer in &report.unused_leaf_pointers {
        warn!(pointer = %pointer, "config key is not used");
    }

    info!(config_hash = %loaded.config_hash, paths = ?path_refs, "config loaded");
    loaded.repricing()
}
