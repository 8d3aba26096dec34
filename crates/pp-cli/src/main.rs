use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::PricingArgs;

#[derive(Parser)]
#[command(name = "pricepoints")]
#[command(about = "Reprice catalogs so prices end in allowed digits", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reprice CSV catalog files and stream the result to stdout
    Reprice {
        #[command(flatten)]
        pricing: PricingArgs,

        /// Text appended to rows that have no valid price
        #[arg(long)]
        marker: Option<String>,

        /// Input CSV files (header row + name,current,min,max)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Resolve a single price and print it
    Resolve {
        #[command(flatten)]
        pricing: PricingArgs,

        /// Text printed when there is no valid price
        #[arg(long)]
        marker: Option<String>,

        /// Current price (decimal, e.g. 3.84)
        #[arg(long, allow_hyphen_values = true)]
        current: String,

        /// Minimum price (decimal)
        #[arg(long, allow_hyphen_values = true)]
        min: String,

        /// Maximum price (decimal)
        #[arg(long, allow_hyphen_values = true)]
        max: String,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> overrides...)
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Reprice {
            pricing,
            marker,
            files,
        } => commands::reprice::run_reprice(&pricing, marker, &files)?,

        Commands::Resolve {
            pricing,
            marker,
            current,
            min,
            max,
        } => commands::resolve::run_resolve(&pricing, marker, &current, &min, &max)?,

        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = pp_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }
    }

    Ok(())
}

/// Logs go to stderr; stdout carries CSV only.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
