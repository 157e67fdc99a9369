//! Command-line access to the catalog importer and the marketplace search.
//!
//! Every command loads the catalog checkout into an in-memory store first,
//! then prints its result as JSON on stdout. Logs go to stderr.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use partsbin::prelude::*;

/// Partsbin CLI
#[derive(Parser)]
#[command(name = "partsbin")]
#[command(about = "PC hardware catalog import and marketplace search", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Checkout of the open hardware catalog
    #[arg(long, global = true, env = "PARTSBIN_CATALOG_ROOT")]
    catalog_root: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-error output
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Import catalog documents and report what was read
    Import {
        /// Only import this product kind (CPU, GPU, PCCase, ...)
        #[arg(short, long)]
        kind: Option<String>,
    },
    /// Search catalog entries of one kind
    SearchProducts {
        /// Product kind
        kind: String,
        /// Request parameters as a query string (`q=ryzen&cores_tot_min=8`)
        #[arg(default_value = "")]
        params: String,
    },
    /// Search listings of one kind
    SearchListings {
        /// Product kind
        kind: String,
        /// Request parameters as a query string (`q=7700x&price_max=300`)
        #[arg(default_value = "")]
        params: String,
        /// JSON file with the listings to search
        #[arg(short, long)]
        listings: PathBuf,
    },
}

/// A listing to create before searching. `product` is the catalog name.
#[derive(Debug, Serialize, Deserialize)]
struct ListingSeed {
    seller: UserId,
    product: String,
    #[serde(flatten)]
    draft: ListingDraft,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(code = err.code(), "{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let mut config = MarketConfig::from_env()?;
    if let Some(root) = cli.catalog_root {
        config.catalog_root = root;
    }

    let store = Arc::new(MemoryStore::new());
    let importer = CatalogImporter::new(store.as_ref(), &config.catalog_root);

    match cli.command {
        Commands::Import { kind } => {
            let report = match kind {
                Some(kind) => importer.import_kind(kind.parse()?)?,
                None => importer.import_all()?,
            };
            to_json(&report)
        }
        Commands::SearchProducts { kind, params } => {
            let product_kind: ProductKind = kind.parse()?;
            importer.import_kind(product_kind)?;
            let search = MarketSearch::from_config(store, &config);
            let results = search.search_products(&kind, &QueryParams::from_query_string(&params))?;
            to_json(&results)
        }
        Commands::SearchListings { kind, params, listings } => {
            let product_kind: ProductKind = kind.parse()?;
            importer.import_kind(product_kind)?;
            seed_listings(store.as_ref(), product_kind, &listings)?;
            let search = MarketSearch::from_config(store, &config);
            let results = search.search_listings(&kind, &QueryParams::from_query_string(&params))?;
            to_json(&results)
        }
    }
}

fn seed_listings(store: &MemoryStore, kind: ProductKind, path: &Path) -> Result<()> {
    let raw = fs::read_to_string(path)?;
    let seeds: Vec<ListingSeed> = serde_json::from_str(&raw).map_err(|source| MarketError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let mut created = 0;
    for seed in seeds {
        let product = store
            .product_by_name(kind, &seed.product)
            .ok_or_else(|| MarketError::InvalidRecord {
                path: path.to_path_buf(),
                reason: format!("no {kind} named `{}`", seed.product),
            })?;
        store.create_listing(seed.seller, product.id, seed.draft)?;
        created += 1;
    }
    info!(created, "seeded listings");
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|source| MarketError::Json {
        path: PathBuf::from("<stdout>"),
        source,
    })
}
