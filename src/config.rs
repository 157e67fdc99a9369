use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{MarketError, Result};
use crate::searchers::{Scorer, DEFAULT_LIMIT, DEFAULT_MAX_QUERY_CHARS};

pub const DEFAULT_CATALOG_ROOT: &str = "./buildcores-open-db";
pub const DEFAULT_LISTING_CUTOFF: f64 = 60.0;
pub const DEFAULT_PRODUCT_CUTOFF: f64 = 0.0;

/// Deserialized configurations are validated like loaded ones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct MarketConfig {
    /// Checkout of the open hardware catalog; documents live under
    /// `<catalog_root>/open-db/<Kind>/`.
    pub catalog_root: PathBuf,
    pub listing_search_cutoff: f64,
    pub product_search_cutoff: f64,
    pub result_limit: usize,
    pub scorer: Scorer,
    /// Longest search query, in characters, that is scored.
    pub max_query_chars: usize,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            catalog_root: PathBuf::from(DEFAULT_CATALOG_ROOT),
            listing_search_cutoff: DEFAULT_LISTING_CUTOFF,
            product_search_cutoff: DEFAULT_PRODUCT_CUTOFF,
            result_limit: DEFAULT_LIMIT,
            scorer: Scorer::default(),
            max_query_chars: DEFAULT_MAX_QUERY_CHARS,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawConfig {
    catalog_root: PathBuf,
    listing_search_cutoff: f64,
    product_search_cutoff: f64,
    result_limit: usize,
    scorer: Scorer,
    max_query_chars: usize,
}

impl Default for RawConfig {
    fn default() -> Self {
        let defaults = MarketConfig::default();
        Self {
            catalog_root: defaults.catalog_root,
            listing_search_cutoff: defaults.listing_search_cutoff,
            product_search_cutoff: defaults.product_search_cutoff,
            result_limit: defaults.result_limit,
            scorer: defaults.scorer,
            max_query_chars: defaults.max_query_chars,
        }
    }
}

impl TryFrom<RawConfig> for MarketConfig {
    type Error = MarketError;

    fn try_from(raw: RawConfig) -> Result<Self> {
        let config = Self {
            catalog_root: raw.catalog_root,
            listing_search_cutoff: raw.listing_search_cutoff,
            product_search_cutoff: raw.product_search_cutoff,
            result_limit: raw.result_limit,
            scorer: raw.scorer,
            max_query_chars: raw.max_query_chars,
        };
        config.validate()?;
        Ok(config)
    }
}

impl MarketConfig {
    /// Reads `PARTSBIN_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            catalog_root: try_load(&lookup, "PARTSBIN_CATALOG_ROOT", defaults.catalog_root)?,
            listing_search_cutoff: try_load(
                &lookup,
                "PARTSBIN_LISTING_CUTOFF",
                defaults.listing_search_cutoff,
            )?,
            product_search_cutoff: try_load(
                &lookup,
                "PARTSBIN_PRODUCT_CUTOFF",
                defaults.product_search_cutoff,
            )?,
            result_limit: try_load(&lookup, "PARTSBIN_RESULT_LIMIT", defaults.result_limit)?,
            scorer: match lookup("PARTSBIN_SCORER") {
                Some(raw) => parse_scorer(&raw)?,
                None => defaults.scorer,
            },
            max_query_chars: try_load(
                &lookup,
                "PARTSBIN_MAX_QUERY_CHARS",
                defaults.max_query_chars,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, cutoff) in [
            ("listing_search_cutoff", self.listing_search_cutoff),
            ("product_search_cutoff", self.product_search_cutoff),
        ] {
            if !(0.0..=100.0).contains(&cutoff) {
                return Err(MarketError::Config(format!(
                    "{name} must be between 0 and 100, got {cutoff}"
                )));
            }
        }
        if self.result_limit == 0 {
            return Err(MarketError::Config("result_limit must be positive".into()));
        }
        if self.max_query_chars == 0 {
            return Err(MarketError::Config("max_query_chars must be positive".into()));
        }
        Ok(())
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e| {
            warn!("Invalid {key} value: {e}");
            MarketError::Config(format!("{key}: {e}"))
        }),
        None => {
            info!("{key} not set, using default: {default:?}");
            Ok(default)
        }
    }
}

fn parse_scorer(raw: &str) -> Result<Scorer> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "hybrid" => Ok(Scorer::Hybrid),
        "jaro_winkler" | "jaro-winkler" => Ok(Scorer::JaroWinkler),
        other => {
            warn!("Invalid PARTSBIN_SCORER value: {other}");
            Err(MarketError::Config(format!("unknown scorer `{other}`")))
        }
    }
}
