//! Error types for catalog, listing and search operations.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

use crate::types::ProductId;

/// Result alias used throughout the crate.
pub type Result<T, E = MarketError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum MarketError {
  /// The requested product type is not a concrete catalog variant.
  #[error("`{0}` is not a product type")]
  UnknownProductType(String),

  /// The record does not exist, or it exists but belongs to someone else.
  #[error("{entity} {id} not found")]
  NotFound { entity: &'static str, id: u64 },

  #[error("product {product_id} is referenced by {listings} listing(s)")]
  ProductInUse { product_id: ProductId, listings: usize },

  /// A listing draft with a value the listing cannot hold.
  #[error("invalid listing: {0}")]
  InvalidListing(String),

  #[error("catalog id {opendb_id} of `{name}` already belongs to `{existing}`")]
  DuplicateCatalogId {
    opendb_id: Uuid,
    name: String,
    existing: String,
  },

  #[error("invalid catalog record {path}: {reason}")]
  InvalidRecord { path: PathBuf, reason: String },

  #[error("failed to parse {path}: {source}")]
  Json {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error("invalid configuration: {0}")]
  Config(String),
}

impl MarketError {
  pub(crate) fn not_found(entity: &'static str, id: u64) -> Self {
    MarketError::NotFound { entity, id }
  }

  /// Stable machine-readable code, suitable for API responses.
  pub fn code(&self) -> &'static str {
    match self {
      MarketError::UnknownProductType(_) => "unknown_product_type",
      MarketError::NotFound { .. } => "not_found",
      MarketError::ProductInUse { .. } => "product_in_use",
      MarketError::InvalidListing(_) => "invalid_listing",
      MarketError::DuplicateCatalogId { .. } => "duplicate_catalog_id",
      MarketError::InvalidRecord { .. } => "invalid_record",
      MarketError::Json { .. } => "invalid_json",
      MarketError::Io(_) => "io_error",
      MarketError::Config(_) => "config_error",
    }
  }
}
