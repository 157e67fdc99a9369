//! Import of catalog entries from a checkout of the open hardware catalog.
//!
//! The catalog keeps one JSON document per product under
//! `<root>/open-db/<Kind>/`. Each document is mapped onto a [`Product`] and
//! saved by kind and name, so running an import twice updates entries in
//! place instead of duplicating them.

use std::fs;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::catalog::fields::lookup_path;
use crate::catalog::{Product, ProductInfo, ProductKind, Specs};
use crate::error::{MarketError, Result};
use crate::store::{Store, Upsert};

/// Counts of a finished import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
  pub created: usize,
  pub updated: usize,
}

impl ImportReport {
  pub fn total(&self) -> usize {
    self.created + self.updated
  }

  fn record(&mut self, outcome: Upsert) {
    match outcome {
      Upsert::Created(_) => self.created += 1,
      Upsert::Updated(_) => self.updated += 1,
    }
  }
}

impl AddAssign for ImportReport {
  fn add_assign(&mut self, other: Self) {
    self.created += other.created;
    self.updated += other.updated;
  }
}

/// Maps a catalog document onto an unsaved [`Product`] of `kind`.
///
/// `metadata.name` and `opendb_id` are required; every other attribute is
/// optional and left unset when missing or of an unusable shape. The error is
/// a human readable reason.
pub fn product_from_document(kind: ProductKind, document: &Value) -> std::result::Result<Product, String> {
  let name = lookup_path(document, "metadata.name")
    .and_then(Value::as_str)
    .map(str::trim)
    .filter(|name| !name.is_empty())
    .ok_or("missing metadata.name")?;
  let opendb_id = lookup_path(document, "opendb_id")
    .and_then(Value::as_str)
    .ok_or("missing opendb_id")?;
  let opendb_id = Uuid::parse_str(opendb_id).map_err(|e| format!("invalid opendb_id: {e}"))?;

  Ok(Product {
    id: 0,
    opendb_id,
    name: name.to_string(),
    info: ProductInfo::from_document(document),
    specs: Specs::from_document(kind, document),
    last_synced: Utc::now(),
  })
}

/// Loads catalog documents into a [`Store`].
pub struct CatalogImporter<'a, S: ?Sized> {
  store: &'a S,
  root: PathBuf,
}

impl<'a, S: Store + ?Sized> CatalogImporter<'a, S> {
  /// Creates an importer reading the catalog checkout at `root`.
  pub fn new(store: &'a S, root: impl Into<PathBuf>) -> Self {
    Self {
      store,
      root: root.into(),
    }
  }

  /// The directory holding the documents of `kind`.
  pub fn kind_dir(&self, kind: ProductKind) -> PathBuf {
    self.root.join("open-db").join(kind.dir_name())
  }

  /// Imports every document of every kind. Stops at the first failure.
  pub fn import_all(&self) -> Result<ImportReport> {
    let mut report = ImportReport::default();
    for kind in ProductKind::ALL {
      report += self.import_kind(kind)?;
    }
    Ok(report)
  }

  /// Imports the `*.json` documents of `kind` in file name order. Stops at
  /// the first failure; documents imported before it stay saved.
  pub fn import_kind(&self, kind: ProductKind) -> Result<ImportReport> {
    let dir = self.kind_dir(kind);
    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)?
      .filter_map(|entry| entry.ok().map(|e| e.path()))
      .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
      .collect();
    paths.sort();

    if paths.is_empty() {
      warn!(%kind, dir = %dir.display(), "no catalog documents found");
    }

    let mut report = ImportReport::default();
    for path in &paths {
      let raw = fs::read_to_string(path)?;
      let document: Value = serde_json::from_str(&raw).map_err(|source| MarketError::Json {
        path: path.clone(),
        source,
      })?;
      report.record(self.import_document(kind, path, &document)?);
    }

    info!(%kind, created = report.created, updated = report.updated, "catalog import finished");
    Ok(report)
  }

  /// Saves one catalog document. `path` is only used for reporting.
  pub fn import_document(&self, kind: ProductKind, path: &Path, document: &Value) -> Result<Upsert> {
    let product = product_from_document(kind, document).map_err(|reason| MarketError::InvalidRecord {
      path: path.to_path_buf(),
      reason,
    })?;

    let name = product.name.clone();
    let opendb_id = product.opendb_id;
    self.store.upsert_product(product).inspect_err(|err| {
      if let MarketError::DuplicateCatalogId { existing, .. } = err {
        error!(
          path = %path.display(),
          name = %name,
          %opendb_id,
          existing = %existing,
          record = %document,
          "catalog id already belongs to another entry"
        );
      }
    })
  }
}
