//! Marketplace search: structural filtering followed by fuzzy ranking.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::builder::{build_options, FieldOptions, FilterGroups};
use crate::catalog::{Product, ProductKind};
use crate::config::MarketConfig;
use crate::error::Result;
use crate::filter::FilterExpr;
use crate::listing::{Listing, ListingRow, LISTING_SCHEMA, PRODUCT_PREFIX};
use crate::params::QueryParams;
use crate::searchers::{FuzzyRanker, Scorer};
use crate::store::Store;
use crate::types::ProductId;

/// A listing together with the catalog entry it offers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingHit {
  pub listing: Listing,
  pub product: Product,
}

/// The outcome of [`MarketSearch::search_listings`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingResults {
  pub kind: ProductKind,
  pub query: Option<String>,
  /// Matching listings, best match first.
  pub listings: Vec<ListingHit>,
  /// Options for the listing-level filter controls.
  pub listing_filters: Vec<FieldOptions>,
  /// Options for the filter controls of the listed catalog entries.
  pub product_filters: Vec<FieldOptions>,
}

/// The outcome of [`MarketSearch::search_products`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductResults {
  pub kind: ProductKind,
  pub query: Option<String>,
  pub products: Vec<Product>,
  pub filters: Vec<FieldOptions>,
}

/// Searches catalog entries and listings held by a [`Store`].
///
/// Each search narrows the candidates with the filters found in the request
/// parameters, then orders what is left by fuzzy similarity between the `q`
/// parameter and a text field: the title of a listing, the name of a catalog
/// entry. Option metadata for every filter control is returned alongside, so
/// a front end can render the form for the next request.
///
/// Create a `MarketSearch` with [`MarketSearch::builder`] or
/// [`MarketSearch::from_config`].
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use partsbin::prelude::*;
///
/// let store = Arc::new(MemoryStore::new());
/// let search = MarketSearch::builder(store).listing_cutoff(70.0).build();
///
/// let params = QueryParams::from_query_string("q=7700x&cores_tot_min=8");
/// let results = search.search_listings("CPU", &params).unwrap();
/// assert!(results.listings.is_empty());
/// ```
pub struct MarketSearch<S> {
  store: Arc<S>,
  listing_ranker: FuzzyRanker,
  product_ranker: FuzzyRanker,
}

impl<S: Store> MarketSearch<S> {
  /// Creates a `MarketSearchBuilder` with the default cutoffs.
  pub fn builder(store: Arc<S>) -> MarketSearchBuilder<S> {
    MarketSearchBuilder::new(store)
  }

  /// Creates a search over `store` configured by `config`.
  pub fn from_config(store: Arc<S>, config: &MarketConfig) -> Self {
    Self::builder(store)
      .listing_cutoff(config.listing_search_cutoff)
      .product_cutoff(config.product_search_cutoff)
      .limit(config.result_limit)
      .scorer(config.scorer)
      .max_query_chars(config.max_query_chars)
      .build()
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  /// Searches the listings of catalog entries of one kind.
  ///
  /// `params` may constrain listing fields (`price_max=300`) and fields of
  /// the listed entry (`cores_tot_min=8`) side by side; the same name never
  /// appears on both. Every constraint must hold.
  ///
  /// # Arguments
  ///
  /// * `kind` - A product kind name such as `CPU` or `ram`.
  /// * `params` - The request parameters, including the free-text `q`.
  ///
  /// # Errors
  ///
  /// `UnknownProductType` when `kind` names no concrete product kind.
  pub fn search_listings(&self, kind: &str, params: &QueryParams) -> Result<ListingResults> {
    let kind: ProductKind = kind.parse()?;
    let listing_groups = FilterGroups::gather(&LISTING_SCHEMA, None, params);
    let product_groups = FilterGroups::gather(kind.schema(), Some(PRODUCT_PREFIX), params);
    let filter = FilterExpr::And(
      listing_groups
        .constraints()
        .into_iter()
        .chain(product_groups.constraints())
        .collect(),
    );

    let catalog = self.store.products_of_kind(kind);
    let by_id: HashMap<ProductId, &Product> = catalog.iter().map(|p| (p.id, p)).collect();
    let listings: Vec<Listing> = self
      .store
      .listings()
      .into_iter()
      .filter(|listing| by_id.contains_key(&listing.product))
      .collect();

    let rows: Vec<ListingRow<'_>> = listings
      .iter()
      .filter_map(|listing| {
        let product = *by_id.get(&listing.product)?;
        Some(ListingRow { listing, product })
      })
      .filter(|row| filter.evaluate(row))
      .collect();
    debug!(%kind, candidates = listings.len(), filtered = rows.len(), "filtered listings");

    let query = params.query();
    let ranked = self.listing_ranker.rank(rows, query, "title");
    let hits: Vec<ListingHit> = ranked
      .into_iter()
      .map(|row| ListingHit {
        listing: row.listing.clone(),
        product: row.product.clone(),
      })
      .collect();
    info!(%kind, query, results = hits.len(), "listing search");

    Ok(ListingResults {
      kind,
      query: query.map(str::to_string),
      listing_filters: build_options(&LISTING_SCHEMA, &listings, &listing_groups),
      product_filters: build_options(kind.schema(), &catalog, &product_groups),
      listings: hits,
    })
  }

  /// Searches the catalog entries of one kind, ranked by name.
  ///
  /// # Errors
  ///
  /// `UnknownProductType` when `kind` names no concrete product kind.
  pub fn search_products(&self, kind: &str, params: &QueryParams) -> Result<ProductResults> {
    let kind: ProductKind = kind.parse()?;
    let groups = FilterGroups::gather(kind.schema(), None, params);
    let filter = groups.to_expr();

    let catalog = self.store.products_of_kind(kind);
    let matched: Vec<&Product> = catalog.iter().filter(|p| filter.evaluate(*p)).collect();
    debug!(%kind, candidates = catalog.len(), filtered = matched.len(), "filtered catalog");

    let query = params.query();
    let products: Vec<Product> = self
      .product_ranker
      .rank(matched, query, "name")
      .into_iter()
      .cloned()
      .collect();
    info!(%kind, query, results = products.len(), "product search");

    Ok(ProductResults {
      kind,
      query: query.map(str::to_string),
      filters: build_options(kind.schema(), &catalog, &groups),
      products,
    })
  }
}

/// A builder for creating a `MarketSearch` instance.
pub struct MarketSearchBuilder<S> {
  store: Arc<S>,
  listing_cutoff: f64,
  product_cutoff: f64,
  limit: usize,
  scorer: Scorer,
  max_query_chars: usize,
}

impl<S: Store> MarketSearchBuilder<S> {
  /// Creates a builder with the default configuration.
  pub fn new(store: Arc<S>) -> Self {
    let defaults = MarketConfig::default();
    Self {
      store,
      listing_cutoff: defaults.listing_search_cutoff,
      product_cutoff: defaults.product_search_cutoff,
      limit: defaults.result_limit,
      scorer: defaults.scorer,
      max_query_chars: defaults.max_query_chars,
    }
  }

  /// Minimum score, 0 to 100, a listing title needs to be returned.
  pub fn listing_cutoff(mut self, cutoff: f64) -> Self {
    self.listing_cutoff = cutoff;
    self
  }

  /// Minimum score, 0 to 100, a product name needs to be returned.
  pub fn product_cutoff(mut self, cutoff: f64) -> Self {
    self.product_cutoff = cutoff;
    self
  }

  /// Maximum number of ranked results.
  pub fn limit(mut self, limit: usize) -> Self {
    self.limit = limit;
    self
  }

  pub fn scorer(mut self, scorer: Scorer) -> Self {
    self.scorer = scorer;
    self
  }

  /// Longest query, in characters, that is scored. Longer queries are cut.
  pub fn max_query_chars(mut self, max: usize) -> Self {
    self.max_query_chars = max;
    self
  }

  /// Builds the `MarketSearch` instance.
  pub fn build(self) -> MarketSearch<S> {
    let ranker = |cutoff| {
      FuzzyRanker::new(cutoff)
        .with_limit(self.limit)
        .with_scorer(self.scorer)
        .with_max_query_chars(self.max_query_chars)
    };
    MarketSearch {
      listing_ranker: ranker(self.listing_cutoff),
      product_ranker: ranker(self.product_cutoff),
      store: self.store,
    }
  }
}
