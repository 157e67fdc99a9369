//! Seller listings of catalog entries.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::{MarketError, Result};
use crate::types::{
  AsFieldValue, EntitySchema, FieldDescriptor, FieldKind, FieldValue, FieldAccess, ImageId,
  ListingId, ProductId, UserId,
};

/// Physical condition of the listed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
  New,
  LikeNew,
  Refurbished,
  Used,
  ForParts,
}

impl Condition {
  pub fn as_str(self) -> &'static str {
    match self {
      Condition::New => "new",
      Condition::LikeNew => "like_new",
      Condition::Refurbished => "refurbished",
      Condition::Used => "used",
      Condition::ForParts => "for_parts",
    }
  }
}

impl fmt::Display for Condition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Sale status. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
  #[default]
  Active,
  Sold,
  Pending,
  Inactive,
}

impl ListingStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      ListingStatus::Active => "active",
      ListingStatus::Sold => "sold",
      ListingStatus::Pending => "pending",
      ListingStatus::Inactive => "inactive",
    }
  }
}

/// A seller's offer of a catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
  pub id: ListingId,
  pub seller: UserId,
  /// The listed catalog entry. Fixed once the listing exists.
  pub product: ProductId,
  pub title: String,
  pub description: String,
  pub condition: Condition,
  pub price: Decimal,
  pub stock: i64,
  pub status: ListingStatus,
  pub location: Option<String>,
  pub shipping_terms: Option<String>,
  pub created_at: DateTime<Utc>,
}

/// Digits a listing price may carry after the decimal point.
pub const PRICE_DECIMAL_PLACES: u32 = 2;
/// Total digits a listing price may carry.
pub const PRICE_MAX_DIGITS: u32 = 10;

/// The seller-editable part of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingDraft {
  pub title: String,
  #[serde(default)]
  pub description: String,
  pub condition: Condition,
  pub price: Decimal,
  #[serde(default)]
  pub stock: i64,
  #[serde(default)]
  pub status: ListingStatus,
  #[serde(default)]
  pub location: Option<String>,
  #[serde(default)]
  pub shipping_terms: Option<String>,
}

impl ListingDraft {
  pub fn new(title: impl Into<String>, condition: Condition, price: Decimal) -> Self {
    Self {
      title: title.into(),
      description: String::new(),
      condition,
      price,
      stock: 0,
      status: ListingStatus::Active,
      location: None,
      shipping_terms: None,
    }
  }

  pub fn stock(mut self, stock: i64) -> Self {
    self.stock = stock;
    self
  }

  pub fn description(mut self, description: impl Into<String>) -> Self {
    self.description = description.into();
    self
  }

  pub fn location(mut self, location: impl Into<String>) -> Self {
    self.location = Some(location.into());
    self
  }

  pub fn shipping_terms(mut self, terms: impl Into<String>) -> Self {
    self.shipping_terms = Some(terms.into());
    self
  }

  /// Checks that stock and price fit a listing.
  ///
  /// Stock may not be negative. The price may not be negative and carries at
  /// most [`PRICE_MAX_DIGITS`] digits, [`PRICE_DECIMAL_PLACES`] of them after
  /// the decimal point. Trailing zeros do not count.
  pub fn validate(&self) -> Result<()> {
    if self.stock < 0 {
      return Err(MarketError::InvalidListing(format!(
        "stock must not be negative, got {}",
        self.stock
      )));
    }
    if self.price < Decimal::ZERO {
      return Err(MarketError::InvalidListing(format!(
        "price must not be negative, got {}",
        self.price
      )));
    }

    let price = self.price.normalize();
    if price.scale() > PRICE_DECIMAL_PLACES {
      return Err(MarketError::InvalidListing(format!(
        "price {price} has more than {PRICE_DECIMAL_PLACES} decimal places"
      )));
    }
    let limit = Decimal::from(10i64.pow(PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES));
    if price >= limit {
      return Err(MarketError::InvalidListing(format!(
        "price {price} has more than {PRICE_MAX_DIGITS} digits"
      )));
    }
    Ok(())
  }
}

impl Listing {
  pub(crate) fn from_draft(
    id: ListingId,
    seller: UserId,
    product: ProductId,
    draft: ListingDraft,
  ) -> Self {
    Self {
      id,
      seller,
      product,
      title: draft.title,
      description: draft.description,
      condition: draft.condition,
      price: draft.price,
      stock: draft.stock,
      status: draft.status,
      location: draft.location,
      shipping_terms: draft.shipping_terms,
      created_at: Utc::now(),
    }
  }

  /// Overwrites every seller-editable field with `draft`.
  pub(crate) fn apply(&mut self, draft: ListingDraft) {
    self.title = draft.title;
    self.description = draft.description;
    self.condition = draft.condition;
    self.price = draft.price;
    self.stock = draft.stock;
    self.status = draft.status;
    self.location = draft.location;
    self.shipping_terms = draft.shipping_terms;
  }
}

const LISTING_FIELDS: &[FieldDescriptor] = &[
  FieldDescriptor { name: "title", kind: FieldKind::String, label: "Title", path: "" },
  FieldDescriptor { name: "description", kind: FieldKind::String, label: "Description", path: "" },
  FieldDescriptor { name: "condition", kind: FieldKind::String, label: "Condition", path: "" },
  FieldDescriptor { name: "price", kind: FieldKind::Decimal, label: "Price", path: "" },
  FieldDescriptor { name: "stock", kind: FieldKind::Integer, label: "Stock", path: "" },
  FieldDescriptor { name: "status", kind: FieldKind::String, label: "Status", path: "" },
  FieldDescriptor { name: "location", kind: FieldKind::String, label: "Location", path: "" },
  FieldDescriptor { name: "shipping_terms", kind: FieldKind::String, label: "Shipping", path: "" },
];

/// Declared fields and filter allowlist of [`Listing`].
pub static LISTING_SCHEMA: EntitySchema = EntitySchema {
  name: "Listing",
  groups: &[LISTING_FIELDS],
  filter_fields: &["price", "condition"],
};

impl FieldAccess for Listing {
  fn field(&self, name: &str) -> Option<FieldValue<'_>> {
    match name {
      "title" => Some(FieldValue::Text(&self.title)),
      "description" => Some(FieldValue::Text(&self.description)),
      "condition" => Some(FieldValue::Text(self.condition.as_str())),
      "price" => Some(FieldValue::Decimal(self.price)),
      "stock" => Some(FieldValue::Integer(self.stock)),
      "status" => Some(FieldValue::Text(self.status.as_str())),
      "location" => self.location.as_field_value(),
      "shipping_terms" => self.shipping_terms.as_field_value(),
      _ => None,
    }
  }
}

/// Prefix under which a listing row exposes its catalog entry's fields.
pub const PRODUCT_PREFIX: &str = "product";

/// A listing joined with its catalog entry.
///
/// Field names under [`PRODUCT_PREFIX`] (`product.cores_tot`) resolve against
/// the catalog entry; all other names resolve against the listing.
#[derive(Debug, Clone, Copy)]
pub struct ListingRow<'a> {
  pub listing: &'a Listing,
  pub product: &'a Product,
}

impl FieldAccess for ListingRow<'_> {
  fn field(&self, name: &str) -> Option<FieldValue<'_>> {
    match name.split_once('.') {
      Some((PRODUCT_PREFIX, rest)) => self.product.field(rest),
      _ => self.listing.field(name),
    }
  }
}

/// A picture attached to a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingImage {
  pub id: ImageId,
  pub listing: ListingId,
  /// Location of the stored image file.
  pub url: String,
  pub is_primary: bool,
}

/// The images of one listing, in upload order. At most one is primary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingImages {
  images: Vec<ListingImage>,
}

impl ListingImages {
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends `image`. A primary image demotes the current primary.
  pub fn push(&mut self, image: ListingImage) {
    if image.is_primary {
      self.clear_primary();
    }
    self.images.push(image);
  }

  /// Makes `id` the only primary image. Returns `false`, leaving every flag
  /// untouched, when no image has that id.
  pub fn set_primary(&mut self, id: ImageId) -> bool {
    if !self.images.iter().any(|image| image.id == id) {
      return false;
    }
    for image in &mut self.images {
      image.is_primary = image.id == id;
    }
    true
  }

  pub fn remove(&mut self, id: ImageId) -> Option<ListingImage> {
    let pos = self.images.iter().position(|image| image.id == id)?;
    Some(self.images.remove(pos))
  }

  pub fn primary(&self) -> Option<&ListingImage> {
    self.images.iter().find(|image| image.is_primary)
  }

  pub fn iter(&self) -> std::slice::Iter<'_, ListingImage> {
    self.images.iter()
  }

  pub fn len(&self) -> usize {
    self.images.len()
  }

  pub fn is_empty(&self) -> bool {
    self.images.is_empty()
  }

  pub fn to_vec(&self) -> Vec<ListingImage> {
    self.images.clone()
  }

  fn clear_primary(&mut self) {
    for image in &mut self.images {
      image.is_primary = false;
    }
  }
}
