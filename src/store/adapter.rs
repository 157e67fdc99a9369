//! Defines the `Store` trait for pluggable persistence of catalog entries,
//! listings and listing images.

use serde::Serialize;

use crate::catalog::{Product, ProductKind};
use crate::error::Result;
use crate::listing::{Listing, ListingDraft, ListingImage, ListingStatus};
use crate::types::{ImageId, ListingId, ProductId, UserId};

/// Outcome of [`Store::upsert_product`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "id", rename_all = "snake_case")]
pub enum Upsert {
  Created(ProductId),
  Updated(ProductId),
}

impl Upsert {
  pub fn id(self) -> ProductId {
    match self {
      Upsert::Created(id) | Upsert::Updated(id) => id,
    }
  }
}

/// The common interface of a marketplace store.
///
/// Methods take `&self`: implementations synchronise internally so a single
/// store can be shared by every request thread. The `Send` and `Sync` bounds
/// make that sharing possible.
///
/// Owner-scoped operations report a listing that belongs to someone else as
/// [`NotFound`](crate::error::MarketError::NotFound), exactly like a listing
/// that does not exist.
pub trait Store: Send + Sync {
  /// Inserts a catalog entry or updates the entry of the same kind and name.
  ///
  /// # Arguments
  ///
  /// * `product` - The entry to save. Its `id` is ignored; an update keeps the
  ///   id of the entry it replaces.
  ///
  /// # Errors
  ///
  /// Fails with `DuplicateCatalogId` when a different entry already holds
  /// `product.opendb_id`. Nothing is written in that case.
  fn upsert_product(&self, product: Product) -> Result<Upsert>;

  /// Retrieves a catalog entry by id.
  fn product(&self, id: ProductId) -> Option<Product>;

  /// Retrieves the catalog entry of `kind` called `name`.
  fn product_by_name(&self, kind: ProductKind, name: &str) -> Option<Product>;

  /// Every catalog entry of `kind`, in id order.
  fn products_of_kind(&self, kind: ProductKind) -> Vec<Product>;

  /// Removes a catalog entry that no listing refers to.
  ///
  /// # Errors
  ///
  /// `NotFound` for an unknown id, `ProductInUse` while listings refer to it.
  fn delete_product(&self, id: ProductId) -> Result<Product>;

  /// Creates a listing of an existing catalog entry. Drafts failing
  /// [`ListingDraft::validate`] are rejected with `InvalidListing`.
  fn create_listing(&self, seller: UserId, product: ProductId, draft: ListingDraft) -> Result<Listing>;

  /// Retrieves a listing by id.
  fn listing(&self, id: ListingId) -> Option<Listing>;

  /// Every listing, in id order.
  fn listings(&self) -> Vec<Listing>;

  /// Replaces the editable fields of `owner`'s listing `id`. The draft is
  /// validated like on creation.
  fn update_listing(&self, owner: UserId, id: ListingId, draft: ListingDraft) -> Result<Listing>;

  /// Sets the status of `owner`'s listing `id`. Any status may follow any
  /// other.
  fn set_listing_status(&self, owner: UserId, id: ListingId, status: ListingStatus) -> Result<Listing>;

  /// Removes `owner`'s listing `id` together with its images.
  fn delete_listing(&self, owner: UserId, id: ListingId) -> Result<Listing>;

  /// Active listings of `seller`, newest first.
  fn seller_listings(&self, seller: UserId) -> Vec<Listing>;

  /// Attaches an image to `owner`'s listing.
  ///
  /// # Arguments
  ///
  /// * `owner` - The user making the change.
  /// * `listing` - The listing to attach to.
  /// * `url` - Location of the stored image file.
  /// * `primary` - Whether the image becomes the listing's primary image. The
  ///   previous primary, if any, is demoted in the same step.
  fn add_image(&self, owner: UserId, listing: ListingId, url: String, primary: bool) -> Result<ListingImage>;

  /// Makes `image` the only primary image of `owner`'s listing.
  fn set_primary_image(&self, owner: UserId, listing: ListingId, image: ImageId) -> Result<()>;

  /// Detaches an image from `owner`'s listing.
  fn remove_image(&self, owner: UserId, listing: ListingId, image: ImageId) -> Result<ListingImage>;

  /// The images of a listing, in upload order.
  fn images(&self, listing: ListingId) -> Vec<ListingImage>;
}
