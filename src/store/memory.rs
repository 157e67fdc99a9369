//! In-memory store implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::{Product, ProductKind};
use crate::error::{MarketError, Result};
use crate::listing::{Listing, ListingDraft, ListingImage, ListingImages, ListingStatus};
use crate::store::adapter::{Store, Upsert};
use crate::types::{ImageId, ListingId, ProductId, UserId};

/// In-memory store using sharded concurrent maps.
///
/// Ids start at 1 and are never reused.
pub struct MemoryStore {
    products: DashMap<ProductId, Product>,
    by_name: DashMap<(ProductKind, String), ProductId>,
    by_opendb: DashMap<Uuid, ProductId>,
    listings: DashMap<ListingId, Listing>,
    images: DashMap<ListingId, ListingImages>,
    next_product: AtomicU64,
    next_listing: AtomicU64,
    next_image: AtomicU64,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            products: DashMap::new(),
            by_name: DashMap::new(),
            by_opendb: DashMap::new(),
            listings: DashMap::new(),
            images: DashMap::new(),
            next_product: AtomicU64::new(1),
            next_listing: AtomicU64::new(1),
            next_image: AtomicU64::new(1),
        }
    }

    /// The listing `id`, provided `owner` sold it.
    fn owned_listing(&self, owner: UserId, id: ListingId) -> Result<Listing> {
        self.listings
            .get(&id)
            .filter(|listing| listing.seller == owner)
            .map(|listing| listing.value().clone())
            .ok_or_else(|| MarketError::not_found("listing", id))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn upsert_product(&self, mut product: Product) -> Result<Upsert> {
        let name_entry = self.by_name.entry((product.kind(), product.name.clone()));
        let existing = match &name_entry {
            Entry::Occupied(entry) => Some(*entry.get()),
            Entry::Vacant(_) => None,
        };

        let id = match self.by_opendb.entry(product.opendb_id) {
            Entry::Occupied(entry) => {
                let holder = *entry.get();
                if Some(holder) != existing {
                    drop(entry);
                    let existing = self
                        .products
                        .get(&holder)
                        .map(|p| p.name.clone())
                        .unwrap_or_default();
                    return Err(MarketError::DuplicateCatalogId {
                        opendb_id: product.opendb_id,
                        name: product.name,
                        existing,
                    });
                }
                holder
            }
            Entry::Vacant(entry) => {
                let id = existing.unwrap_or_else(|| self.next_product.fetch_add(1, Ordering::Relaxed));
                entry.insert(id);
                id
            }
        };

        // An update may move the entry to a new catalog id.
        let previous = self.products.get(&id).map(|p| p.opendb_id);
        if let Some(old) = previous.filter(|old| *old != product.opendb_id) {
            self.by_opendb.remove(&old);
        }

        product.id = id;
        self.products.insert(id, product);

        match name_entry {
            Entry::Occupied(_) => {
                debug!(id, "updated catalog entry");
                Ok(Upsert::Updated(id))
            }
            Entry::Vacant(entry) => {
                entry.insert(id);
                debug!(id, "created catalog entry");
                Ok(Upsert::Created(id))
            }
        }
    }

    fn product(&self, id: ProductId) -> Option<Product> {
        self.products.get(&id).map(|p| p.value().clone())
    }

    fn product_by_name(&self, kind: ProductKind, name: &str) -> Option<Product> {
        let id = *self.by_name.get(&(kind, name.to_string()))?;
        self.product(id)
    }

    fn products_of_kind(&self, kind: ProductKind) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.kind() == kind)
            .map(|p| p.value().clone())
            .collect();
        products.sort_by_key(|p| p.id);
        products
    }

    fn delete_product(&self, id: ProductId) -> Result<Product> {
        if !self.products.contains_key(&id) {
            return Err(MarketError::not_found("product", id));
        }
        let listings = self.listings.iter().filter(|l| l.product == id).count();
        if listings > 0 {
            return Err(MarketError::ProductInUse { product_id: id, listings });
        }

        let (_, product) = self
            .products
            .remove(&id)
            .ok_or_else(|| MarketError::not_found("product", id))?;
        self.by_name.remove(&(product.kind(), product.name.clone()));
        self.by_opendb.remove(&product.opendb_id);
        info!(id, name = %product.name, "deleted catalog entry");
        Ok(product)
    }

    fn create_listing(&self, seller: UserId, product: ProductId, draft: ListingDraft) -> Result<Listing> {
        draft.validate()?;
        if !self.products.contains_key(&product) {
            return Err(MarketError::not_found("product", product));
        }
        let id = self.next_listing.fetch_add(1, Ordering::Relaxed);
        let listing = Listing::from_draft(id, seller, product, draft);
        self.listings.insert(id, listing.clone());
        info!(id, seller, product, "created listing");
        Ok(listing)
    }

    fn listing(&self, id: ListingId) -> Option<Listing> {
        self.listings.get(&id).map(|l| l.value().clone())
    }

    fn listings(&self) -> Vec<Listing> {
        let mut listings: Vec<Listing> = self.listings.iter().map(|l| l.value().clone()).collect();
        listings.sort_by_key(|l| l.id);
        listings
    }

    fn update_listing(&self, owner: UserId, id: ListingId, draft: ListingDraft) -> Result<Listing> {
        draft.validate()?;
        let mut listing = self
            .listings
            .get_mut(&id)
            .filter(|listing| listing.seller == owner)
            .ok_or_else(|| MarketError::not_found("listing", id))?;
        listing.apply(draft);
        debug!(id, owner, "updated listing");
        Ok(listing.value().clone())
    }

    fn set_listing_status(&self, owner: UserId, id: ListingId, status: ListingStatus) -> Result<Listing> {
        let mut listing = self
            .listings
            .get_mut(&id)
            .filter(|listing| listing.seller == owner)
            .ok_or_else(|| MarketError::not_found("listing", id))?;
        listing.status = status;
        debug!(id, owner, status = status.as_str(), "changed listing status");
        Ok(listing.value().clone())
    }

    fn delete_listing(&self, owner: UserId, id: ListingId) -> Result<Listing> {
        let (_, listing) = self
            .listings
            .remove_if(&id, |_, listing| listing.seller == owner)
            .ok_or_else(|| MarketError::not_found("listing", id))?;
        self.images.remove(&id);
        info!(id, owner, "deleted listing");
        Ok(listing)
    }

    fn seller_listings(&self, seller: UserId) -> Vec<Listing> {
        let mut listings: Vec<Listing> = self
            .listings
            .iter()
            .filter(|l| l.seller == seller && l.status == ListingStatus::Active)
            .map(|l| l.value().clone())
            .collect();
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        listings
    }

    fn add_image(&self, owner: UserId, listing: ListingId, url: String, primary: bool) -> Result<ListingImage> {
        // The listing guard is held across the insert, so a concurrent delete
        // either runs first and fails this call or runs after and drops the image.
        let owned = self
            .listings
            .get(&listing)
            .filter(|entry| entry.seller == owner)
            .ok_or_else(|| MarketError::not_found("listing", listing))?;
        let image = ListingImage {
            id: self.next_image.fetch_add(1, Ordering::Relaxed),
            listing,
            url,
            is_primary: primary,
        };
        self.images.entry(listing).or_default().push(image.clone());
        drop(owned);
        debug!(listing, image = image.id, primary, "added image");
        Ok(image)
    }

    fn set_primary_image(&self, owner: UserId, listing: ListingId, image: ImageId) -> Result<()> {
        self.owned_listing(owner, listing)?;
        let updated = self
            .images
            .get_mut(&listing)
            .map(|mut images| images.set_primary(image))
            .unwrap_or(false);
        if !updated {
            return Err(MarketError::not_found("image", image));
        }
        debug!(listing, image, "set primary image");
        Ok(())
    }

    fn remove_image(&self, owner: UserId, listing: ListingId, image: ImageId) -> Result<ListingImage> {
        self.owned_listing(owner, listing)?;
        self.images
            .get_mut(&listing)
            .and_then(|mut images| images.remove(image))
            .ok_or_else(|| MarketError::not_found("image", image))
    }

    fn images(&self, listing: ListingId) -> Vec<ListingImage> {
        self.images
            .get(&listing)
            .map(|images| images.to_vec())
            .unwrap_or_default()
    }
}
