//! Per-storefront favorites
//!
//! Customers can star products without an account. The list lives in local
//! storage under `qrmenu_favorites_<slug>`, so each tenant has its own.

use shared::keys;
use shared::models::{FavoriteProduct, Product};
use std::sync::Arc;

use crate::storage::{LocalStorage, StorageResult, read_json, write_json};

pub struct FavoritesStore {
    storage: Arc<dyn LocalStorage>,
    key: String,
}

impl FavoritesStore {
    pub fn new(storage: Arc<dyn LocalStorage>, business_slug: &str) -> Self {
        Self {
            storage,
            key: keys::favorites_key(business_slug),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Saved snapshots, oldest first. Unreadable content counts as empty.
    pub fn list(&self) -> Vec<FavoriteProduct> {
        match read_json::<Vec<FavoriteProduct>>(self.storage.as_ref(), &self.key) {
            Ok(list) => list.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Ignoring unreadable favorites");
                Vec::new()
            }
        }
    }

    pub fn is_favorite(&self, product_id: &str) -> bool {
        self.list().iter().any(|f| f.id == product_id)
    }

    /// Add or remove; returns whether the product is a favorite afterwards
    pub fn toggle(&self, product: &Product) -> StorageResult<bool> {
        let mut list = self.list();
        let before = list.len();
        list.retain(|f| f.id != product.id);
        let added = list.len() == before;
        if added {
            list.push(FavoriteProduct::from(product));
        }
        write_json(self.storage.as_ref(), &self.key, &list)?;
        tracing::debug!(id = %product.id, added, "Favorite toggled");
        Ok(added)
    }

    /// Returns false when the product was not saved
    pub fn remove(&self, product_id: &str) -> StorageResult<bool> {
        let mut list = self.list();
        let before = list.len();
        list.retain(|f| f.id != product_id);
        if list.len() == before {
            return Ok(false);
        }
        write_json(self.storage.as_ref(), &self.key, &list)?;
        Ok(true)
    }

    pub fn clear(&self) -> StorageResult<()> {
        self.storage.remove_item(&self.key)
    }
}
