//! Favorite product snapshot

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Product;

/// Snapshot of a product a customer marked as favorite.
///
/// Stored locally per storefront, so it keeps the fields needed to render
/// the favorites list without hitting the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteProduct {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
}

impl From<&Product> for FavoriteProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            category_id: Some(product.category_id.clone()),
        }
    }
}
