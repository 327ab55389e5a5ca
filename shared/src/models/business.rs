//! Business (tenant) Model

use serde::{Deserialize, Serialize};

use super::default_true;

/// One restaurant account, addressed publicly by its slug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    /// Unique public identifier used in storefront URLs
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    /// Home view banners, rendered in array order
    #[serde(default)]
    pub slider_items: Vec<SliderItem>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<i64>,
}

impl Business {
    /// Public storefront URL, the payload encoded into the table QR code
    pub fn menu_url(&self, base_url: &str) -> String {
        format!("{}/menu/{}", base_url.trim_end_matches('/'), self.slug)
    }
}

/// Promotional banner shown on the storefront home view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Image URL or embedded data URL
    pub image: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_url_trims_trailing_slash() {
        let business: Business = serde_json::from_value(serde_json::json!({
            "id": "b1",
            "slug": "lezzet-duragi",
            "name": "Lezzet Durağı"
        }))
        .unwrap();
        assert_eq!(
            business.menu_url("https://menu.example.com/"),
            "https://menu.example.com/menu/lezzet-duragi"
        );
        assert!(business.slider_items.is_empty());
        assert!(business.is_active);
    }
}
