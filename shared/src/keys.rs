//! Local storage keys
//!
//! Every value stored under these keys is JSON encoded.

/// Full theme settings record
pub const THEME_SETTINGS: &str = "themeSettings";

/// Prefix of the per-storefront favorites list, see [`favorites_key`]
pub const FAVORITES_PREFIX: &str = "qrmenu_favorites_";

// ========== Admin session flags ==========

pub const IS_ADMIN_LOGGED_IN: &str = "isAdminLoggedIn";
pub const IS_SUPER_ADMIN: &str = "isSuperAdmin";
pub const CURRENT_BUSINESS_SLUG: &str = "currentBusinessSlug";
pub const CURRENT_BUSINESS_ID: &str = "currentBusinessId";
pub const CURRENT_BUSINESS_NAME: &str = "currentBusinessName";
pub const ADMIN_PHONE: &str = "adminPhone";

/// All keys written by the login flow
pub const SESSION_KEYS: [&str; 6] = [
    IS_ADMIN_LOGGED_IN,
    IS_SUPER_ADMIN,
    CURRENT_BUSINESS_SLUG,
    CURRENT_BUSINESS_ID,
    CURRENT_BUSINESS_NAME,
    ADMIN_PHONE,
];

/// Favorites key for one storefront tenant
pub fn favorites_key(slug: &str) -> String {
    format!("{FAVORITES_PREFIX}{slug}")
}
