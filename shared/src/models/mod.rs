//! Data models
//!
//! Rows of the remote table store (`businesses`, `categories`, `products`,
//! `tags`, `feedbacks`) plus the locally persisted records (theme settings,
//! favorites). All ids are opaque strings.

pub mod business;
pub mod category;
pub mod favorite;
pub mod feedback;
pub mod product;
pub mod tag;
pub mod theme;

// Re-exports
pub use business::*;
pub use category::*;
pub use favorite::*;
pub use feedback::*;
pub use product::*;
pub use tag::*;
pub use theme::*;

use validator::ValidationError;

pub(crate) fn default_true() -> bool {
    true
}

/// Rejects text that is empty once trimmed
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
