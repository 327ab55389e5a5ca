//! Tag Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_not_blank;

/// Tag entity (e.g. "Vegan", "Acılı")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub business_id: String,
    pub name: String,
    #[serde(default = "default_tag_color")]
    pub color: String,
}

fn default_tag_color() -> String {
    "#6b7280".to_string()
}

/// Create tag payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TagCreate {
    #[validate(length(min = 1, max = 40), custom(function = "validate_not_blank"))]
    pub name: String,
    pub color: Option<String>,
}
