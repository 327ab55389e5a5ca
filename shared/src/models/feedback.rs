//! Feedback Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_not_blank;

/// Per-aspect ratings, each 1..=5 or 0 when the customer skipped it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct FeedbackRatings {
    #[serde(default)]
    #[validate(range(max = 5))]
    pub food: u8,
    #[serde(default)]
    #[validate(range(max = 5))]
    pub service: u8,
    #[serde(default)]
    #[validate(range(max = 5))]
    pub ambiance: u8,
}

impl FeedbackRatings {
    pub fn new(food: u8, service: u8, ambiance: u8) -> Self {
        Self {
            food,
            service,
            ambiance,
        }
    }

    /// Overall rating: rounded mean of the rated (non-zero) aspects.
    ///
    /// Returns 0 when nothing was rated. Halves round up, so
    /// `{food: 4, service: 0, ambiance: 5}` gives 5.
    pub fn overall(&self) -> u8 {
        let rated: Vec<u8> = [self.food, self.service, self.ambiance]
            .into_iter()
            .filter(|r| *r > 0)
            .collect();
        if rated.is_empty() {
            return 0;
        }
        let sum: u32 = rated.iter().map(|r| u32::from(*r)).sum();
        let mean = f64::from(sum) / rated.len() as f64;
        mean.round() as u8
    }

    /// True when at least one aspect was rated
    pub fn any_rated(&self) -> bool {
        self.overall() > 0
    }
}

/// Feedback entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: String,
    pub business_id: String,
    pub author_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub ratings: FeedbackRatings,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub is_read: bool,
    /// Creation time, UTC milliseconds
    pub created_at: i64,
}

impl Feedback {
    /// Derived overall rating; never stored
    pub fn overall_rating(&self) -> u8 {
        self.ratings.overall()
    }
}

/// Customer feedback submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedbackCreate {
    #[validate(length(min = 1, max = 80), custom(function = "validate_not_blank"))]
    pub author_name: String,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(nested)]
    pub ratings: FeedbackRatings,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub comment: String,
}
