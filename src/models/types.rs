//! Persisted record shapes: orders and testimonials
//!
//! Each record is checked with `validate()` at the API boundary before it
//! reaches the store.

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::errors::{AppError, AppResult};
use crate::utils::constants::ORDER_STATUS_PENDING;

lazy_static::lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex");
}

/// Check an email address for basic syntactic validity
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

// ============================================
// Order
// ============================================

/// Orders collection schema
/// Collection name: "order"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Order {
    /// Game name e.g., Genshin Impact, Honkai: Star Rail
    pub game: String,
    /// Selected boosting service
    pub service: String,
    /// Units for the service (e.g., floors, hours, levels)
    #[serde(default = "default_quantity")]
    #[schemars(range(min = 1))]
    pub quantity: i64,
    /// Rush order option
    #[serde(default)]
    pub priority: bool,
    /// Live stream option
    #[serde(default)]
    pub streaming: bool,
    /// Server/region
    #[serde(default)]
    pub region: Option<String>,
    /// Account username or UID
    #[serde(default)]
    pub username: Option<String>,
    /// Additional details or requirements
    #[serde(default)]
    pub note: Option<String>,
    /// Customer email for updates
    #[serde(default)]
    #[schemars(email)]
    pub contact_email: Option<String>,
    /// Customer Discord tag
    #[serde(default)]
    pub contact_discord: Option<String>,
    /// Estimated price at time of order
    #[schemars(range(min = 0))]
    pub price_estimate: f64,
    /// Order status
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_quantity() -> i64 {
    1
}

fn default_status() -> String {
    ORDER_STATUS_PENDING.to_string()
}

impl Order {
    /// Enforce field constraints the JSON shape alone cannot express
    pub fn validate(&self) -> AppResult<()> {
        if self.quantity < 1 {
            return Err(AppError::validation(format!(
                "quantity must be greater than or equal to 1, got {}",
                self.quantity
            )));
        }

        if !self.price_estimate.is_finite() || self.price_estimate < 0.0 {
            return Err(AppError::validation(format!(
                "price_estimate must be greater than or equal to 0, got {}",
                self.price_estimate
            )));
        }

        if let Some(email) = &self.contact_email {
            if !is_valid_email(email) {
                return Err(AppError::validation(format!(
                    "contact_email is not a valid email address: {}",
                    email
                )));
            }
        }

        Ok(())
    }
}

// ============================================
// Testimonial
// ============================================

/// Testimonials collection schema
/// Collection name: "testimonial"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Testimonial {
    /// Customer name or alias
    pub name: String,
    /// Game related to the review
    #[serde(default)]
    pub game: Option<String>,
    /// Star rating 1-5
    #[serde(default = "default_rating")]
    #[schemars(range(min = 1, max = 5))]
    pub rating: i64,
    /// Review content
    pub comment: String,
    /// Key positives from the experience
    #[serde(default)]
    pub highlights: Option<Vec<String>>,
}

fn default_rating() -> i64 {
    5
}

impl Testimonial {
    pub fn validate(&self) -> AppResult<()> {
        if !(1..=5).contains(&self.rating) {
            return Err(AppError::validation(format!(
                "rating must be between 1 and 5, got {}",
                self.rating
            )));
        }
        Ok(())
    }

    fn seed(name: &str, game: &str, comment: &str) -> Self {
        Self {
            name: name.to_string(),
            game: Some(game.to_string()),
            rating: 5,
            comment: comment.to_string(),
            highlights: None,
        }
    }

    /// Fixed testimonials served when the store cannot be queried
    pub fn seeds() -> Vec<Testimonial> {
        vec![
            Self::seed(
                "Alex R.",
                "Genshin Impact",
                "Fast, safe, and super friendly. Cleared Abyss 36★ in one evening!",
            ),
            Self::seed(
                "Mina K.",
                "HSR",
                "Efficient farming package. Account felt so much stronger next day.",
            ),
            Self::seed(
                "Neo",
                "Multiple",
                "Professional team. Great communication and fair pricing.",
            ),
        ]
    }
}
