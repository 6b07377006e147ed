//! API Request/Response Types
//!
//! Price requests/breakdowns and the record types are shared with the core and
//! models modules; only endpoint-specific shapes live here.

use serde::{Deserialize, Serialize};

pub use crate::core::pricing::{PriceBreakdown, PriceRequest};
pub use crate::models::types::{Order, Testimonial};

// ============================================
// Liveness
// ============================================

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================
// Orders
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub id: String,
    pub status: String,
}

// ============================================
// Testimonials
// ============================================

#[derive(Debug, Deserialize)]
pub struct TestimonialQuery {
    pub limit: Option<usize>,
}

// ============================================
// Diagnostics
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl Default for DiagnosticsReport {
    fn default() -> Self {
        Self {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: env_flag(false),
            database_name: env_flag(false),
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        }
    }
}

/// Masked indicator for a connection setting
pub fn env_flag(is_set: bool) -> String {
    if is_set { "✅ Set" } else { "❌ Not Set" }.to_string()
}
