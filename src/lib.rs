//! Boosting Service API Library
//!
//! Backend for a game-boosting storefront:
//! - Deterministic price calculator (per-service rates, rush and stream options)
//! - Order submission into a document store
//! - Testimonial listing with seed-data fallback
//! - Record schema reflection and store diagnostics

pub mod api;
pub mod core;
pub mod models;
pub mod store;
pub mod utils;

pub use crate::core::pricing::{PriceBreakdown, PriceRequest, PricingEngine, RateTable};
pub use models::config::{ServerConfig, StoreConfig};
pub use models::errors::{AppError, AppResult, ErrorCode};
pub use models::types::{Order, Testimonial};
pub use store::{DocumentStore, MemoryStore};
