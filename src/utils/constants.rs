//! Constants Module - Single Source of Truth
//!
//! Rates, fees, collection names and environment keys used across the service.
//! Other modules read their fixed values from here.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "Boosting Service API";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default listen host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8000;

// ============================================
// ENVIRONMENT KEYS
// ============================================

pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_DATABASE_NAME: &str = "DATABASE_NAME";

// ============================================
// PRICING
// ============================================

/// Unit rates per service key (lowercase)
///
/// - exploration: per 10% map or zone
/// - spiral_abyss: per floor
/// - leveling: per level
/// - farming: per hour
/// - boss_runs: per run
pub const SERVICE_RATES: [(&str, f64); 5] = [
    ("exploration", 5.0),
    ("spiral_abyss", 12.0),
    ("leveling", 3.5),
    ("farming", 8.0),
    ("boss_runs", 6.0),
];

/// Rush order multiplier applied to the base price
pub const PRIORITY_MULTIPLIER: f64 = 1.25;

/// Flat live-stream fee, not scaled by quantity or priority
pub const STREAMING_FEE: f64 = 3.0;

// ============================================
// DOCUMENT STORE
// ============================================

pub const ORDER_COLLECTION: &str = "order";
pub const TESTIMONIAL_COLLECTION: &str = "testimonial";

/// Store-internal identifier field, never returned to callers
pub const DOCUMENT_ID_FIELD: &str = "_id";

/// URL scheme selecting the in-process store
pub const MEMORY_STORE_SCHEME: &str = "memory://";

/// Default page size for testimonial listing
pub const DEFAULT_TESTIMONIAL_LIMIT: usize = 10;

/// Max collection names reported by the diagnostics endpoint
pub const DIAGNOSTIC_COLLECTION_LIMIT: usize = 10;

/// Max characters of an error message echoed by the diagnostics endpoint
pub const DIAGNOSTIC_ERROR_CHARS: usize = 50;

/// Default order status
pub const ORDER_STATUS_PENDING: &str = "pending";

/// Status returned once an order has been stored
pub const ORDER_STATUS_RECEIVED: &str = "received";
