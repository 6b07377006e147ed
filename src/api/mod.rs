//! Storefront REST API Module
//! Price calculation, orders, testimonials, schema and diagnostics endpoints

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use handlers::AppState;
pub use routes::create_router;
pub use types::*;
