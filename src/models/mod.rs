//! Models Module - Data Structures & Configuration
//!
//! Record types, schemas, errors and configuration live here.

pub mod config;
pub mod errors;
pub mod schema;
pub mod types;

pub use config::*;
pub use errors::*;
pub use schema::*;
pub use types::*;
