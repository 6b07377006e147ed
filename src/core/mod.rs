//! Core Module - Business Logic
//!
//! The pricing engine: the only part of the service with business rules.

pub mod pricing;

pub use pricing::*;
