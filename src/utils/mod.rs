//! Utils Module - Helper Functions & Shared Utilities
//!
//! Shared constants and small helpers used across the service.

pub mod constants;

pub use constants::*;

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to 2 fractional digits, ties to even, on the exact binary value
///
/// 13.125 -> 13.12 (a true tie), 2.675 -> 2.67 (stored as 2.67499...).
/// The rounded decimal is parsed back so the result is the nearest f64.
/// Non-finite input is returned unchanged.
pub fn round2(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_string().parse::<f64>().ok())
        .unwrap_or(value)
}

/// Truncate a message to at most `max_chars` characters (char-boundary safe)
pub fn truncate_chars(message: &str, max_chars: usize) -> String {
    message.chars().take(max_chars).collect()
}
