//! Pricing Engine
//!
//! Deterministic price calculation for boosting services:
//! - unit rate per service key (case-insensitive)
//! - priority multiplier on the base price
//! - flat streaming fee as an addon
//!
//! The rate table is immutable after construction and shared by reference,
//! so `calculate` can run from any number of request tasks at once.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::{PRIORITY_MULTIPLIER, SERVICE_RATES, STREAMING_FEE};
use crate::utils::round2;

/// Price calculation input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRequest {
    pub service: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub priority: bool,
    #[serde(default)]
    pub streaming: bool,
}

fn default_quantity() -> i64 {
    1
}

impl PriceRequest {
    pub fn new(service: impl Into<String>, quantity: i64) -> Self {
        Self {
            service: service.into(),
            quantity,
            priority: false,
            streaming: false,
        }
    }

    pub fn with_priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }
}

/// Price calculation output, every amount rounded to cents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_price: f64,
    pub addons: f64,
    pub total: f64,
}

/// Immutable service key -> unit rate mapping
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    rates: BTreeMap<String, f64>,
}

impl Default for RateTable {
    fn default() -> Self {
        Self::from_entries(SERVICE_RATES.iter().map(|(k, v)| (*k, *v)))
    }
}

impl RateTable {
    /// Build a table; keys are stored lowercase, negative rates are clamped to 0
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let rates = entries
            .into_iter()
            .map(|(service, rate)| (service.to_lowercase(), rate.max(0.0)))
            .collect();
        Self { rates }
    }

    /// Case-insensitive lookup
    pub fn rate(&self, service: &str) -> Option<f64> {
        self.rates.get(&service.to_lowercase()).copied()
    }

    /// Known service keys, sorted
    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Pricing engine over an injected rate table
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    rates: RateTable,
}

impl PricingEngine {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Compute the price breakdown for a request
    ///
    /// Fails only when the service key is not in the rate table. Quantities
    /// below 1 are treated as 1.
    pub fn calculate(&self, req: &PriceRequest) -> AppResult<PriceBreakdown> {
        let service_key = req.service.to_lowercase();
        let unit_rate = self
            .rates
            .rate(&service_key)
            .ok_or_else(AppError::unknown_service)?;

        let mut base_price = unit_rate * req.quantity.max(1) as f64;
        if req.priority {
            base_price *= PRIORITY_MULTIPLIER;
        }

        let addons = if req.streaming { STREAMING_FEE } else { 0.0 };

        // total is rounded from the unrounded sum, not from the rounded parts
        let total = round2(base_price + addons);

        Ok(PriceBreakdown {
            base_price: round2(base_price),
            addons: round2(addons),
            total,
        })
    }
}
