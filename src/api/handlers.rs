//! API Request Handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Json, Query, State,
    },
    http::Uri,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::types::*;
use crate::core::pricing::PricingEngine;
use crate::models::config::StoreConfig;
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::schema::schema_document;
use crate::store::{create_document, get_documents, DocumentStore};
use crate::utils::constants::{
    APP_NAME, DEFAULT_TESTIMONIAL_LIMIT, DIAGNOSTIC_COLLECTION_LIMIT, DIAGNOSTIC_ERROR_CHARS,
    DOCUMENT_ID_FIELD, ORDER_COLLECTION, ORDER_STATUS_RECEIVED, TESTIMONIAL_COLLECTION,
};
use crate::utils::truncate_chars;

/// Shared application state
pub struct AppState {
    pub pricing: PricingEngine,
    pub store: Option<Arc<dyn DocumentStore>>,
    pub store_config: StoreConfig,
}

impl AppState {
    pub fn new(
        pricing: PricingEngine,
        store: Option<Arc<dyn DocumentStore>>,
        store_config: StoreConfig,
    ) -> Self {
        Self {
            pricing,
            store,
            store_config,
        }
    }

    fn require_store(&self) -> AppResult<&dyn DocumentStore> {
        self.store.as_deref().ok_or_else(|| {
            AppError::store_unavailable(
                "Database not available. Check DATABASE_URL and DATABASE_NAME environment variables.",
            )
        })
    }
}

/// Unwrap a JSON body, turning extractor rejections into validation errors
fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::validation(rejection.body_text()))
}

// ============================================
// Liveness
// ============================================

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new(format!("{} running", APP_NAME)))
}

pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello from the backend API!"))
}

// ============================================
// Price Calculation
// ============================================

pub async fn calculate_price(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PriceRequest>, JsonRejection>,
) -> AppResult<Json<PriceBreakdown>> {
    let req = parse_body(payload)?;

    match state.pricing.calculate(&req) {
        Ok(breakdown) => {
            info!(
                service = %req.service,
                quantity = req.quantity,
                priority = req.priority,
                streaming = req.streaming,
                total = breakdown.total,
                "💰 Price calculated"
            );
            Ok(Json(breakdown))
        }
        Err(e) => {
            let known: Vec<&str> = state.pricing.rates().services().collect();
            warn!(service = %req.service, known = ?known, "Unknown service requested");
            Err(e)
        }
    }
}

// ============================================
// Orders
// ============================================

pub async fn create_order(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Order>, JsonRejection>,
) -> AppResult<Json<OrderReceipt>> {
    let order = parse_body(payload)?;
    order.validate()?;

    // price_estimate is stored as submitted; it is not re-priced here
    let store = state.require_store().map_err(|e| {
        error!(code = e.code_str(), "❌ Order rejected: {}", e.message);
        e
    })?;

    let id = create_document(store, ORDER_COLLECTION, &order)
        .await
        .map_err(|e| {
            error!(code = e.code_str(), "❌ Failed to store order: {}", e.message);
            match e.code.http_status() {
                500 => e,
                _ => AppError::new(ErrorCode::StoreWriteFailed, e.message),
            }
        })?;

    info!(
        id = %id,
        game = %order.game,
        service = %order.service,
        price_estimate = order.price_estimate,
        "📦 Order received"
    );

    Ok(Json(OrderReceipt {
        id,
        status: ORDER_STATUS_RECEIVED.to_string(),
    }))
}

// ============================================
// Testimonials
// ============================================

pub async fn list_testimonials(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TestimonialQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Testimonial>>> {
    let Query(query) =
        query.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let limit = query.limit.unwrap_or(DEFAULT_TESTIMONIAL_LIMIT);

    match fetch_testimonials(&state, limit).await {
        Ok(testimonials) => Ok(Json(testimonials)),
        Err(e) => {
            warn!(code = e.code_str(), "Serving seed testimonials: {}", e.message);
            Ok(Json(Testimonial::seeds().into_iter().take(limit).collect()))
        }
    }
}

async fn fetch_testimonials(state: &AppState, limit: usize) -> AppResult<Vec<Testimonial>> {
    let store = state.require_store()?;
    let docs = get_documents(store, TESTIMONIAL_COLLECTION, Map::new(), limit).await?;

    docs.into_iter()
        .map(|mut doc| -> AppResult<Testimonial> {
            if let Value::Object(fields) = &mut doc {
                fields.remove(DOCUMENT_ID_FIELD);
            }
            let testimonial: Testimonial = serde_json::from_value(doc)?;
            testimonial.validate()?;
            Ok(testimonial)
        })
        .collect()
}

// ============================================
// Schema
// ============================================

pub async fn get_schema() -> Json<Value> {
    Json(schema_document())
}

// ============================================
// Diagnostics
// ============================================

/// Report store availability; never fails
pub async fn test_database(State(state): State<Arc<AppState>>) -> Json<DiagnosticsReport> {
    let mut report = DiagnosticsReport::default();

    match state.store.as_deref() {
        Some(store) => {
            report.database = "✅ Available".to_string();
            report.connection_status = "Connected".to_string();

            match store.list_collections().await {
                Ok(collections) => {
                    report.collections = collections
                        .into_iter()
                        .take(DIAGNOSTIC_COLLECTION_LIMIT)
                        .collect();
                    report.database = "✅ Connected & Working".to_string();
                }
                Err(e) => {
                    warn!(code = e.code_str(), "Collection listing failed: {}", e.message);
                    report.database = format!(
                        "⚠️  Connected but Error: {}",
                        truncate_chars(&e.message, DIAGNOSTIC_ERROR_CHARS)
                    );
                }
            }
        }
        None => {
            report.database = "⚠️  Available but not initialized".to_string();
        }
    }

    report.database_url = env_flag(state.store_config.database_url.is_some());
    report.database_name = env_flag(state.store_config.database_name.is_some());

    Json(report)
}

// ============================================
// Fallback
// ============================================

pub async fn not_found(uri: Uri) -> AppError {
    AppError::new(ErrorCode::ApiNotFound, format!("No route for {}", uri.path()))
}
