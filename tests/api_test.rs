//! End-to-end tests for the storefront router

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use boost_api::api::{create_router, AppState};
use boost_api::{
    AppError, AppResult, DocumentStore, MemoryStore, PricingEngine, RateTable, StoreConfig,
};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Store that fails every operation
struct BrokenStore;

#[async_trait]
impl DocumentStore for BrokenStore {
    fn name(&self) -> &str {
        "broken"
    }

    async fn create(&self, _collection: &str, _document: Value) -> AppResult<String> {
        Err(AppError::store_write_failed("connection reset by peer"))
    }

    async fn query(
        &self,
        _collection: &str,
        _filter: Map<String, Value>,
        _limit: usize,
    ) -> AppResult<Vec<Value>> {
        Err(AppError::store_query_failed("connection reset by peer"))
    }

    async fn list_collections(&self) -> AppResult<Vec<String>> {
        Err(AppError::store_query_failed(
            "server selection timeout after 30000ms while listing collections",
        ))
    }
}

fn build_app(store: Option<Arc<dyn DocumentStore>>) -> Router {
    let store_config = StoreConfig {
        database_url: store.as_ref().map(|_| "memory://boosting".to_string()),
        database_name: None,
    };
    let state = AppState::new(PricingEngine::new(RateTable::default()), store, store_config);
    create_router(Arc::new(state))
}

fn app_with<S: DocumentStore + 'static>(store: Arc<S>) -> Router {
    let store: Arc<dyn DocumentStore> = store;
    build_app(Some(store))
}

fn app_without_store() -> Router {
    build_app(None)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ============================================
// Liveness
// ============================================

#[tokio::test]
async fn test_liveness_messages() {
    let (status, body) = send(app_without_store(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Boosting Service API running"}));

    let (status, body) = send(app_without_store(), get("/api/hello")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Hello from the backend API!"}));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, body) = send(app_without_store(), get("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("API_NOT_FOUND"));
}

// ============================================
// Price calculation
// ============================================

#[tokio::test]
async fn test_calculate_scenarios() {
    let cases = [
        (json!({"service": "leveling", "quantity": 10}), json!({"base_price": 35.0, "addons": 0.0, "total": 35.0})),
        (json!({"service": "spiral_abyss", "quantity": 2, "priority": true}), json!({"base_price": 30.0, "addons": 0.0, "total": 30.0})),
        (json!({"service": "farming", "quantity": 3, "streaming": true}), json!({"base_price": 24.0, "addons": 3.0, "total": 27.0})),
        (json!({"service": "boss_runs", "quantity": 0}), json!({"base_price": 6.0, "addons": 0.0, "total": 6.0})),
        (json!({"service": "Exploration"}), json!({"base_price": 5.0, "addons": 0.0, "total": 5.0})),
        (json!({"service": "leveling", "quantity": 7, "priority": true, "streaming": true}), json!({"base_price": 30.62, "addons": 3.0, "total": 33.62})),
    ];

    for (request, expected) in cases {
        let (status, body) = send(app_without_store(), post_json("/api/calculate", request.clone())).await;
        assert_eq!(status, StatusCode::OK, "{}", request);
        assert_eq!(body, expected, "{}", request);
    }
}

#[tokio::test]
async fn test_calculate_unknown_service_is_400() {
    let (status, body) = send(
        app_without_store(),
        post_json("/api/calculate", json!({"service": "unknown_x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], json!("Unknown service"));
    assert!(body.get("total").is_none());
}

#[tokio::test]
async fn test_calculate_missing_service_is_validation_error() {
    let (status, body) = send(
        app_without_store(),
        post_json("/api/calculate", json!({"quantity": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], json!("API_VALIDATION"));
}

// ============================================
// Orders
// ============================================

fn order_body() -> Value {
    json!({
        "game": "Genshin Impact",
        "service": "spiral_abyss",
        "quantity": 2,
        "priority": true,
        "region": "Asia",
        "contact_email": "traveler@teyvat.gg",
        "price_estimate": 30.0
    })
}

#[tokio::test]
async fn test_create_order_stores_document() {
    let store = Arc::new(MemoryStore::new("boosting"));
    let app = app_with(store.clone());

    let (status, body) = send(app, post_json("/api/orders", order_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("received"));
    let id = body["id"].as_str().unwrap().to_string();

    let docs = store.query("order", Map::new(), 10).await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["_id"], json!(id));
    assert_eq!(docs[0]["status"], json!("pending"));
    assert_eq!(docs[0]["price_estimate"], json!(30.0));
}

#[tokio::test]
async fn test_create_order_rejects_invalid_email() {
    let store = Arc::new(MemoryStore::new("boosting"));
    let mut order = order_body();
    order["contact_email"] = json!("traveler-at-teyvat");

    let (status, body) = send(app_with(store.clone()), post_json("/api/orders", order)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], json!("API_VALIDATION"));
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_create_order_rejects_missing_price_estimate() {
    let mut order = order_body();
    order.as_object_mut().unwrap().remove("price_estimate");

    let store = Arc::new(MemoryStore::new("boosting"));
    let (status, _) = send(app_with(store), post_json("/api/orders", order)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_order_store_failure_is_500() {
    let (status, body) = send(
        app_with(Arc::new(BrokenStore)),
        post_json("/api/orders", order_body()),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], json!("connection reset by peer"));
}

#[tokio::test]
async fn test_create_order_without_store_is_500() {
    let (status, body) = send(app_without_store(), post_json("/api/orders", order_body())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], json!("STORE_UNAVAILABLE"));
}

// ============================================
// Testimonials
// ============================================

#[tokio::test]
async fn test_testimonials_fallback_without_store() {
    let (status, body) = send(app_without_store(), get("/api/testimonials?limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body.as_array().unwrap().iter().map(|t| t["name"].clone()).collect();
    assert_eq!(names, vec![json!("Alex R."), json!("Mina K.")]);

    let (_, body) = send(app_without_store(), get("/api/testimonials")).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[2]["game"], json!("Multiple"));
    assert_eq!(body[2]["rating"], json!(5));
}

#[tokio::test]
async fn test_testimonials_fallback_on_query_failure() {
    let (status, body) = send(
        app_with(Arc::new(BrokenStore)),
        get("/api/testimonials?limit=1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], json!("Alex R."));
}

#[tokio::test]
async fn test_testimonials_from_store_strip_id() {
    let store = Arc::new(MemoryStore::new("boosting"));
    for name in ["Kai", "Lumi", "Rin"] {
        store
            .create(
                "testimonial",
                json!({"name": name, "rating": 4, "comment": "Great run", "highlights": ["fast"]}),
            )
            .await
            .unwrap();
    }

    let (status, body) = send(app_with(store), get("/api/testimonials?limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], json!("Kai"));
    assert_eq!(items[1]["name"], json!("Lumi"));
    assert_eq!(items[0]["highlights"], json!(["fast"]));
    assert!(items.iter().all(|t| t.get("_id").is_none()));
}

#[tokio::test]
async fn test_testimonials_empty_store_returns_empty_list() {
    let store = Arc::new(MemoryStore::new("boosting"));
    let (status, body) = send(app_with(store), get("/api/testimonials")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_testimonials_invalid_limit_is_json_bad_request() {
    for uri in ["/api/testimonials?limit=-1", "/api/testimonials?limit=abc"] {
        let (status, body) = send(app_without_store(), get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], json!("API_BAD_REQUEST"), "{}", uri);
        assert!(!body["detail"].as_str().unwrap().is_empty(), "{}", uri);
    }
}

// ============================================
// Schema & diagnostics
// ============================================

#[tokio::test]
async fn test_schema_endpoint() {
    let (status, body) = send(app_without_store(), get("/schema")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["order"]["properties"]["contact_email"].is_object());
    assert!(body["testimonial"]["properties"]["highlights"].is_object());
}

#[tokio::test]
async fn test_diagnostics_without_store() {
    let (status, body) = send(app_without_store(), get("/test")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend"], json!("✅ Running"));
    assert_eq!(body["database"], json!("⚠️  Available but not initialized"));
    assert_eq!(body["connection_status"], json!("Not Connected"));
    assert_eq!(body["database_url"], json!("❌ Not Set"));
    assert_eq!(body["collections"], json!([]));
}

#[tokio::test]
async fn test_diagnostics_with_store() {
    let store = Arc::new(MemoryStore::new("boosting"));
    store.create("order", json!({"game": "HSR"})).await.unwrap();

    let (status, body) = send(app_with(store), get("/test")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], json!("✅ Connected & Working"));
    assert_eq!(body["connection_status"], json!("Connected"));
    assert_eq!(body["database_url"], json!("✅ Set"));
    assert_eq!(body["database_name"], json!("❌ Not Set"));
    assert_eq!(body["collections"], json!(["order"]));
}

#[tokio::test]
async fn test_diagnostics_listing_failure_never_throws() {
    let (status, body) = send(app_with(Arc::new(BrokenStore)), get("/test")).await;
    assert_eq!(status, StatusCode::OK);
    let database = body["database"].as_str().unwrap();
    assert!(database.starts_with("⚠️  Connected but Error: "));
    let detail = database.trim_start_matches("⚠️  Connected but Error: ");
    assert_eq!(detail.chars().count(), 50);
}
