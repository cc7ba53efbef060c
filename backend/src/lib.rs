//! # Stockbook Backend
//!
//! Everything behind the web forms of the back office: the inventory master
//! table and its append-only ledger, the balance view, attendance and
//! payments.
//!
//! ## Architecture
//!
//! ```text
//! Web UI (static files, optional)
//!     ↓
//! IO Layer (REST API under /api, mappers)
//!     ↓
//! Domain Layer (validation, services, balance engine)
//!     ↓
//! Storage Layer (SQLite via sqlx)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::{info, warn};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::config::AppConfig;
use crate::domain::{
    AttendanceService, BalanceService, InventoryService, PaymentService, SignatureService,
};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    db: Arc<DbConnection>,
    pub inventory_service: InventoryService,
    pub balance_service: BalanceService,
    pub attendance_service: AttendanceService,
    pub payment_service: PaymentService,
    pub signature_service: SignatureService,
}

impl AppState {
    fn from_connection(db: Arc<DbConnection>, config: &AppConfig) -> Self {
        Self {
            inventory_service: InventoryService::new(db.clone()),
            balance_service: BalanceService::new(db.clone()),
            attendance_service: AttendanceService::new(db.clone(), config.attendance_mode),
            payment_service: PaymentService::new(db.clone()),
            signature_service: SignatureService::new(config.max_signature_bytes),
            db,
        }
    }

    /// Close the connection pool, flushing the WAL
    pub async fn shutdown(&self) {
        info!("Closing database");
        self.db.close().await;
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = Arc::new(DbConnection::init(config).await?);

    info!(
        "Setting up domain model (attendance mode: {:?})",
        config.attendance_mode
    );
    Ok(AppState::from_connection(db, config))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);
    let cors = match config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            warn!(
                "Ignoring invalid CORS origin '{}': {}; browser calls from other origins will be refused",
                config.cors_origin, e
            );
            cors
        }
    };

    let api_routes = Router::new()
        .nest("/inventory", io::rest::inventory_apis::router())
        .nest("/attendance", io::rest::attendance_apis::router())
        .nest("/payments", io::rest::payment_apis::router())
        .nest("/signature", io::rest::signature_apis::router(config.max_signature_bytes));

    let mut router = Router::new().nest("/api", api_routes);
    if let Some(dir) = &config.static_dir {
        info!("Serving web UI from {}", dir);
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.layer(cors).with_state(app_state)
}

#[cfg(test)]
pub(crate) async fn test_app_state() -> AppState {
    let db = Arc::new(DbConnection::init_test().await.unwrap());
    AppState::from_connection(db, &AppConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        router.oneshot(request).await.unwrap()
    }

    async fn read_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_inventory_flow_through_router() {
        let config = AppConfig::default();
        let router = create_router(test_app_state().await, &config);

        let item = json!({
            "item_id": "SKU1",
            "item_name": "Widget",
            "quantity": 10,
            "date_of_arrival": "2024-01-01",
            "supplier_details": "Acme"
        });
        let created = send(router.clone(), "POST", "/api/inventory/items", Some(item)).await;
        assert_eq!(created.status(), StatusCode::CREATED);

        let outbound = json!({ "quantity": 4, "transaction_date": "2024-01-02" });
        let moved = send(
            router.clone(),
            "POST",
            "/api/inventory/items/SKU1/outbound",
            Some(outbound),
        )
        .await;
        assert_eq!(moved.status(), StatusCode::CREATED);

        let balance = read_json(send(router.clone(), "GET", "/api/inventory/balances/SKU1", None).await).await;
        assert_eq!(balance["balance"], 6);

        let ledger = read_json(
            send(router, "GET", "/api/inventory/transactions?item_id=SKU1", None).await,
        )
        .await;
        let types: Vec<&str> = ledger["transactions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["transaction_type"].as_str().unwrap())
            .collect();
        assert_eq!(types, vec!["in", "out"]);
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected_by_router() {
        let router = create_router(test_app_state().await, &AppConfig::default());

        let response = send(
            router,
            "POST",
            "/api/payments",
            Some(json!({ "worker_id": "W1", "amount_paid": "lots" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let body = read_json(response).await;
        assert_eq!(body["kind"], "validation");
        assert!(body["error"].as_str().unwrap().contains("amount_paid"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_a_validation_error() {
        let router = create_router(test_app_state().await, &AppConfig::default());

        let request = Request::builder()
            .method("POST")
            .uri("/api/attendance")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("worker_id=W1"))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["kind"], "validation");
    }

    #[tokio::test]
    async fn test_attendance_routes_nest_at_collection_path() {
        let router = create_router(test_app_state().await, &AppConfig::default());

        let record = json!({
            "worker_id": "W1",
            "worker_name": "Ada",
            "date": "2024-03-01",
            "time_of_arrival": "08:00"
        });
        let created = send(router.clone(), "POST", "/api/attendance", Some(record)).await;
        assert_eq!(created.status(), StatusCode::CREATED);

        let listed = read_json(send(router.clone(), "GET", "/api/attendance", None).await).await;
        assert_eq!(listed["records"].as_array().unwrap().len(), 1);

        let fetched = send(router, "GET", "/api/attendance/W1", None).await;
        assert_eq!(fetched.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_payment_routes() {
        let router = create_router(test_app_state().await, &AppConfig::default());

        let payment = json!({
            "worker_id": "W1",
            "worker_name": "Ada",
            "payment_date": "2024-04-30",
            "amount_paid": 10.0,
            "payment_method": "bank transfer"
        });
        let created = send(router.clone(), "POST", "/api/payments", Some(payment)).await;
        assert_eq!(created.status(), StatusCode::CREATED);

        let listed = read_json(send(router.clone(), "GET", "/api/payments?worker_id=W1", None).await).await;
        assert_eq!(listed["payments"][0]["payment_method"], "Bank Transfer");

        let methods = read_json(send(router, "GET", "/api/payments/methods", None).await).await;
        assert_eq!(methods["methods"], json!(["Cash", "Bank Transfer", "Mobile Money"]));
    }

    #[tokio::test]
    async fn test_signature_body_limit() {
        let config = AppConfig {
            max_signature_bytes: 16,
            ..AppConfig::default()
        };
        let state = AppState::from_connection(
            Arc::new(DbConnection::init_test().await.unwrap()),
            &config,
        );
        let router = create_router(state, &config);

        let request = Request::builder()
            .method("POST")
            .uri("/api/signature")
            .body(Body::from(vec![0xFFu8; 64]))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_unknown_api_path_is_not_found() {
        let router = create_router(test_app_state().await, &AppConfig::default());
        let response = send(router, "GET", "/api/nothing-here", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
