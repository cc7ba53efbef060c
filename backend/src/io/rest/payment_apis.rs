//! # REST API for Payments

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use serde::Deserialize;

use crate::domain::commands::payment::PaymentListQuery;
use crate::io::rest::{error_response, FormJson};
use crate::io::rest::mappers::payment_mapper::PaymentMapper;
use crate::AppState;
use shared::{PaymentListResponse, PaymentMethodsResponse, RecordPaymentRequest, RecordPaymentResponse};

// Query parameters for payment listing API
#[derive(Debug, Deserialize)]
pub struct PaymentListParams {
    pub worker_id: Option<String>,
}

/// Create a router for payment related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(record_payment))
        .route("/methods", get(list_payment_methods))
}

/// Record (append) a payment
pub async fn record_payment(
    State(state): State<AppState>,
    FormJson(request): FormJson<RecordPaymentRequest>,
) -> impl IntoResponse {
    info!("POST /api/payments - request: {:?}", request);

    let command = PaymentMapper::to_command(request);
    match state.payment_service.record_payment(command).await {
        Ok(result) => {
            let response = RecordPaymentResponse {
                payment: PaymentMapper::to_dto(result.payment),
                success_message: result.success_message,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response("record payment", e),
    }
}

/// List payments, optionally for one worker
pub async fn list_payments(
    State(state): State<AppState>,
    Query(params): Query<PaymentListParams>,
) -> impl IntoResponse {
    info!("GET /api/payments - query: {:?}", params);

    let query = PaymentListQuery {
        worker_id: params.worker_id,
    };
    match state.payment_service.list_payments(query).await {
        Ok(payments) => {
            let response = PaymentListResponse {
                payments: payments.into_iter().map(PaymentMapper::to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("list payments", e),
    }
}

/// The payment methods offered by the form
pub async fn list_payment_methods(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/payments/methods");

    let response = PaymentMethodsResponse {
        methods: state
            .payment_service
            .payment_methods()
            .iter()
            .copied()
            .map(PaymentMapper::method_to_dto)
            .collect(),
    };
    (StatusCode::OK, Json(response))
}
