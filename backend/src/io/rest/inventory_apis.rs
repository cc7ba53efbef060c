//! # REST API for Inventory
//!
//! The "Add Item" form, outbound movements, the ledger and the balance view.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::info;
use serde::Deserialize;

use crate::domain::commands::inventory::TransactionListQuery;
use crate::io::rest::{error_response, FormJson};
use crate::io::rest::mappers::inventory_mapper::InventoryMapper;
use crate::AppState;
use shared::{
    AddItemRequest, AddItemResponse, BalanceListResponse, InventoryListResponse,
    RecordOutboundRequest, RecordOutboundResponse, TransactionListResponse,
};

// Query parameters for the ledger API
#[derive(Debug, Deserialize)]
pub struct TransactionListParams {
    pub item_id: Option<String>,
}

/// Create a router for inventory related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(add_item))
        .route("/items/:item_id", get(get_item))
        .route("/items/:item_id/outbound", post(record_outbound))
        .route("/transactions", get(list_transactions))
        .route("/balances", get(list_balances))
        .route("/balances/:item_id", get(get_balance))
}

/// Add an item (upsert master row + "in" ledger row)
pub async fn add_item(
    State(state): State<AppState>,
    FormJson(request): FormJson<AddItemRequest>,
) -> impl IntoResponse {
    info!("POST /api/inventory/items - request: {:?}", request);

    let command = InventoryMapper::to_add_item_command(request);
    match state.inventory_service.add_item(command).await {
        Ok(result) => {
            let response = AddItemResponse {
                item: InventoryMapper::item_to_dto(result.item),
                transaction: InventoryMapper::transaction_to_dto(result.transaction),
                success_message: result.success_message,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response("add item", e),
    }
}

/// List inventory master rows
pub async fn list_items(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/inventory/items");

    match state.inventory_service.list_items().await {
        Ok(items) => {
            let response = InventoryListResponse {
                items: items.into_iter().map(InventoryMapper::item_to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("list inventory items", e),
    }
}

/// Get one master row
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/inventory/items/{}", item_id);

    match state.inventory_service.get_item(&item_id).await {
        Ok(item) => (StatusCode::OK, Json(InventoryMapper::item_to_dto(item))).into_response(),
        Err(e) => error_response("get inventory item", e),
    }
}

/// Take stock out of an item ("out" ledger row)
pub async fn record_outbound(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    FormJson(request): FormJson<RecordOutboundRequest>,
) -> impl IntoResponse {
    info!("POST /api/inventory/items/{}/outbound - request: {:?}", item_id, request);

    let command = InventoryMapper::to_outbound_command(item_id, request);
    match state.inventory_service.record_outbound(command).await {
        Ok(result) => {
            let response = RecordOutboundResponse {
                transaction: InventoryMapper::transaction_to_dto(result.transaction),
                balance: result.balance,
                success_message: result.success_message,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response("record outbound movement", e),
    }
}

/// Read the ledger, optionally for a single item
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(params): Query<TransactionListParams>,
) -> impl IntoResponse {
    info!("GET /api/inventory/transactions - query: {:?}", params);

    let query = TransactionListQuery {
        item_id: params.item_id,
    };
    match state.inventory_service.list_transactions(query).await {
        Ok(transactions) => {
            let response = TransactionListResponse {
                transactions: transactions
                    .into_iter()
                    .map(InventoryMapper::transaction_to_dto)
                    .collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("list inventory transactions", e),
    }
}

/// Balance view over all items
pub async fn list_balances(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/inventory/balances");

    match state.balance_service.current_balances().await {
        Ok(balances) => {
            let response = BalanceListResponse {
                balances: balances.into_iter().map(InventoryMapper::balance_to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("compute balances", e),
    }
}

/// Balance of a single item
pub async fn get_balance(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/inventory/balances/{}", item_id);

    match state.balance_service.balance_for(&item_id).await {
        Ok(balance) => (StatusCode::OK, Json(InventoryMapper::balance_to_dto(balance))).into_response(),
        Err(e) => error_response("compute balance", e),
    }
}
