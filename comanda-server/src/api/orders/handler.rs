//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::orders::OrderFilter;
use crate::utils::{AppError, AppResult};
use shared::models::{ItemStatus, Order, OrderCreate, OrderItem, OrderStatus, PaymentUpdate};

/// POST /api/orders - 创建订单
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = state.ledger().create_order(payload)?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders - 订单列表，可按状态/类型/顾客过滤
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<OrderFilter>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.ledger().find_all(&filter)?;
    Ok(Json(orders))
}

/// GET /api/orders/kitchen - 厨房队列 (最早优先)
pub async fn kitchen(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = state.ledger().kitchen_orders()?;
    Ok(Json(orders))
}

/// Query params for my-orders
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyOrdersQuery {
    pub customer_id: String,
}

/// GET /api/orders/my-orders - 顾客自己的订单 (最新优先)
pub async fn my_orders(
    State(state): State<ServerState>,
    Query(query): Query<MyOrdersQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.ledger().orders_for_customer(&query.customer_id)?;
    Ok(Json(orders))
}

/// GET /api/orders/{id} - 单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state
        .ledger()
        .find_one(&id)?
        .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;
    Ok(Json(order))
}

/// Status update request
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
}

/// PATCH /api/orders/{id}/status - 订单状态变更
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdateRequest>,
) -> AppResult<Json<Order>> {
    let order = state.ledger().update_status(&id, payload.status)?;
    Ok(Json(order))
}

/// Item status update request
#[derive(Debug, Deserialize)]
pub struct ItemStatusUpdateRequest {
    pub status: ItemStatus,
}

/// PATCH /api/orders/{id}/items/{itemId} - 订单项状态变更
pub async fn update_item_status(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
    Json(payload): Json<ItemStatusUpdateRequest>,
) -> AppResult<Json<OrderItem>> {
    let item = state.ledger().update_item_status(&id, &item_id, payload.status)?;
    Ok(Json(item))
}

/// PATCH /api/orders/{id}/payment - 支付状态变更
pub async fn update_payment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PaymentUpdate>,
) -> AppResult<Json<Order>> {
    let order = state.ledger().update_payment(&id, payload)?;
    Ok(Json(order))
}
