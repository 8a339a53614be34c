//! Order API 模块
//!
//! | 路径 | 方法 | 认证 | 说明 |
//! |------|------|------|------|
//! | /api/orders | POST | 无 | 创建订单 (顾客下单) |
//! | /api/orders | GET | Bearer | 订单列表 (可过滤) |
//! | /api/orders/kitchen | GET | Bearer | 厨房队列 (FIFO) |
//! | /api/orders/my-orders | GET | Bearer | 顾客自己的订单 |
//! | /api/orders/{id} | GET | 无 | 单个订单 (顾客跟踪) |
//! | /api/orders/{id}/status | PATCH | Bearer | 状态变更 |
//! | /api/orders/{id}/items/{itemId} | PATCH | Bearer | 订单项状态变更 |
//! | /api/orders/{id}/payment | PATCH | Bearer | 支付状态变更 |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::require_token;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/orders", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    // 顾客侧：下单与单个订单跟踪不要求令牌
    let open_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", get(handler::get_by_id));

    let staff_routes = Router::new()
        .route("/", get(handler::list))
        .route("/kitchen", get(handler::kitchen))
        .route("/my-orders", get(handler::my_orders))
        .route("/{id}/status", patch(handler::update_status))
        .route("/{id}/items/{item_id}", patch(handler::update_item_status))
        .route("/{id}/payment", patch(handler::update_payment))
        .layer(middleware::from_fn_with_state(state.clone(), require_token));

    open_routes.merge(staff_routes)
}
