//! Dining Table API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use crate::auth::require_token;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/tables", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    // 读取与二维码载荷对扫码顾客开放
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/qr", get(handler::qr_info));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/status", patch(handler::update_status))
        .layer(middleware::from_fn_with_state(state.clone(), require_token));

    read_routes.merge(manage_routes)
}
