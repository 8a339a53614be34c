//! Menu API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_token;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new().nest("/api/menu", routes(state))
}

fn routes(state: &ServerState) -> Router<ServerState> {
    // 菜单读取对顾客开放
    let read_routes = Router::new()
        .route("/items", get(handler::list_items))
        .route("/items/{id}", get(handler::get_item))
        .route("/categories", get(handler::list_categories));

    let manage_routes = Router::new()
        .route("/items", post(handler::create_item))
        .route(
            "/items/{id}",
            put(handler::update_item).delete(handler::delete_item),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_token));

    read_routes.merge(manage_routes)
}
