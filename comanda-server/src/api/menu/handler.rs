//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::MenuItemRepository;
use crate::utils::{AppError, AppResult};
use shared::models::{MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate};

/// Query params for listing menu items
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub category: Option<String>,
    /// Only items currently orderable
    #[serde(default)]
    pub available: bool,
}

/// GET /api/menu/items - 菜单列表
pub async fn list_items(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.storage.clone());
    let items = repo.find_all(query.category.as_deref(), query.available)?;
    Ok(Json(items))
}

/// GET /api/menu/items/{id} - 单个菜单项
pub async fn get_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.storage.clone());
    let item = repo
        .find_by_id(&id)?
        .ok_or_else(|| AppError::not_found(format!("Menu item {id} not found")))?;
    Ok(Json(item))
}

/// GET /api/menu/categories - 分类列表
pub async fn list_categories(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<MenuCategory>>> {
    let repo = MenuItemRepository::new(state.storage.clone());
    Ok(Json(repo.categories()?))
}

/// POST /api/menu/items - 创建菜单项
pub async fn create_item(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    let repo = MenuItemRepository::new(state.storage.clone());
    let item = repo.create(payload)?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/menu/items/{id} - 更新菜单项
pub async fn update_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.storage.clone());
    Ok(Json(repo.update(&id, payload)?))
}

/// DELETE /api/menu/items/{id} - 删除菜单项
pub async fn delete_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = MenuItemRepository::new(state.storage.clone());
    Ok(Json(repo.delete(&id)?))
}
