//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::DiningTableRepository;
use crate::utils::{AppError, AppResult};
use shared::models::{
    DiningTable, DiningTableCreate, DiningTableUpdate, TableQrInfo, TableStatus,
};

/// GET /api/tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let repo = DiningTableRepository::new(state.storage.clone());
    Ok(Json(repo.find_all()?))
}

/// GET /api/tables/{id} - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(state.storage.clone());
    let table = repo
        .find_by_id(&id)?
        .ok_or_else(|| AppError::not_found(format!("Table {id} not found")))?;
    Ok(Json(table))
}

/// GET /api/tables/{id}/qr - 桌台二维码载荷
///
/// 只计算顾客点餐页 URL；二维码图片由客户端渲染。
pub async fn qr_info(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TableQrInfo>> {
    let repo = DiningTableRepository::new(state.storage.clone());
    let table = repo
        .find_by_id(&id)?
        .ok_or_else(|| AppError::not_found(format!("Table {id} not found")))?;

    let qr_url = format!(
        "{}?table={}&tableNumber={}",
        state.config.customer_menu_url, table.id, table.table_number
    );
    Ok(Json(TableQrInfo {
        table_id: table.id,
        table_number: table.table_number,
        qr_data: qr_url.clone(),
        qr_url,
    }))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<(StatusCode, Json<DiningTable>)> {
    let repo = DiningTableRepository::new(state.storage.clone());
    let table = repo.create(payload)?;
    Ok((StatusCode::CREATED, Json(table)))
}

/// PUT /api/tables/{id} - 更新桌台
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(state.storage.clone());
    Ok(Json(repo.update(&id, payload)?))
}

/// Table status update request
#[derive(Debug, Deserialize)]
pub struct TableStatusRequest {
    pub status: TableStatus,
}

/// PATCH /api/tables/{id}/status - 桌台状态变更
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TableStatusRequest>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(state.storage.clone());
    Ok(Json(repo.update_status(&id, payload.status)?))
}

/// DELETE /api/tables/{id} - 删除桌台
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = DiningTableRepository::new(state.storage.clone());
    Ok(Json(repo.delete(&id)?))
}
