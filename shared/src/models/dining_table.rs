//! Dining Table Model

use serde::{Deserialize, Serialize};

/// 桌台状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Cleaning,
    Maintenance,
}

/// Dining table entity (桌台)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: String,
    pub table_number: i32,
    pub capacity: i32,
    pub status: TableStatus,
    pub floor_section: Option<String>,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTableCreate {
    pub table_number: i32,
    pub capacity: i32,
    pub status: Option<TableStatus>,
    pub floor_section: Option<String>,
}

/// Update dining table payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DiningTableUpdate {
    pub table_number: Option<i32>,
    pub capacity: Option<i32>,
    pub status: Option<TableStatus>,
    pub floor_section: Option<String>,
}

/// QR payload for a table — the URL the customer menu opens with.
///
/// Image rendering is delegated to the client; the server only computes the
/// encoded URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableQrInfo {
    pub table_id: String,
    pub table_number: i32,
    pub qr_url: String,
    pub qr_data: String,
}
