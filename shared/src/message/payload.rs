//! 事件载荷类型

use crate::models::{ItemStatus, OrderStatus};
use serde::{Deserialize, Serialize};

/// `order_updated` 事件载荷
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdatedPayload {
    pub order_id: String,
    pub status: OrderStatus,
    /// Unix epoch milliseconds
    pub timestamp: i64,
}

/// `item_updated` 事件载荷
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdatedPayload {
    pub order_id: String,
    pub item_id: String,
    pub status: ItemStatus,
    /// Unix epoch milliseconds
    pub timestamp: i64,
}

/// `status_request` 载荷 (client → server)
///
/// 与 HTTP 状态更新接口重复，仅用于客户端手动触发一次广播；
/// 服务端只是原样转播，不修改任何状态。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequestPayload {
    pub order_id: String,
    pub status: OrderStatus,
}
