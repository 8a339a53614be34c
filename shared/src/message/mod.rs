//! 消息总线消息类型定义
//!
//! 这些类型在 comanda-server 和各前端之间共享。事件通道是纯广播：
//! 每个已连接客户端收到每一条事件，没有按客户端的过滤或主题订阅。
//!
//! 投递语义: best-effort / at-most-once，无回放。事件只是"脏标记"——
//! 客户端收到后重新拉取全量状态，而不是增量应用事件载荷。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub mod payload;
pub use payload::*;

/// 事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// 新订单 (载荷: 完整订单)
    NewOrder,
    /// 订单状态变更
    OrderUpdated,
    /// 订单项状态变更
    ItemUpdated,
    /// 客户端请求重播一次状态广播 (client → server，非关键路径)
    StatusRequest,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::NewOrder => write!(f, "new_order"),
            EventType::OrderUpdated => write!(f, "order_updated"),
            EventType::ItemUpdated => write!(f, "item_updated"),
            EventType::StatusRequest => write!(f, "status_request"),
        }
    }
}

/// 消息总线消息体
///
/// WebSocket 线上格式即本结构的 JSON 序列化；`payload` 为事件相关的
/// JSON 数据 (见 [`payload`] 模块中的载荷类型)。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusMessage {
    pub request_id: Uuid,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub payload: serde_json::Value,
}

impl BusMessage {
    pub fn new(event_type: EventType, payload: serde_json::Value) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            event_type,
            payload,
        }
    }

    /// 创建新订单事件 (载荷: 完整订单，含订单项)
    pub fn new_order(order: &crate::models::Order) -> Self {
        Self::new(
            EventType::NewOrder,
            serde_json::to_value(order).expect("Failed to serialize order"),
        )
    }

    /// 创建订单状态变更事件
    pub fn order_updated(payload: &OrderUpdatedPayload) -> Self {
        Self::new(
            EventType::OrderUpdated,
            serde_json::to_value(payload).expect("Failed to serialize order_updated payload"),
        )
    }

    /// 创建订单项状态变更事件
    pub fn item_updated(payload: &ItemUpdatedPayload) -> Self {
        Self::new(
            EventType::ItemUpdated,
            serde_json::to_value(payload).expect("Failed to serialize item_updated payload"),
        )
    }

    /// 创建状态广播请求 (客户端发出)
    pub fn status_request(payload: &StatusRequestPayload) -> Self {
        Self::new(
            EventType::StatusRequest,
            serde_json::to_value(payload).expect("Failed to serialize status_request payload"),
        )
    }

    /// 解析载荷为指定类型
    pub fn parse_payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }

    /// 序列化为 WebSocket 文本帧
    pub fn to_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// 从 WebSocket 文本帧解析
    pub fn from_text(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
