//! 消息总线
//!
//! # 架构
//!
//! ```text
//! Mutation (OrderLedger) ──▶ publish() ──▶ server_tx ──▶ 所有 WebSocket 客户端
//!
//! WebSocket 客户端 ──▶ send_to_server() ──▶ client_tx ──▶ MessageHandler
//!                                                            │
//!                                                            ▼ (status_request 转播)
//!                                                        server_tx
//! ```
//!
//! 广播语义: 每个已连接客户端收到每一条事件，没有主题订阅或按客户端过滤。
//! 投递是 best-effort：存储写入成功而通知失败的变更仍然是成功的变更，
//! 客户端靠重新拉取收敛。

pub mod bus;
pub mod handler;

pub use bus::MessageBus;
pub use handler::MessageHandler;

pub use shared::message::{BusMessage, EventType};

/// 已连接客户端信息
#[derive(Debug, Clone)]
pub struct ConnectedClient {
    pub id: String,
    /// Unix epoch milliseconds
    pub connected_at: i64,
}
