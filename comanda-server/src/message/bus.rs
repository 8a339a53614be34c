//! 消息总线核心实现

use std::sync::Arc;

use dashmap::DashMap;
use shared::message::BusMessage;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use super::ConnectedClient;
use crate::utils::now_millis;

/// Capacity of the broadcast channels
const CHANNEL_CAPACITY: usize = 1024;

/// 消息总线 - 负责事件广播和客户端管理
///
/// # 职责
///
/// - 事件广播 (publish → 所有订阅者)
/// - 客户端上行消息 (send_to_server → MessageHandler)
/// - 客户端注册表 (connect/disconnect 跟踪)
/// - 生命周期 (shutdown token)
///
/// 显式的服务对象，由 ServerState 持有并注入需要发布事件的组件；
/// 不存在进程级单例。
#[derive(Debug)]
pub struct MessageBus {
    /// 服务器到客户端的广播通道
    server_tx: broadcast::Sender<BusMessage>,
    /// 客户端到服务器的消息通道
    client_tx: broadcast::Sender<BusMessage>,
    /// 关闭信号令牌
    shutdown_token: CancellationToken,
    /// 已连接的客户端 (Client ID -> ConnectedClient)
    clients: Arc<DashMap<String, ConnectedClient>>,
}

impl MessageBus {
    /// 创建默认容量的消息总线
    pub fn new() -> Self {
        Self::with_capacity(CHANNEL_CAPACITY)
    }

    /// 创建指定容量的消息总线
    pub fn with_capacity(capacity: usize) -> Self {
        let (server_tx, _) = broadcast::channel(capacity);
        let (client_tx, _) = broadcast::channel(capacity);
        Self {
            server_tx,
            client_tx,
            shutdown_token: CancellationToken::new(),
            clients: Arc::new(DashMap::new()),
        }
    }

    /// 发布事件 (服务器 -> 所有订阅者)
    ///
    /// 返回收到事件的订阅者数量。没有订阅者时返回 0 —— 不是错误：
    /// 事件本就是 best-effort 的失效信号。
    pub fn publish(&self, msg: BusMessage) -> usize {
        match self.server_tx.send(msg) {
            Ok(receivers) => receivers,
            Err(_) => {
                tracing::debug!("event dropped: no connected subscribers");
                0
            }
        }
    }

    /// 发送消息到服务器 (客户端 -> MessageHandler)
    pub fn send_to_server(&self, msg: BusMessage) {
        if self.client_tx.send(msg).is_err() {
            tracing::warn!("client message dropped: message handler not running");
        }
    }

    /// 订阅服务器广播 (每个 WebSocket 连接一个接收端)
    pub fn subscribe(&self) -> broadcast::Receiver<BusMessage> {
        self.server_tx.subscribe()
    }

    /// 订阅客户端消息 (MessageHandler 专用)
    pub fn subscribe_to_clients(&self) -> broadcast::Receiver<BusMessage> {
        self.client_tx.subscribe()
    }

    /// 获取广播发送端 (MessageHandler 转播用)
    pub fn sender(&self) -> &broadcast::Sender<BusMessage> {
        &self.server_tx
    }

    /// 注册新连接的客户端
    pub fn register_client(&self, id: &str) {
        self.clients.insert(
            id.to_string(),
            ConnectedClient {
                id: id.to_string(),
                connected_at: now_millis(),
            },
        );
        tracing::info!(client_id = %id, total = self.clients.len(), "Client connected");
    }

    /// 注销断开的客户端
    pub fn unregister_client(&self, id: &str) {
        self.clients.remove(id);
        tracing::info!(client_id = %id, total = self.clients.len(), "Client disconnected");
    }

    /// 已连接客户端列表
    pub fn connected_clients(&self) -> Vec<ConnectedClient> {
        self.clients.iter().map(|entry| entry.value().clone()).collect()
    }

    /// 当前订阅者数量
    pub fn subscriber_count(&self) -> usize {
        self.server_tx.receiver_count()
    }

    /// 获取关闭令牌 (用于监控关闭信号)
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// 优雅关闭消息总线
    pub fn shutdown(&self) {
        tracing::info!("Shutting down message bus");
        self.shutdown_token.cancel();
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}
