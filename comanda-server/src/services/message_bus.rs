use std::sync::Arc;

use crate::message::{MessageBus, MessageHandler};

/// 消息总线服务
///
/// 封装 MessageBus，提供：
/// - 后台消息处理器
/// - 生命周期管理 (随服务启动、随服务关闭)
#[derive(Clone, Debug)]
pub struct MessageBusService {
    /// 消息总线实例
    bus: Arc<MessageBus>,
}

impl MessageBusService {
    /// 创建消息总线服务
    pub fn new() -> Self {
        Self {
            bus: Arc::new(MessageBus::new()),
        }
    }

    /// 获取消息总线引用
    pub fn bus(&self) -> &Arc<MessageBus> {
        &self.bus
    }

    /// 启动后台消息处理器
    ///
    /// MessageHandler 订阅 client_tx，处理来自 WebSocket 客户端的上行消息
    pub fn start_background_tasks(&self) {
        let handler = MessageHandler::new(
            self.bus.subscribe_to_clients(),
            self.bus.sender().clone(),
            self.bus.shutdown_token().clone(),
        );

        tokio::spawn(async move {
            handler.run().await;
        });

        tracing::debug!("Message handler started in background");
    }

    /// 关闭消息总线
    pub fn shutdown(&self) {
        self.bus.shutdown();
    }
}

impl Default for MessageBusService {
    fn default() -> Self {
        Self::new()
    }
}
