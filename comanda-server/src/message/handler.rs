//! 客户端上行消息处理器
//!
//! 后台任务：订阅 client_tx，处理客户端发来的消息。目前唯一的上行
//! 消息类型是 `status_request` —— 客户端请求服务器重播一次状态广播。
//! 该路径与 HTTP 状态更新重复，只做转播，不触碰任何存储。

use shared::message::{BusMessage, EventType, OrderUpdatedPayload, StatusRequestPayload};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::utils::now_millis;

pub struct MessageHandler {
    receiver: broadcast::Receiver<BusMessage>,
    broadcast_tx: broadcast::Sender<BusMessage>,
    shutdown: CancellationToken,
}

impl MessageHandler {
    pub fn new(
        receiver: broadcast::Receiver<BusMessage>,
        broadcast_tx: broadcast::Sender<BusMessage>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            receiver,
            broadcast_tx,
            shutdown,
        }
    }

    /// 消息处理循环，直到关闭信号
    pub async fn run(mut self) {
        tracing::debug!("Message handler started");
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::debug!("Message handler shutting down");
                    break;
                }
                msg = self.receiver.recv() => match msg {
                    Ok(msg) => self.handle(msg),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Message handler lagged, client messages dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
    }

    fn handle(&self, msg: BusMessage) {
        match msg.event_type {
            EventType::StatusRequest => self.handle_status_request(&msg),
            // server→client events looping back on client_tx would be a bug
            other => {
                tracing::debug!(event_type = %other, "Ignoring unexpected client message");
            }
        }
    }

    /// 原样转播客户端请求的状态广播
    fn handle_status_request(&self, msg: &BusMessage) {
        let payload: StatusRequestPayload = match msg.parse_payload() {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed status_request payload");
                return;
            }
        };

        let rebroadcast = BusMessage::order_updated(&OrderUpdatedPayload {
            order_id: payload.order_id,
            status: payload.status,
            timestamp: now_millis(),
        });
        if self.broadcast_tx.send(rebroadcast).is_err() {
            tracing::debug!("status_request rebroadcast dropped: no subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageBus;
    use shared::models::OrderStatus;

    #[tokio::test]
    async fn status_request_is_rebroadcast_as_order_updated() {
        let bus = MessageBus::new();
        let handler = MessageHandler::new(
            bus.subscribe_to_clients(),
            bus.sender().clone(),
            bus.shutdown_token().clone(),
        );
        tokio::spawn(handler.run());

        let mut rx = bus.subscribe();
        bus.send_to_server(BusMessage::status_request(&shared::message::StatusRequestPayload {
            order_id: "order-7".to_string(),
            status: OrderStatus::Ready,
        }));

        let msg = rx.recv().await.unwrap();
        assert_eq!(msg.event_type, EventType::OrderUpdated);
        let payload: OrderUpdatedPayload = msg.parse_payload().unwrap();
        assert_eq!(payload.order_id, "order-7");
        assert_eq!(payload.status, OrderStatus::Ready);
    }
}
