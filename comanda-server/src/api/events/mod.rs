//! WebSocket 事件通道
//!
//! 每个客户端一条持久连接；服务器把每一条总线事件作为 JSON 文本帧
//! 推送给每个连接 (纯广播，无主题)。断线的客户端收不到错过的事件 ——
//! 客户端应在连接后全量拉取，再把事件当作"有变更，去重查"的信号。

use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
    routing::get,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::core::ServerState;
use shared::message::BusMessage;

pub fn router() -> Router<ServerState> {
    Router::new().route("/ws", get(ws_handler))
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<ServerState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: ServerState) {
    let client_id = Uuid::new_v4().to_string();
    let bus = state.bus().clone();
    bus.register_client(&client_id);

    let mut rx = bus.subscribe();
    let shutdown = bus.shutdown_token().clone();
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                let _ = sender.send(Message::Close(None)).await;
                break;
            }
            event = rx.recv() => match event {
                Ok(msg) => {
                    let text = match msg.to_text() {
                        Ok(t) => t,
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to serialize bus event");
                            continue;
                        }
                    };
                    if sender.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // 事件只是失效信号，客户端会全量重查；跳过即可
                    tracing::warn!(client_id = %client_id, skipped, "Slow event consumer, events skipped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            inbound = receiver.next() => match inbound {
                Some(Ok(Message::Text(text))) => handle_client_message(&bus, &client_id, text.as_str()),
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {} // ping/pong handled by axum
                Some(Err(e)) => {
                    tracing::debug!(client_id = %client_id, error = %e, "WebSocket read error");
                    break;
                }
            },
        }
    }

    bus.unregister_client(&client_id);
}

/// 客户端上行消息：解析后投递给 MessageHandler
fn handle_client_message(bus: &crate::message::MessageBus, client_id: &str, text: &str) {
    match BusMessage::from_text(text) {
        Ok(msg) => bus.send_to_server(msg),
        Err(e) => {
            tracing::warn!(client_id = %client_id, error = %e, "Ignoring malformed client message");
        }
    }
}
