//! 健康检查路由
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0",
//!   "uptime_seconds": 42,
//!   "checks": { "storage": {"status": "ok"}, "message_bus": {"status": "ok"} }
//! }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::time::SystemTime;

use crate::core::ServerState;

/// 健康检查路由 - 公共路由 (无需认证)
pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    /// 状态 (healthy | degraded)
    status: &'static str,
    /// 版本号
    version: &'static str,
    /// 运行时间 (秒)
    uptime_seconds: u64,
    /// 各组件检查结果
    checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    storage: CheckResult,
    message_bus: CheckResult,
}

/// 单项检查结果
#[derive(Serialize)]
pub struct CheckResult {
    /// 状态 (ok | error)
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    /// 当前订阅者数 (仅 message_bus)
    #[serde(skip_serializing_if = "Option::is_none")]
    subscribers: Option<usize>,
}

impl CheckResult {
    fn ok() -> Self {
        Self {
            status: "ok",
            message: None,
            subscribers: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: Some(message.into()),
            subscribers: None,
        }
    }
}

// 服务器启动时间 (懒加载静态变量)
static START_TIME: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

fn get_uptime_seconds() -> u64 {
    let start = START_TIME.get_or_init(SystemTime::now);
    SystemTime::now()
        .duration_since(*start)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// 健康检查
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    // 存储检查: 一次只读计数查询
    let storage_check = match state.storage.order_count() {
        Ok(_) => CheckResult::ok(),
        Err(e) => CheckResult::error(format!("Storage error: {e}")),
    };

    // 消息总线检查: 只要服务器在运行，总线总是就绪的
    let mut bus_check = CheckResult::ok();
    bus_check.subscribers = Some(state.bus().subscriber_count());

    let all_ok = storage_check.status == "ok";

    Json(HealthResponse {
        status: if all_ok { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: get_uptime_seconds(),
        checks: HealthChecks {
            storage: storage_check,
            message_bus: bus_check,
        },
    })
}
