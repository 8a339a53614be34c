//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`orders`] - 订单接口 (创建、查询、状态/支付变更)
//! - [`menu`] - 菜单管理接口
//! - [`tables`] - 桌台管理接口
//! - [`events`] - WebSocket 事件通道

pub mod events;
pub mod health;
pub mod menu;
pub mod orders;
pub mod tables;

use axum::Router;

use crate::core::ServerState;

/// 组装全部 API 路由
pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(events::router())
        .merge(orders::router(state))
        .merge(menu::router(state))
        .merge(tables::router(state))
}
