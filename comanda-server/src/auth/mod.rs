//! Bearer token 校验
//!
//! 鉴权仅限 "令牌是否有效" —— 一个来自配置的静态令牌。角色、权限等
//! 策略层面的控制不在本服务范围内。`API_TOKEN` 未设置时不做校验
//! (开发模式，启动时会打印警告)。

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// 校验 `Authorization: Bearer <token>` 请求头
pub async fn require_token(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> AppResult<Response> {
    let Some(expected) = state.config.api_token.as_deref() else {
        return Ok(next.run(req).await);
    };

    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match bearer {
        Some(token) if token == expected => Ok(next.run(req).await),
        Some(_) => Err(AppError::InvalidToken),
        None => Err(AppError::Unauthorized),
    }
}
