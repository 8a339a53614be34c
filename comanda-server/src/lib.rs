//! Comanda Server - 餐厅订单平台后端
//!
//! # 架构概述
//!
//! 多前端 (顾客点餐、厨房显示、收银、管理后台) 共用的单一后端：
//!
//! - **订单引擎** (`orders`): 订单账本 + 状态机 + 金额不变量
//! - **事件广播** (`message`): WebSocket 纯广播，"脏标记"语义
//! - **存储** (`db`): 嵌入式 redb，事务内原子分配订单号
//! - **HTTP API** (`api`): RESTful 接口 + WebSocket 事件通道
//!
//! # 模块结构
//!
//! ```text
//! comanda-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # Bearer token 校验
//! ├── api/           # HTTP 路由和处理器
//! ├── orders/        # 订单生命周期引擎
//! ├── message/       # 消息总线
//! ├── services/      # 总线服务封装
//! ├── db/            # 存储层与仓储
//! └── utils/         # 错误、日志等工具
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod message;
pub mod orders;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use db::Storage;
pub use message::{BusMessage, EventType, MessageBus};
pub use orders::{OrderFilter, OrderLedger};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   ______                                 __
  / ____/___  ____ ___  ____ _____  ____/ /___ _
 / /   / __ \/ __ `__ \/ __ `/ __ \/ __  / __ `/
/ /___/ /_/ / / / / / / /_/ / / / / /_/ / /_/ /
\____/\____/_/ /_/ /_/\__,_/_/ /_/\__,_/\__,_/
    "#
    );
}
