//! 服务器状态

use std::sync::Arc;

use crate::core::Config;
use crate::db::Storage;
use crate::message::MessageBus;
use crate::orders::OrderLedger;
use crate::services::MessageBusService;
use crate::utils::AppResult;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | storage | Storage | 嵌入式数据库 (redb) |
/// | ledger | Arc<OrderLedger> | 订单生命周期引擎 |
/// | message_bus | MessageBusService | 事件广播服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式存储
    pub storage: Storage,
    /// 订单生命周期引擎
    pub ledger: Arc<OrderLedger>,
    /// 事件广播服务
    pub message_bus: MessageBusService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 存储 (work_dir/database/comanda.db)
    /// 3. 消息总线
    /// 4. 订单引擎 (注入存储与总线)
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("comanda.db");
        let storage = Storage::open(&db_path)?;
        tracing::info!(path = %db_path.display(), "Storage opened");

        Ok(Self::assemble(config.clone(), storage))
    }

    /// 基于内存存储初始化 (测试与演示)
    pub fn initialize_in_memory(config: &Config) -> AppResult<Self> {
        let storage = Storage::open_in_memory()?;
        Ok(Self::assemble(config.clone(), storage))
    }

    fn assemble(config: Config, storage: Storage) -> Self {
        let message_bus = MessageBusService::new();
        let ledger = Arc::new(OrderLedger::new(
            storage.clone(),
            message_bus.bus().clone(),
            config.tax_rate_percent,
        ));
        Self {
            config,
            storage,
            ledger,
            message_bus,
        }
    }

    /// 启动后台任务
    ///
    /// 必须在 `Server::run()` 之前调用
    pub fn start_background_tasks(&self) {
        self.message_bus.start_background_tasks();
    }

    /// 获取订单引擎
    pub fn ledger(&self) -> &Arc<OrderLedger> {
        &self.ledger
    }

    /// 获取消息总线
    pub fn bus(&self) -> &Arc<MessageBus> {
        self.message_bus.bus()
    }
}
