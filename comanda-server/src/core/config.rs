//! 服务器配置
//!
//! # 环境变量
//!
//! 所有配置项都可以通过环境变量覆盖：
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | WORK_DIR | /var/lib/comanda | 工作目录 |
//! | HTTP_PORT | 3000 | HTTP 服务端口 |
//! | API_TOKEN | (未设置) | 静态 Bearer 令牌；未设置时不鉴权 |
//! | TAX_RATE_PERCENT | 8 | 税率 (百分比) |
//! | CUSTOMER_MENU_URL | http://localhost:3003 | 顾客点餐页地址 (桌台二维码用) |
//! | ENVIRONMENT | development | 运行环境 |
//!
//! # 示例
//!
//! ```ignore
//! WORK_DIR=/data/comanda HTTP_PORT=8080 cargo run
//! ```

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 静态 API 令牌；`None` 表示不鉴权 (开发模式)
    pub api_token: Option<String>,
    /// 税率 (百分比，如 8 = 8%)
    pub tax_rate_percent: u32,
    /// 顾客点餐页地址，用于生成桌台二维码链接
    pub customer_menu_url: String,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/comanda".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            api_token: std::env::var("API_TOKEN").ok().filter(|t| !t.is_empty()),
            tax_rate_percent: std::env::var("TAX_RATE_PERCENT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8),
            customer_menu_url: std::env::var("CUSTOMER_MENU_URL")
                .unwrap_or_else(|_| "http://localhost:3003".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据库目录 (work_dir/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 日志目录 (work_dir/logs)
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
