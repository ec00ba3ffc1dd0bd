// ==========================================
// Latam 看板系统 - 配置层
// ==========================================
// 职责: 表格源配置、加载与覆写
// 来源: 内置默认值 / JSON 配置文件 / 环境变量
// ==========================================

pub mod config_manager;
pub mod error;
pub mod sheet_config;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use sheet_config::{DashboardConfig, SheetSelector};
