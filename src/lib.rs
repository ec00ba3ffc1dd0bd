// ==========================================
// Latam 看板系统 - 核心库
// ==========================================
// 职责: 远程表格拉取 → 封包解析 → 归一化 → 过滤聚合 → 看板展示形状
// 技术栈: tokio + reqwest + serde
// 系统定位: 只读看板数据核心（不含渲染）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与字段选择器
pub mod domain;

// 拉取层 - 远程表格
pub mod importer;

// 引擎层 - 过滤与聚合
pub mod engine;

// 配置层 - 表格地址与刷新间隔
pub mod config;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// API 层 - 看板展示形状
pub mod api;

// 应用层 - 视图状态与定时刷新
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    GpNumericField, GpTextField, OrderNumericField, OrderTextField, RecordKind, NA_SENTINEL,
};

// 领域实体
pub use domain::{GpRecord, Order, TabularRecord};

// 拉取
pub use importer::{FetchError, FetchResult, HttpSheetSource, SheetImporter, SheetSource};

// 引擎
pub use engine::{GpFilter, OrderFilter, PivotTable, RecordFilter};

// API
pub use api::{ApiError, ApiResult, GpDashboardApi, ReserveDashboardApi};

// 应用
pub use app::{spawn_periodic_refresh, AppState, DashboardController, RefreshHandle};

// 配置
pub use config::{ConfigManager, DashboardConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Latam 预留单 / 国家毛利看板";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
