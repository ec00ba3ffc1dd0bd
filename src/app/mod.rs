// ==========================================
// Latam 看板系统 - 应用层
// ==========================================
// 职责: 视图状态、手动/定时刷新
// ==========================================

pub mod refresh_task;
pub mod state;

// 重导出
pub use refresh_task::{spawn_periodic_refresh, Refreshable, RefreshHandle};
pub use state::{AppState, DashboardController, Snapshot, ViewState, NO_DATA_NOTICE};
