// ==========================================
// Latam 看板系统 - API 层
// ==========================================
// 职责: 基于记录快照计算看板展示形状，供命令行/前端调用
// ==========================================

pub mod error;
pub mod gp_dashboard_api;
pub mod pagination;
pub mod reserve_dashboard_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult, ViewError};
pub use gp_dashboard_api::{CountryGp, GpDashboardApi, GpDashboardView, GpFilterChoices, GpKpis};
pub use pagination::{paginate, Page, DEFAULT_ROWS_PER_PAGE};
pub use reserve_dashboard_api::{
    OrderFilterChoices, PartyBreakdown, ReserveDashboardApi, ReserveDashboardView, ReserveKpis,
    ValueSlice,
};
