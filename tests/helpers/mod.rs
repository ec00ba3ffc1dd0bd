// ==========================================
// 集成测试辅助模块
// ==========================================

#![allow(dead_code)]

pub mod mock_sheet_source;
pub mod payload_builder;

pub use mock_sheet_source::{MockReply, MockSheetSource};
pub use payload_builder::{gp_row, gviz_payload, order_row, PayloadBuilder};

use latam_dashboard::config::DashboardConfig;

/// 测试用配置（默认表格名与区间）
pub fn test_config() -> DashboardConfig {
    DashboardConfig {
        sheet_id: "test-sheet".to_string(),
        ..DashboardConfig::default()
    }
}
