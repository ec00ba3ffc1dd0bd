// ==========================================
// Latam 看板系统 - 领域模型层
// ==========================================
// 职责: 定义归一化后的记录实体、字段选择器、哨兵值
// 红线: 不含拉取逻辑,不含聚合逻辑
// ==========================================

pub mod gp_record;
pub mod order;
pub mod record;
pub mod types;

// 重导出核心类型
pub use gp_record::GpRecord;
pub use order::{is_valid_identity, Order};
pub use record::TabularRecord;
pub use types::{
    GpNumericField, GpTextField, OrderNumericField, OrderTextField, RecordKind, NA_SENTINEL,
    NUMERIC_FALLBACK,
};
