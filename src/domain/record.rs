// ==========================================
// Latam 看板系统 - 表格记录抽象
// ==========================================
// 职责: 为聚合引擎提供统一的字段取值接口
// 实现者: Order, GpRecord
// ==========================================

use chrono::NaiveDateTime;
use std::fmt::Debug;
use std::hash::Hash;

// ==========================================
// Trait: TabularRecord
// ==========================================
// 用途: 聚合引擎按字段选择器取值，不关心具体记录种类
pub trait TabularRecord {
    /// 文本字段选择器
    type TextField: Copy + Eq + Hash + Debug;

    /// 数值字段选择器
    type NumericField: Copy + Eq + Hash + Debug;

    /// 读取文本字段
    fn text(&self, field: Self::TextField) -> &str;

    /// 读取数值字段
    fn number(&self, field: Self::NumericField) -> f64;

    /// 记录时间（无日期字段的记录种类返回 None）
    fn timestamp(&self) -> Option<NaiveDateTime> {
        None
    }
}
