// ==========================================
// Latam 看板系统 - 领域类型定义
// ==========================================
// 职责: 记录种类、字段选择器、缺省哨兵值
// 红线: 字段选择器是聚合引擎唯一的取值入口
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 缺省哨兵值
// ==========================================

/// 文本字段缺失时的哨兵值
pub const NA_SENTINEL: &str = "N/A";

/// 数值字段缺失时的缺省值
pub const NUMERIC_FALLBACK: f64 = 0.0;

// ==========================================
// 记录种类 (Record Kind)
// ==========================================
// 决定列位映射与身份字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordKind {
    Order,    // 预留单（A:I 共 9 列）
    GpRecord, // 国家毛利（A:F 共 6 列）
}

impl RecordKind {
    /// 该种类在表格中的列数
    pub fn column_count(&self) -> usize {
        match self {
            RecordKind::Order => 9,
            RecordKind::GpRecord => 6,
        }
    }

    /// 身份字段名（用于日志）
    pub fn identity_field(&self) -> &'static str {
        match self {
            RecordKind::Order => "party_name",
            RecordKind::GpRecord => "country",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Order => write!(f, "ORDER"),
            RecordKind::GpRecord => write!(f, "GP_RECORD"),
        }
    }
}

// ==========================================
// 预留单文本字段 (Order Text Field)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderTextField {
    OrderFy,   // 财年
    PartyName, // 客户名称（身份字段）
    OrderNo,   // 订单号
    Segment,   // 业务板块
}

impl fmt::Display for OrderTextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderTextField::OrderFy => write!(f, "order_fy"),
            OrderTextField::PartyName => write!(f, "party_name"),
            OrderTextField::OrderNo => write!(f, "order_no"),
            OrderTextField::Segment => write!(f, "segment"),
        }
    }
}

// ==========================================
// 预留单数值字段 (Order Numeric Field)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderNumericField {
    Amount,       // 订单金额
    Reserve,      // 预留金额
    Total,        // 合计
    #[serde(rename = "req_reserve_12")]
    ReqReserve12, // 12% 预留要求
}

impl fmt::Display for OrderNumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderNumericField::Amount => write!(f, "amount"),
            OrderNumericField::Reserve => write!(f, "reserve"),
            OrderNumericField::Total => write!(f, "total"),
            OrderNumericField::ReqReserve12 => write!(f, "req_reserve_12"),
        }
    }
}

// ==========================================
// 毛利文本字段 (GP Text Field)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GpTextField {
    Country,        // 国家（身份字段）
    Segment,        // 业务板块（机型）
    BonhorfferCode, // 分类编码（不解释）
}

impl fmt::Display for GpTextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpTextField::Country => write!(f, "country"),
            GpTextField::Segment => write!(f, "segment"),
            GpTextField::BonhorfferCode => write!(f, "bonhorffer_code"),
        }
    }
}

// ==========================================
// 毛利数值字段 (GP Numeric Field)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GpNumericField {
    ExportValue, // 出口额
    ImportValue, // 进口额
    Gp,          // 毛利
}

impl fmt::Display for GpNumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpNumericField::ExportValue => write!(f, "export_value"),
            GpNumericField::ImportValue => write!(f, "import_value"),
            GpNumericField::Gp => write!(f, "gp"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_column_count() {
        assert_eq!(RecordKind::Order.column_count(), 9);
        assert_eq!(RecordKind::GpRecord.column_count(), 6);
    }

    #[test]
    fn test_field_display_matches_serde_name() {
        let json = serde_json::to_string(&OrderNumericField::ReqReserve12).unwrap();
        assert_eq!(json, format!("\"{}\"", OrderNumericField::ReqReserve12));
        let parsed: OrderNumericField = serde_json::from_str("\"req_reserve_12\"").unwrap();
        assert_eq!(parsed, OrderNumericField::ReqReserve12);

        let json = serde_json::to_string(&GpTextField::BonhorfferCode).unwrap();
        assert_eq!(json, format!("\"{}\"", GpTextField::BonhorfferCode));
    }
}
