// ==========================================
// Latam 看板系统 - 预留单领域模型
// ==========================================
// 数据源: Latam_Reserve 工作表 A:I
// 生命周期: 由归一化器创建，看板会话内只读，下次拉取整体替换
// ==========================================

use crate::domain::record::TabularRecord;
use crate::domain::types::{OrderNumericField, OrderTextField, NA_SENTINEL};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// Order - 预留单
// ==========================================
// 红线: party_name 为身份字段，空白或 N/A 的行不会进入记录集
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub date: NaiveDateTime,   // A: 下单日期（缺失时为解码时刻）
    pub order_fy: String,      // B: 财年
    pub party_name: String,    // C: 客户名称
    pub amount: f64,           // D: 订单金额
    pub reserve: f64,          // E: 预留金额
    pub total: f64,            // F: 合计
    pub order_no: String,      // G: 订单号
    pub segment: String,       // H: 业务板块
    pub req_reserve_12: f64,   // I: 12% 预留要求
}

impl Order {
    /// 净订单额（金额 - 预留）
    pub fn net_value(&self) -> f64 {
        self.amount - self.reserve
    }

    /// 身份字段是否有效
    pub fn has_valid_identity(&self) -> bool {
        is_valid_identity(&self.party_name)
    }
}

impl TabularRecord for Order {
    type TextField = OrderTextField;
    type NumericField = OrderNumericField;

    fn text(&self, field: OrderTextField) -> &str {
        match field {
            OrderTextField::OrderFy => &self.order_fy,
            OrderTextField::PartyName => &self.party_name,
            OrderTextField::OrderNo => &self.order_no,
            OrderTextField::Segment => &self.segment,
        }
    }

    fn number(&self, field: OrderNumericField) -> f64 {
        match field {
            OrderNumericField::Amount => self.amount,
            OrderNumericField::Reserve => self.reserve,
            OrderNumericField::Total => self.total,
            OrderNumericField::ReqReserve12 => self.req_reserve_12,
        }
    }

    fn timestamp(&self) -> Option<NaiveDateTime> {
        Some(self.date)
    }
}

/// 身份字段有效性: 非空白且不等于哨兵值
pub fn is_valid_identity(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && value != NA_SENTINEL
}
