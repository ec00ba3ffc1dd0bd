// ==========================================
// Latam 看板系统 - 国家毛利领域模型
// ==========================================
// 数据源: Country Wise Highest Selling GP 工作表 A:F
// ==========================================

use crate::domain::order::is_valid_identity;
use crate::domain::record::TabularRecord;
use crate::domain::types::{GpNumericField, GpTextField};
use serde::{Deserialize, Serialize};

// ==========================================
// GpRecord - 国家/板块毛利行
// ==========================================
// 红线: country 为身份字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpRecord {
    pub country: String,         // A: 国家
    pub segment: String,         // B: 业务板块（机型）
    pub bonhorffer_code: String, // C: 分类编码（原样透传）
    pub export_value: f64,       // D: 出口额
    pub import_value: f64,       // E: 进口额
    pub gp: f64,                 // F: 毛利
}

impl GpRecord {
    /// 身份字段是否有效
    pub fn has_valid_identity(&self) -> bool {
        is_valid_identity(&self.country)
    }
}

impl TabularRecord for GpRecord {
    type TextField = GpTextField;
    type NumericField = GpNumericField;

    fn text(&self, field: GpTextField) -> &str {
        match field {
            GpTextField::Country => &self.country,
            GpTextField::Segment => &self.segment,
            GpTextField::BonhorfferCode => &self.bonhorffer_code,
        }
    }

    fn number(&self, field: GpNumericField) -> f64 {
        match field {
            GpNumericField::ExportValue => self.export_value,
            GpNumericField::ImportValue => self.import_value,
            GpNumericField::Gp => self.gp,
        }
    }
}
