// ==========================================
// Latam 看板系统 - 表格源配置
// ==========================================
// 职责: 表格 ID / 工作表名 / 列区间 / 刷新间隔
// 红线: 配置以值的形式显式传入拉取层，不使用全局常量
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// 默认表格服务地址
pub const DEFAULT_BASE_URL: &str = "https://docs.google.com/spreadsheets/d";

/// 默认表格 ID
pub const DEFAULT_SHEET_ID: &str = "1Q-FWc9tnZhhLtn0kpp_9HmvPR9g_8VQOD12WBWPzboM";

/// 默认刷新间隔（秒）
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;

// ==========================================
// SheetSelector - 工作表选择器
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSelector {
    pub sheet_name: String, // 工作表名称
    pub range: String,      // A1 列区间
}

impl SheetSelector {
    pub fn new(sheet_name: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            range: range.into(),
        }
    }

    /// 预留单工作表（A:I）
    pub fn orders_default() -> Self {
        Self::new("Latam_Reserve", "A:I")
    }

    /// 国家毛利工作表（A:F）
    pub fn gp_default() -> Self {
        Self::new("Country Wise Highest Selling GP", "A:F")
    }
}

// ==========================================
// DashboardConfig - 看板配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub base_url: String,
    pub sheet_id: String,
    pub orders: SheetSelector,
    pub gp: SheetSelector,
    pub refresh_interval_secs: u64,
    pub request_timeout_secs: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sheet_id: DEFAULT_SHEET_ID.to_string(),
            orders: SheetSelector::orders_default(),
            gp: SheetSelector::gp_default(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            request_timeout_secs: None,
        }
    }
}

impl DashboardConfig {
    /// 从 JSON 文本解析（缺省字段使用默认值）
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 刷新间隔
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// 请求超时
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// 构造表格接口地址
    ///
    /// # 参数
    /// - selector: 工作表选择器
    /// - cache_buster: 防缓存时间戳（毫秒）
    ///
    /// # 返回
    /// `{base_url}/{sheet_id}/gviz/tq?tqx=out:json&sheet=..&range=..&t=..`
    pub fn sheet_url(&self, selector: &SheetSelector, cache_buster: i64) -> ConfigResult<Url> {
        let base = format!(
            "{}/{}/gviz/tq",
            self.base_url.trim_end_matches('/'),
            self.sheet_id
        );
        let mut url = Url::parse(&base).map_err(|e| ConfigError::InvalidValue {
            key: "base_url".to_string(),
            value: self.base_url.clone(),
            message: e.to_string(),
        })?;

        url.query_pairs_mut()
            .append_pair("tqx", "out:json")
            .append_pair("sheet", &selector.sheet_name)
            .append_pair("range", &selector.range)
            .append_pair("t", &cache_buster.to_string());

        Ok(url)
    }

    /// 校验配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.sheet_id.trim().is_empty() {
            return Err(ConfigError::missing("sheet_id"));
        }
        for (key, selector) in [("orders", &self.orders), ("gp", &self.gp)] {
            if selector.sheet_name.trim().is_empty() {
                return Err(ConfigError::missing(&format!("{}.sheet_name", key)));
            }
            if selector.range.trim().is_empty() {
                return Err(ConfigError::missing(&format!("{}.range", key)));
            }
        }
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "refresh_interval_secs".to_string(),
                value: "0".to_string(),
                message: "刷新间隔必须大于 0".to_string(),
            });
        }
        Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidValue {
            key: "base_url".to_string(),
            value: self.base_url.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}
