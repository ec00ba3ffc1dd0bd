// ==========================================
// Latam 看板系统 - 配置管理器
// ==========================================
// 职责: 配置加载与覆写
// 优先级: 环境变量 > 配置文件 > 内置默认值
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::sheet_config::DashboardConfig;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    vars: HashMap<String, String>,
}

impl ConfigManager {
    /// 从进程环境变量创建
    pub fn from_env() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// 从给定键值创建（测试与嵌入场景）
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// 读取变量（空白视为未设置）
    fn get_var(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// 加载配置
    ///
    /// # 流程
    /// 1. 若设置了 LATAM_DASHBOARD_CONFIG，读取该 JSON 文件，否则使用默认值
    /// 2. 应用环境变量覆写（非法值忽略并告警）
    /// 3. 校验
    pub fn load(&self) -> ConfigResult<DashboardConfig> {
        let mut config = match self.get_var(config_keys::CONFIG_PATH) {
            Some(path) => {
                info!(path = %path, "读取看板配置文件");
                Self::load_file(path)?
            }
            None => DashboardConfig::default(),
        };

        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// 读取 JSON 配置文件
    pub fn load_file<P: AsRef<Path>>(path: P) -> ConfigResult<DashboardConfig> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        DashboardConfig::from_json_str(&raw)
    }

    /// 应用环境变量覆写
    fn apply_overrides(&self, config: &mut DashboardConfig) {
        if let Some(sheet_id) = self.get_var(config_keys::SHEET_ID) {
            config.sheet_id = sheet_id.to_string();
        }

        if let Some(base_url) = self.get_var(config_keys::BASE_URL) {
            config.base_url = base_url.to_string();
        }

        if let Some(raw) = self.get_var(config_keys::REFRESH_SECS) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.refresh_interval_secs = secs,
                _ => warn!(
                    config_key = config_keys::REFRESH_SECS,
                    raw_value = %raw,
                    "刷新间隔配置格式错误，使用原值"
                ),
            }
        }

        if let Some(raw) = self.get_var(config_keys::TIMEOUT_SECS) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout_secs = Some(secs),
                _ => warn!(
                    config_key = config_keys::TIMEOUT_SECS,
                    raw_value = %raw,
                    "请求超时配置格式错误，忽略"
                ),
            }
        }
    }
}

// ==========================================
// 配置键常量（环境变量名）
// ==========================================
pub mod config_keys {
    // 配置文件路径
    pub const CONFIG_PATH: &str = "LATAM_DASHBOARD_CONFIG";

    // 表格源
    pub const SHEET_ID: &str = "LATAM_DASHBOARD_SHEET_ID";
    pub const BASE_URL: &str = "LATAM_DASHBOARD_BASE_URL";

    // 刷新与超时
    pub const REFRESH_SECS: &str = "LATAM_DASHBOARD_REFRESH_SECS";
    pub const TIMEOUT_SECS: &str = "LATAM_DASHBOARD_TIMEOUT_SECS";

    // 性能日志
    pub const PERF: &str = "LATAM_DASHBOARD_PERF";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults_without_vars() {
        let manager = ConfigManager::from_vars(Vec::<(String, String)>::new());
        let config = manager.load().unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let manager = ConfigManager::from_vars([
            (config_keys::SHEET_ID, "sheet-xyz"),
            (config_keys::REFRESH_SECS, "15"),
            (config_keys::TIMEOUT_SECS, "abc"),
        ]);
        let config = manager.load().unwrap();

        assert_eq!(config.sheet_id, "sheet-xyz");
        assert_eq!(config.refresh_interval_secs, 15);
        assert_eq!(config.request_timeout_secs, None);
    }

    #[test]
    fn test_invalid_refresh_keeps_default() {
        let manager = ConfigManager::from_vars([(config_keys::REFRESH_SECS, "0")]);
        let config = manager.load().unwrap();
        assert_eq!(config.refresh_interval_secs, 60);
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let manager =
            ConfigManager::from_vars([(config_keys::CONFIG_PATH, "/nonexistent/latam.json")]);
        assert!(matches!(
            manager.load(),
            Err(ConfigError::FileRead { .. })
        ));
    }
}
