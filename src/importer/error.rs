// ==========================================
// Latam 看板系统 - 拉取模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 单元格级别的异常不进入此类型，由归一化缺省值吸收
// ==========================================

use thiserror::Error;

/// 拉取/解析错误类型
///
/// 两类错误对单次拉取都是致命的，区别在于排查方向:
/// - Network: 传输失败或非成功状态码，通常是暂时性问题
/// - Format: 返回内容不是预期的表格封包，通常是工作表未公开或被改名
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("网络请求失败: {message}")]
    Network {
        status: Option<u16>,
        message: String,
    },

    #[error("返回格式错误: {0}")]
    Format(String),
}

impl FetchError {
    /// 构造非成功状态码错误
    pub fn http_status(status: u16) -> Self {
        FetchError::Network {
            status: Some(status),
            message: format!("HTTP 状态码 {}", status),
        }
    }

    /// 构造传输错误（无状态码）
    pub fn transport(message: impl Into<String>) -> Self {
        FetchError::Network {
            status: None,
            message: message.into(),
        }
    }

    /// 是否属于配置类问题（工作表改名/未公开）
    pub fn is_configuration_problem(&self) -> bool {
        matches!(self, FetchError::Format(_))
    }
}

// 实现 From<reqwest::Error>
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Format(format!("JSON 解码失败: {}", err))
    }
}

/// Result 类型别名
pub type FetchResult<T> = Result<T, FetchError>;
