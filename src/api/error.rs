// ==========================================
// Latam 看板系统 - API 层错误类型
// ==========================================
// 职责: 将拉取错误转换为面向使用者的错误消息，并附带处理建议
// ==========================================

use crate::importer::error::FetchError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    // ==========================================
    // 数据源错误
    // ==========================================
    /// 返回内容不是表格封包（工作表未公开或名称错误）
    #[error("数据源配置问题: {0}")]
    SourceConfiguration(String),

    /// 网络失败或非成功状态码
    #[error("数据源不可用: {message}")]
    SourceUnavailable {
        status: Option<u16>,
        message: String,
    },

    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 处理建议
    pub fn guidance(&self) -> &'static str {
        match self {
            ApiError::SourceConfiguration(_) => {
                "请确认工作表名称正确，并将表格共享设置为「知道链接的任何人可查看」"
            }
            ApiError::SourceUnavailable { .. } => "请检查网络连接后重试，看板会在下一个刷新周期自动重试",
            ApiError::InvalidInput(_) => "请检查过滤条件",
            ApiError::InternalError(_) => "请查看日志获取详细信息",
        }
    }
}

// ==========================================
// 从 FetchError 转换
// ==========================================
impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Format(msg) => ApiError::SourceConfiguration(msg),
            FetchError::Network { status, message } => {
                ApiError::SourceUnavailable { status, message }
            }
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 视图错误（可序列化，供状态快照展示）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewError {
    pub message: String,
    pub guidance: String,
    pub configuration_problem: bool,
}

impl From<&ApiError> for ViewError {
    fn from(err: &ApiError) -> Self {
        Self {
            message: err.to_string(),
            guidance: err.guidance().to_string(),
            configuration_problem: matches!(err, ApiError::SourceConfiguration(_)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_maps_to_configuration_guidance() {
        let err: ApiError = FetchError::Format("unexpected payload shape".to_string()).into();
        assert!(matches!(err, ApiError::SourceConfiguration(_)));
        assert!(err.guidance().contains("共享"));

        let view = ViewError::from(&err);
        assert!(view.configuration_problem);
        assert!(view.message.contains("unexpected payload shape"));
    }

    #[test]
    fn test_network_error_keeps_status() {
        let err: ApiError = FetchError::http_status(503).into();
        match &err {
            ApiError::SourceUnavailable { status, .. } => assert_eq!(*status, Some(503)),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!ViewError::from(&err).configuration_problem);
    }
}
