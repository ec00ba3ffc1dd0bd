// ==========================================
// Latam 看板系统 - HTTP 表格源
// ==========================================
// 职责: 通过 reqwest 拉取表格接口原始文本
// 错误: 传输失败 / 非 2xx 状态码 → FetchError::Network
// ==========================================

use crate::importer::error::{FetchError, FetchResult};
use crate::importer::sheet_importer_trait::SheetSource;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

// ==========================================
// HttpSheetSource
// ==========================================
pub struct HttpSheetSource {
    client: reqwest::Client,
}

impl HttpSheetSource {
    /// 创建 HTTP 表格源
    ///
    /// # 参数
    /// - timeout: 请求超时（None 表示不设超时）
    pub fn new(timeout: Option<Duration>) -> FetchResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::transport(format!("HTTP 客户端初始化失败: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SheetSource for HttpSheetSource {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        debug!(url = %url, "请求表格接口");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "表格接口返回非成功状态码");
            return Err(FetchError::http_status(status.as_u16()));
        }

        let text = response.text().await?;
        debug!(bytes = text.len(), "表格接口响应读取完成");
        Ok(text)
    }
}
