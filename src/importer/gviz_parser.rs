// ==========================================
// Latam 看板系统 - 表格响应解析器
// ==========================================
// 阶段 0: 封包校验 → 提取 JSON → 解码为稀疏行
// 数据源: gviz tq 接口（tqx=out:json），响应形如
//   /*O_o*/
//   google.visualization.Query.setResponse({...});
// ==========================================

use crate::importer::error::{FetchError, FetchResult};
use crate::importer::sheet_importer_trait::PayloadParser;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// 封包标记（缺失说明返回的是 HTML 错误页）
pub const ENVELOPE_MARKER: &str = "google.visualization.Query.setResponse";

// ==========================================
// 响应结构
// ==========================================

/// 解码后的完整响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GvizResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub errors: Vec<GvizMessage>,
    #[serde(default)]
    pub table: Option<GvizTable>,
}

/// 响应中的错误/警告条目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GvizMessage {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detailed_message: Option<String>,
}

/// 表格主体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GvizTable {
    #[serde(default)]
    pub cols: Vec<GvizColumn>,
    #[serde(default)]
    pub rows: Option<Vec<RawRow>>,
}

/// 列元数据（仅用于诊断日志，映射按列位进行）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GvizColumn {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "type")]
    pub col_type: String,
}

/// 原始行: 稀疏单元格序列
///
/// 单元格可能整体缺失（数组过短）、为 null、或 `v` 为 null，三者统一视为"无值"。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(default, rename = "c")]
    pub cells: Option<Vec<Option<RawCell>>>,
}

/// 原始单元格
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCell {
    #[serde(default)]
    pub v: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f: Option<String>,
}

impl RawRow {
    /// 由单元格值构造（None 表示该单元格为 null）
    pub fn from_values(values: Vec<Option<Value>>) -> Self {
        Self {
            cells: Some(
                values
                    .into_iter()
                    .map(|v| v.map(|value| RawCell { v: Some(value), f: None }))
                    .collect(),
            ),
        }
    }

    /// 列位取值: 缺失 / null 单元格 / null 值均返回 None
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.cells
            .as_ref()?
            .get(index)?
            .as_ref()?
            .v
            .as_ref()
            .filter(|v| !v.is_null())
    }

    /// 单元格数量（含 null 单元格）
    pub fn len(&self) -> usize {
        self.cells.as_ref().map_or(0, |c| c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GvizResponse {
    /// 响应是否为错误状态
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }

    /// 汇总错误信息（用于日志）
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| {
                e.detailed_message
                    .as_deref()
                    .or(e.message.as_deref())
                    .or(e.reason.as_deref())
                    .unwrap_or("unknown")
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// ==========================================
// GvizParser 实现
// ==========================================
pub struct GvizParser;

impl PayloadParser for GvizParser {
    fn parse_to_raw_rows(&self, raw_text: &str) -> FetchResult<Vec<RawRow>> {
        parse(raw_text)
    }
}

/// 解析原始响应文本为行序列
///
/// # 返回
/// - Ok(rows): 行序列（空表返回空序列，不视为错误）
/// - Err(FetchError::Format): 封包缺失或内部 JSON 解码失败
pub fn parse(raw_text: &str) -> FetchResult<Vec<RawRow>> {
    let response = parse_response(raw_text)?;

    if response.is_error() {
        warn!(errors = %response.error_summary(), "表格接口返回错误状态，按空表处理");
    }

    let rows = match response.table {
        Some(table) => {
            if !table.cols.is_empty() {
                let labels: Vec<&str> = table.cols.iter().map(|c| c.label.as_str()).collect();
                debug!(columns = ?labels, "表格列信息");
            }
            table.rows.unwrap_or_default()
        }
        None => Vec::new(),
    };

    debug!(rows = rows.len(), "表格响应解析完成");
    Ok(rows)
}

/// 校验封包并解码完整响应
pub fn parse_response(raw_text: &str) -> FetchResult<GvizResponse> {
    if !raw_text.contains(ENVELOPE_MARKER) {
        return Err(FetchError::Format(
            "unexpected payload shape: 缺少表格封包标记，请确认工作表名称正确且已公开分享"
                .to_string(),
        ));
    }

    let json = extract_envelope_body(raw_text)?;
    let response: GvizResponse = serde_json::from_str(json)?;
    Ok(response)
}

/// 截取第一个 '(' 与最后一个 ')' 之间的内容
fn extract_envelope_body(raw_text: &str) -> FetchResult<&str> {
    let start = raw_text.find('(');
    let end = raw_text.rfind(')');

    match (start, end) {
        (Some(s), Some(e)) if e > s => Ok(&raw_text[s + 1..e]),
        _ => Err(FetchError::Format(
            "unexpected payload shape: 封包括号不完整".to_string(),
        )),
    }
}
