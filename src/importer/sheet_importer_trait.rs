// ==========================================
// Latam 看板系统 - 表格拉取 Trait
// ==========================================
// 职责: 定义拉取管道各阶段接口（不包含实现）
// 流程: 拉取文本 → 解析封包 → 按列位归一化 → 身份过滤
// ==========================================

use crate::domain::types::RecordKind;
use crate::importer::error::FetchResult;
use crate::importer::gviz_parser::RawRow;
use crate::importer::sheet_importer_impl::SheetImporter;
use async_trait::async_trait;

// ==========================================
// SheetSource Trait
// ==========================================
// 用途: 远程表格文本拉取（唯一的挂起操作）
// 实现者: HttpSheetSource（reqwest），测试中的内存假源
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// 拉取原始响应文本
    ///
    /// # 返回
    /// - Ok(String): 响应正文（可能是封包，也可能是 HTML 错误页）
    /// - Err(FetchError::Network): 传输失败或非成功状态码
    async fn fetch_text(&self, url: &str) -> FetchResult<String>;
}

// ==========================================
// PayloadParser Trait
// ==========================================
// 用途: 响应解析接口（阶段 0）
// 实现者: GvizParser
pub trait PayloadParser: Send + Sync {
    /// 解析响应文本为稀疏行序列
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 行序列（空表为空序列）
    /// - Err(FetchError::Format): 封包缺失或 JSON 解码失败
    fn parse_to_raw_rows(&self, raw_text: &str) -> FetchResult<Vec<RawRow>>;
}

// ==========================================
// RowNormalizer Trait
// ==========================================
// 用途: 单行归一化接口（阶段 1-2）
// 实现者: OrderNormalizer, GpRecordNormalizer
pub trait RowNormalizer: Send + Sync {
    /// 归一化后的记录类型
    type Record;

    /// 记录种类
    fn kind(&self) -> RecordKind;

    /// 按列位映射并应用缺省值（永不失败）
    fn normalize_row(&self, row: &RawRow) -> Self::Record;

    /// 身份字段校验（不通过的记录被丢弃）
    fn is_retained(&self, record: &Self::Record) -> bool;
}

// ==========================================
// SheetRecord Trait
// ==========================================
// 用途: 控制器按记录种类选择拉取路径
// 实现者: Order, GpRecord（见 sheet_importer_impl）
#[async_trait]
pub trait SheetRecord: Clone + Send + Sync + Sized + 'static {
    /// 记录种类
    fn kind() -> RecordKind;

    /// 通过拉取器获取该种类的全部有效记录
    async fn fetch_from<S: SheetSource>(importer: &SheetImporter<S>) -> FetchResult<Vec<Self>>;
}
