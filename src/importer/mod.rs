// ==========================================
// Latam 看板系统 - 拉取层
// ==========================================
// 职责: 远程表格 → 强类型记录集
// 流程: 拉取 → 封包解析 → 日期解码 → 归一化 → 身份过滤
// ==========================================

// 模块声明
pub mod date_decoder;
pub mod error;
pub mod gviz_parser;
pub mod record_normalizer;
pub mod sheet_importer_impl;
pub mod sheet_importer_trait;
pub mod sheet_source;

// 重导出核心类型
pub use error::{FetchError, FetchResult};
pub use gviz_parser::{parse, GvizParser, RawCell, RawRow, ENVELOPE_MARKER};
pub use record_normalizer::{
    normalize_batch, normalize_row, GpRecordNormalizer, NormalizedBatch, NormalizedRecord,
    OrderNormalizer,
};
pub use sheet_importer_impl::SheetImporter;
pub use sheet_source::HttpSheetSource;

// 重导出 Trait 接口
pub use sheet_importer_trait::{PayloadParser, RowNormalizer, SheetRecord, SheetSource};
