// ==========================================
// Latam 看板系统 - 记录归一化器
// ==========================================
// 阶段 1: 列位映射 + 缺省值（文本 → "N/A"，数值 → 0，日期 → 当前时刻）
// 阶段 2: 身份字段过滤（party_name / country）
// 红线: 缺省值只在此边界应用，展示层不再做空值判断
// ==========================================

use crate::domain::types::{RecordKind, NA_SENTINEL, NUMERIC_FALLBACK};
use crate::domain::{GpRecord, Order};
use crate::importer::date_decoder;
use crate::importer::gviz_parser::RawRow;
use crate::importer::sheet_importer_trait::RowNormalizer;
use chrono::{NaiveDateTime, Utc};
use serde_json::{Number, Value};

// ==========================================
// 列位定义
// ==========================================

/// Latam_Reserve 工作表列位（A:I）
pub mod order_columns {
    pub const DATE: usize = 0;
    pub const ORDER_FY: usize = 1;
    pub const PARTY_NAME: usize = 2;
    pub const AMOUNT: usize = 3;
    pub const RESERVE: usize = 4;
    pub const TOTAL: usize = 5;
    pub const ORDER_NO: usize = 6;
    pub const SEGMENT: usize = 7;
    pub const REQ_RESERVE_12: usize = 8;
}

/// Country Wise Highest Selling GP 工作表列位（A:F）
pub mod gp_columns {
    pub const COUNTRY: usize = 0;
    pub const SEGMENT: usize = 1;
    pub const BONHORFFER_CODE: usize = 2;
    pub const EXPORT_VALUE: usize = 3;
    pub const IMPORT_VALUE: usize = 4;
    pub const GP: usize = 5;
}

// ==========================================
// ColumnReader - 按列位的可选取值器
// ==========================================
pub struct ColumnReader<'a> {
    row: &'a RawRow,
}

impl<'a> ColumnReader<'a> {
    pub fn new(row: &'a RawRow) -> Self {
        Self { row }
    }

    /// 文本列，缺失时为 None
    pub fn text_opt(&self, index: usize) -> Option<String> {
        match self.row.value(index)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(render_number(n)),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// 文本列，缺失时为 "N/A"
    pub fn text(&self, index: usize) -> String {
        self.text_opt(index)
            .unwrap_or_else(|| NA_SENTINEL.to_string())
    }

    /// 数值列，非数值或缺失时为 0
    pub fn number(&self, index: usize) -> f64 {
        self.row
            .value(index)
            .and_then(Value::as_f64)
            .unwrap_or(NUMERIC_FALLBACK)
    }

    /// 日期列，缺失或非文本时为当前时刻
    pub fn date(&self, index: usize) -> NaiveDateTime {
        match self.row.value(index) {
            Some(Value::String(s)) if !s.is_empty() => date_decoder::decode(s),
            _ => Utc::now().naive_utc(),
        }
    }
}

/// 数值单元格转文本（整数不带小数部分，如订单号 10234.0 → "10234"）
fn render_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

// ==========================================
// OrderNormalizer
// ==========================================
pub struct OrderNormalizer;

impl RowNormalizer for OrderNormalizer {
    type Record = Order;

    fn kind(&self) -> RecordKind {
        RecordKind::Order
    }

    fn normalize_row(&self, row: &RawRow) -> Order {
        let reader = ColumnReader::new(row);
        Order {
            date: reader.date(order_columns::DATE),
            order_fy: reader.text(order_columns::ORDER_FY),
            party_name: reader.text(order_columns::PARTY_NAME),
            amount: reader.number(order_columns::AMOUNT),
            reserve: reader.number(order_columns::RESERVE),
            total: reader.number(order_columns::TOTAL),
            order_no: reader.text(order_columns::ORDER_NO),
            segment: reader.text(order_columns::SEGMENT),
            req_reserve_12: reader.number(order_columns::REQ_RESERVE_12),
        }
    }

    fn is_retained(&self, record: &Order) -> bool {
        record.has_valid_identity()
    }
}

// ==========================================
// GpRecordNormalizer
// ==========================================
pub struct GpRecordNormalizer;

impl RowNormalizer for GpRecordNormalizer {
    type Record = GpRecord;

    fn kind(&self) -> RecordKind {
        RecordKind::GpRecord
    }

    fn normalize_row(&self, row: &RawRow) -> GpRecord {
        let reader = ColumnReader::new(row);
        GpRecord {
            country: reader.text(gp_columns::COUNTRY),
            segment: reader.text(gp_columns::SEGMENT),
            bonhorffer_code: reader.text(gp_columns::BONHORFFER_CODE),
            export_value: reader.number(gp_columns::EXPORT_VALUE),
            import_value: reader.number(gp_columns::IMPORT_VALUE),
            gp: reader.number(gp_columns::GP),
        }
    }

    fn is_retained(&self, record: &GpRecord) -> bool {
        record.has_valid_identity()
    }
}

// ==========================================
// 按种类选择的单行归一化
// ==========================================

/// 单行归一化结果
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedRecord {
    Order(Order),
    Gp(GpRecord),
}

impl NormalizedRecord {
    /// 身份字段是否有效
    pub fn is_retained(&self) -> bool {
        match self {
            NormalizedRecord::Order(o) => o.has_valid_identity(),
            NormalizedRecord::Gp(g) => g.has_valid_identity(),
        }
    }
}

/// 按记录种类归一化一行（不做身份过滤）
pub fn normalize_row(row: &RawRow, kind: RecordKind) -> NormalizedRecord {
    match kind {
        RecordKind::Order => NormalizedRecord::Order(OrderNormalizer.normalize_row(row)),
        RecordKind::GpRecord => NormalizedRecord::Gp(GpRecordNormalizer.normalize_row(row)),
    }
}

// ==========================================
// 批量归一化
// ==========================================

/// 批量归一化结果
#[derive(Debug, Clone)]
pub struct NormalizedBatch<T> {
    pub records: Vec<T>,     // 保留记录（保持输入顺序）
    pub total_rows: usize,   // 输入行数
    pub dropped_rows: usize, // 身份校验丢弃行数
}

/// 批量归一化: 保序，丢弃的行直接省略
pub fn normalize_batch<N: RowNormalizer>(normalizer: &N, rows: &[RawRow]) -> NormalizedBatch<N::Record> {
    let records: Vec<N::Record> = rows
        .iter()
        .map(|row| normalizer.normalize_row(row))
        .filter(|record| normalizer.is_retained(record))
        .collect();

    NormalizedBatch {
        total_rows: rows.len(),
        dropped_rows: rows.len() - records.len(),
        records,
    }
}
