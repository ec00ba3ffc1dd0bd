// ==========================================
// Latam 看板系统 - 透视表（国家 × 板块）
// ==========================================
// 每个行键一行；每行对全部列键零初始化后累加
// 行按合计降序（稳定），列键升序
// ==========================================

use crate::domain::record::TabularRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotRow {
    pub key: String,
    pub values: BTreeMap<String, f64>,
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PivotTable {
    pub columns: Vec<String>,
    pub rows: Vec<PivotRow>,
}

impl PivotTable {
    /// 单元格取值（不存在返回 None）
    pub fn cell(&self, row_key: &str, column_key: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.key == row_key)
            .and_then(|r| r.values.get(column_key).copied())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 构建透视表
pub fn pivot<R: TabularRecord>(
    records: &[R],
    row_field: R::TextField,
    column_field: R::TextField,
    value_field: R::NumericField,
) -> PivotTable {
    let columns: Vec<String> = records
        .iter()
        .map(|r| r.text(column_field).to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let zeroed: BTreeMap<String, f64> = columns.iter().map(|c| (c.clone(), 0.0)).collect();

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<PivotRow> = Vec::new();
    for record in records {
        let key = record.text(row_field);
        let slot = *index.entry(key).or_insert_with(|| {
            rows.push(PivotRow {
                key: key.to_string(),
                values: zeroed.clone(),
                total: 0.0,
            });
            rows.len() - 1
        });

        let value = record.number(value_field);
        let row = &mut rows[slot];
        if let Some(cell) = row.values.get_mut(record.text(column_field)) {
            *cell += value;
        }
        row.total += value;
    }

    rows.sort_by(|a, b| b.total.total_cmp(&a.total));
    PivotTable { columns, rows }
}
