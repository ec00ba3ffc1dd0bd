// ==========================================
// Latam 看板系统 - 聚合引擎（分组 / TopN / 标量）
// ==========================================
// 职责: 纯函数聚合，输入记录集，输出展示用形状
// 红线: 确定性输出；空输入返回空结果或 0，不报错
// ==========================================

use crate::domain::record::TabularRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

// ==========================================
// 结果类型
// ==========================================

/// 单个分组的合计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,
    pub total: f64,
}

/// 单个分组的多指标合计（与传入字段顺序一致）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotals {
    pub key: String,
    pub values: Vec<f64>,
}

/// 标量汇总
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScalarSummary {
    pub total: f64,
    pub count: usize,
    pub mean: f64,
}

// ==========================================
// 去重取值
// ==========================================

/// 文本字段的去重取值（升序）
pub fn distinct_values<R: TabularRecord>(records: &[R], field: R::TextField) -> Vec<String> {
    records
        .iter()
        .map(|r| r.text(field).to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ==========================================
// 分组求和
// ==========================================

/// 按文本字段分组，对数值字段求和
///
/// 分组按首次出现顺序返回
pub fn grouped_sum<R: TabularRecord>(
    records: &[R],
    group_field: R::TextField,
    value_field: R::NumericField,
) -> Vec<GroupTotal> {
    grouped_sums(records, group_field, &[value_field])
        .into_iter()
        .map(|g| GroupTotal {
            total: g.values.first().copied().unwrap_or_default(),
            key: g.key,
        })
        .collect()
}

/// 按文本字段分组，同时对多个数值字段求和
pub fn grouped_sums<R: TabularRecord>(
    records: &[R],
    group_field: R::TextField,
    value_fields: &[R::NumericField],
) -> Vec<GroupTotals> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<GroupTotals> = Vec::new();

    for record in records {
        let key = record.text(group_field);
        let slot = match index.get(key) {
            Some(&slot) => slot,
            None => {
                groups.push(GroupTotals {
                    key: key.to_string(),
                    values: vec![0.0; value_fields.len()],
                });
                index.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };
        for (acc, field) in groups[slot].values.iter_mut().zip(value_fields) {
            *acc += record.number(*field);
        }
    }

    groups
}

// ==========================================
// TopN
// ==========================================

/// 按合计降序取前 N 个（稳定排序，并列保持原顺序）
pub fn top_n(groups: &[GroupTotal], n: usize) -> Vec<GroupTotal> {
    let mut sorted = groups.to_vec();
    sort_desc_by(&mut sorted, |g| g.total);
    sorted.truncate(n);
    sorted
}

/// 按指定指标降序稳定排序
pub fn sort_desc_by<T, F>(items: &mut [T], metric: F)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| metric(b).total_cmp(&metric(a)));
}

// ==========================================
// 标量汇总
// ==========================================

pub fn sum<R: TabularRecord>(records: &[R], field: R::NumericField) -> f64 {
    records.iter().map(|r| r.number(field)).sum()
}

/// 合计 / 计数 / 均值（空集全部为 0）
pub fn summarize<R: TabularRecord>(records: &[R], field: R::NumericField) -> ScalarSummary {
    let count = records.len();
    let total = sum(records, field);
    let mean = if count == 0 { 0.0 } else { total / count as f64 };
    ScalarSummary { total, count, mean }
}
