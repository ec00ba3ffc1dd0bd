// ==========================================
// Latam 看板系统 - 月度时间分桶
// ==========================================
// 标签格式: "%b '%y"（例: Jan '25）
// 排序: 由标签还原当月首日（年份按 20yy）后按时间先后；
//       无法还原的标签排在所有合法标签之后，按字典序
// ==========================================

use crate::domain::record::TabularRecord;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// 单个月度分桶
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketTotal {
    pub label: String,
    pub total: f64,
}

/// 生成月度标签
pub fn bucket_label<D: Datelike>(date: &D) -> String {
    let month = MONTH_ABBREVIATIONS[date.month0() as usize];
    format!("{} '{:02}", month, date.year().rem_euclid(100))
}

/// 由标签还原当月首日
pub fn bucket_sort_key(label: &str) -> Option<NaiveDate> {
    let (month_text, year_text) = label.trim().split_once(" '")?;
    let month0 = MONTH_ABBREVIATIONS.iter().position(|m| *m == month_text)?;
    if year_text.len() != 2 || !year_text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let yy: i32 = year_text.parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + yy, month0 as u32 + 1, 1)
}

/// 标签比较：合法标签按时间先后，非法标签在后并按字典序
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    match (bucket_sort_key(a), bucket_sort_key(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// 对标签列表排序
pub fn sort_bucket_labels(labels: &mut [String]) {
    labels.sort_by(|a, b| compare_labels(a, b));
}

/// 按月分桶求和
///
/// 无日期字段的记录不参与分桶
pub fn time_bucketed_series<R: TabularRecord>(
    records: &[R],
    value_field: R::NumericField,
) -> Vec<BucketTotal> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for record in records {
        let Some(ts) = record.timestamp() else {
            continue;
        };
        *totals.entry(bucket_label(&ts)).or_insert(0.0) += record.number(value_field);
    }

    let mut series: Vec<BucketTotal> = totals
        .into_iter()
        .map(|(label, total)| BucketTotal { label, total })
        .collect();
    series.sort_by(|a, b| compare_labels(&a.label, &b.label));
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::OrderNumericField;
    use crate::domain::Order;

    fn order(y: i32, m: u32, d: u32, amount: f64) -> Order {
        Order {
            date: NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            order_fy: "FY".to_string(),
            party_name: "Acme".to_string(),
            amount,
            reserve: 0.0,
            total: amount,
            order_no: "1".to_string(),
            segment: "S".to_string(),
            req_reserve_12: 0.0,
        }
    }

    #[test]
    fn test_bucket_label_format() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(bucket_label(&date), "Jan '25");
        let date = NaiveDate::from_ymd_opt(2009, 12, 1).unwrap();
        assert_eq!(bucket_label(&date), "Dec '09");
    }

    #[test]
    fn test_sort_key_roundtrip() {
        assert_eq!(bucket_sort_key("Mar '24"), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(bucket_sort_key("Foo '24"), None);
        assert_eq!(bucket_sort_key("Mar 2024"), None);
        assert_eq!(bucket_sort_key(""), None);
    }

    #[test]
    fn test_series_sorted_chronologically() {
        let records = vec![
            order(2025, 1, 3, 5.0),
            order(2024, 11, 20, 1.0),
            order(2025, 1, 28, 2.0),
            order(2024, 12, 1, 4.0),
        ];
        let series = time_bucketed_series(&records, OrderNumericField::Amount);
        let labels: Vec<&str> = series.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Nov '24", "Dec '24", "Jan '25"]);
        assert_eq!(series[2].total, 7.0);
    }

    #[test]
    fn test_sort_bucket_labels_chronological() {
        let mut labels = vec!["Mar '25".to_string(), "Jan '25".to_string(), "Feb '25".to_string()];
        sort_bucket_labels(&mut labels);
        assert_eq!(labels, vec!["Jan '25", "Feb '25", "Mar '25"]);

        let mut labels = vec!["Jan '25".to_string(), "Aug '24".to_string(), "Dec '24".to_string()];
        sort_bucket_labels(&mut labels);
        assert_eq!(labels, vec!["Aug '24", "Dec '24", "Jan '25"]);
    }

    #[test]
    fn test_unparseable_labels_sort_last() {
        let mut labels = vec![
            "zzz".to_string(),
            "Feb '25".to_string(),
            "abc".to_string(),
            "Dec '24".to_string(),
        ];
        sort_bucket_labels(&mut labels);
        assert_eq!(labels, vec!["Dec '24", "Feb '25", "abc", "zzz"]);
    }
}
