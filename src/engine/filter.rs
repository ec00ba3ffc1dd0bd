// ==========================================
// Latam 看板系统 - 记录过滤器
// ==========================================
// 约束: 文本字段精确相等 + 日期区间（闭区间，仅比较日历日期部分）
// 红线: 空约束等价于不过滤
// ==========================================

use crate::domain::record::TabularRecord;
use crate::domain::types::{GpTextField, OrderTextField};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// RecordFilter - 通用过滤规格
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFilter<F> {
    pub equals: Vec<(F, String)>,     // 文本字段精确匹配
    pub date_from: Option<NaiveDate>, // 起始日期（含）
    pub date_to: Option<NaiveDate>,   // 截止日期（含）
}

impl<F> Default for RecordFilter<F> {
    fn default() -> Self {
        Self {
            equals: Vec::new(),
            date_from: None,
            date_to: None,
        }
    }
}

impl<F: Copy> RecordFilter<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加文本相等约束（空值约束在匹配时忽略）
    pub fn with_equals(mut self, field: F, value: impl Into<String>) -> Self {
        self.equals.push((field, value.into()));
        self
    }

    /// 设置日期区间
    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// 是否没有任何生效约束
    pub fn is_empty(&self) -> bool {
        self.equals.iter().all(|(_, v)| v.is_empty())
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    /// 判断单条记录是否满足全部约束
    ///
    /// 无日期字段的记录在存在日期约束时不匹配
    pub fn matches<R>(&self, record: &R) -> bool
    where
        R: TabularRecord<TextField = F>,
    {
        let text_ok = self
            .equals
            .iter()
            .filter(|(_, expected)| !expected.is_empty())
            .all(|(field, expected)| record.text(*field) == expected);
        if !text_ok {
            return false;
        }

        if self.date_from.is_none() && self.date_to.is_none() {
            return true;
        }

        let Some(day) = record.timestamp().map(|ts| ts.date()) else {
            return false;
        };
        self.date_from.map_or(true, |from| day >= from) && self.date_to.map_or(true, |to| day <= to)
    }
}

/// 过滤记录集（保序）
pub fn filter_records<R>(records: &[R], filter: &RecordFilter<R::TextField>) -> Vec<R>
where
    R: TabularRecord + Clone,
{
    records
        .iter()
        .filter(|r| filter.matches(*r))
        .cloned()
        .collect()
}

// ==========================================
// OrderFilter - 预留单看板过滤条件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub order_no: String,
    pub party_name: String,
}

impl OrderFilter {
    pub fn to_record_filter(&self) -> RecordFilter<OrderTextField> {
        RecordFilter::new()
            .with_equals(OrderTextField::OrderNo, self.order_no.clone())
            .with_equals(OrderTextField::PartyName, self.party_name.clone())
            .with_date_range(self.start_date, self.end_date)
    }
}

// ==========================================
// GpFilter - 国家毛利看板过滤条件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpFilter {
    pub country: String,
    pub segment: String,
}

impl GpFilter {
    pub fn to_record_filter(&self) -> RecordFilter<GpTextField> {
        RecordFilter::new()
            .with_equals(GpTextField::Country, self.country.clone())
            .with_equals(GpTextField::Segment, self.segment.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GpRecord, Order};

    fn gp(country: &str, segment: &str) -> GpRecord {
        GpRecord {
            country: country.to_string(),
            segment: segment.to_string(),
            bonhorffer_code: "X".to_string(),
            export_value: 0.0,
            import_value: 0.0,
            gp: 1.0,
        }
    }

    fn order_on(y: i32, m: u32, d: u32, h: u32) -> Order {
        Order {
            date: NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, 30, 0)
                .unwrap(),
            order_fy: "FY26".to_string(),
            party_name: "Acme".to_string(),
            amount: 1.0,
            reserve: 0.0,
            total: 1.0,
            order_no: "SO-1".to_string(),
            segment: "Retail".to_string(),
            req_reserve_12: 0.0,
        }
    }

    #[test]
    fn test_empty_constraint_is_noop() {
        let records = vec![gp("Brazil", "Retail"), gp("Chile", "Retail"), gp("Brazil", "Mining")];

        let with_empty = GpFilter {
            country: "Brazil".to_string(),
            segment: String::new(),
        };
        let country_only = RecordFilter::new().with_equals(GpTextField::Country, "Brazil");

        assert_eq!(
            filter_records(&records, &with_empty.to_record_filter()),
            filter_records(&records, &country_only)
        );
        assert_eq!(filter_records(&records, &country_only).len(), 2);
        assert!(GpFilter::default().to_record_filter().is_empty());
    }

    #[test]
    fn test_date_range_ignores_time_of_day() {
        let records = vec![order_on(2025, 7, 1, 23), order_on(2025, 7, 2, 0), order_on(2025, 7, 3, 12)];
        let day = |d| NaiveDate::from_ymd_opt(2025, 7, d);

        let filter = OrderFilter {
            start_date: day(1),
            end_date: day(2),
            ..Default::default()
        };
        let result = filter_records(&records, &filter.to_record_filter());
        assert_eq!(result.len(), 2);

        let only_end = OrderFilter {
            end_date: day(1),
            ..Default::default()
        };
        assert_eq!(filter_records(&records, &only_end.to_record_filter()).len(), 1);
    }

    #[test]
    fn test_date_constraint_excludes_records_without_date() {
        let records = vec![gp("Brazil", "Retail")];
        let filter = RecordFilter::<GpTextField>::new()
            .with_date_range(NaiveDate::from_ymd_opt(2025, 1, 1), None);
        assert!(filter_records(&records, &filter).is_empty());
    }
}
