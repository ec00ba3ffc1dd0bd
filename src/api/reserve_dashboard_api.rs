// ==========================================
// Latam 看板系统 - 预留单看板 API
// ==========================================
// 职责: 过滤预留单记录集，并计算看板全部展示形状
// 输出: KPI / 客户 Top5 / 订单构成 / 月度订单额 / 分页明细
// ==========================================

use crate::api::pagination::{paginate, Page, DEFAULT_ROWS_PER_PAGE};
use crate::domain::types::{OrderNumericField, OrderTextField};
use crate::domain::Order;
use crate::engine::{
    distinct_values, filter_records, grouped_sums, sort_desc_by, summarize, time_bucketed_series,
    BucketTotal, OrderFilter,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// 客户 TopN 默认数量
pub const DEFAULT_TOP_PARTIES: usize = 5;

pub const NET_ORDER_VALUE_SLICE: &str = "Net Order Value";
pub const RESERVE_SLICE: &str = "Reserve";

// ==========================================
// 展示形状
// ==========================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilterChoices {
    pub order_numbers: Vec<String>,
    pub party_names: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveKpis {
    pub total_amount: f64,
    pub total_reserve: f64,
    pub order_count: usize,
    pub avg_order_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyBreakdown {
    pub party_name: String,
    pub total_value: f64,
    pub reserve: f64,
    pub net_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSlice {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveDashboardView {
    pub filter: OrderFilter,
    pub choices: OrderFilterChoices,
    pub kpis: ReserveKpis,
    pub top_parties: Vec<PartyBreakdown>,
    pub booking_status: Vec<ValueSlice>,
    pub monthly_order_value: Vec<BucketTotal>,
    pub orders: Page<Order>,
}

// ==========================================
// ReserveDashboardApi
// ==========================================
#[derive(Debug, Clone)]
pub struct ReserveDashboardApi {
    top_parties: usize,
    rows_per_page: usize,
}

impl Default for ReserveDashboardApi {
    fn default() -> Self {
        Self {
            top_parties: DEFAULT_TOP_PARTIES,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl ReserveDashboardApi {
    pub fn new(top_parties: usize, rows_per_page: usize) -> Self {
        Self {
            top_parties,
            rows_per_page,
        }
    }

    /// 起始日期是否晚于截止日期
    pub fn is_inverted_range(filter: &OrderFilter) -> bool {
        matches!((filter.start_date, filter.end_date), (Some(from), Some(to)) if from > to)
    }

    /// 过滤下拉选项（基于全量记录）
    pub fn filter_choices(&self, orders: &[Order]) -> OrderFilterChoices {
        OrderFilterChoices {
            order_numbers: distinct_values(orders, OrderTextField::OrderNo),
            party_names: distinct_values(orders, OrderTextField::PartyName),
        }
    }

    /// 应用过滤条件（日期区间倒置时结果为空）
    pub fn apply_filter(&self, orders: &[Order], filter: &OrderFilter) -> Vec<Order> {
        if Self::is_inverted_range(filter) {
            warn!(
                start_date = ?filter.start_date,
                end_date = ?filter.end_date,
                "起始日期晚于截止日期，过滤结果为空"
            );
            return Vec::new();
        }
        filter_records(orders, &filter.to_record_filter())
    }

    /// KPI（空集全部为 0）
    pub fn kpis(&self, orders: &[Order]) -> ReserveKpis {
        let amount = summarize(orders, OrderNumericField::Amount);
        let reserve = summarize(orders, OrderNumericField::Reserve);
        ReserveKpis {
            total_amount: amount.total,
            total_reserve: reserve.total,
            order_count: amount.count,
            avg_order_amount: amount.mean,
        }
    }

    /// 按订单额排名的客户 TopN
    pub fn top_parties(&self, orders: &[Order]) -> Vec<PartyBreakdown> {
        let mut parties: Vec<PartyBreakdown> = grouped_sums(
            orders,
            OrderTextField::PartyName,
            &[OrderNumericField::Amount, OrderNumericField::Reserve],
        )
        .into_iter()
        .map(|g| {
            let total_value = g.values[0];
            let reserve = g.values[1];
            PartyBreakdown {
                party_name: g.key,
                total_value,
                reserve,
                net_value: total_value - reserve,
            }
        })
        .collect();

        sort_desc_by(&mut parties, |p| p.total_value);
        parties.truncate(self.top_parties);
        parties
    }

    /// 订单构成（净订单额 / 预留），仅保留正值
    pub fn booking_status(&self, orders: &[Order]) -> Vec<ValueSlice> {
        let kpis = self.kpis(orders);
        [
            (NET_ORDER_VALUE_SLICE, kpis.total_amount - kpis.total_reserve),
            (RESERVE_SLICE, kpis.total_reserve),
        ]
        .into_iter()
        .filter(|(_, value)| *value > 0.0)
        .map(|(name, value)| ValueSlice {
            name: name.to_string(),
            value,
        })
        .collect()
    }

    /// 月度订单额
    pub fn monthly_order_value(&self, orders: &[Order]) -> Vec<BucketTotal> {
        time_bucketed_series(orders, OrderNumericField::Amount)
    }

    /// 计算完整看板视图
    pub fn build_view(&self, orders: &[Order], filter: &OrderFilter, page: usize) -> ReserveDashboardView {
        let filtered = self.apply_filter(orders, filter);
        debug!(
            total = orders.len(),
            filtered = filtered.len(),
            "预留单看板过滤完成"
        );

        ReserveDashboardView {
            filter: filter.clone(),
            choices: self.filter_choices(orders),
            kpis: self.kpis(&filtered),
            top_parties: self.top_parties(&filtered),
            booking_status: self.booking_status(&filtered),
            monthly_order_value: self.monthly_order_value(&filtered),
            orders: paginate(&filtered, page, self.rows_per_page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn order(party: &str, order_no: &str, month: u32, amount: f64, reserve: f64) -> Order {
        Order {
            date: NaiveDate::from_ymd_opt(2025, month, 10)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            order_fy: "FY25".to_string(),
            party_name: party.to_string(),
            amount,
            reserve,
            total: amount,
            order_no: order_no.to_string(),
            segment: "Retail".to_string(),
            req_reserve_12: 0.0,
        }
    }

    #[test]
    fn test_top_parties_limit_and_net() {
        let orders: Vec<Order> = (0..7)
            .map(|i| order(&format!("P{}", i), "SO", 1, (i + 1) as f64 * 10.0, 1.0))
            .collect();
        let api = ReserveDashboardApi::default();
        let top = api.top_parties(&orders);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].party_name, "P6");
        assert_eq!(top[0].net_value, 69.0);
    }

    #[test]
    fn test_booking_status_skips_non_positive() {
        let api = ReserveDashboardApi::default();
        let only_reserve = vec![order("A", "1", 1, 5.0, 5.0)];
        let slices = api.booking_status(&only_reserve);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].name, RESERVE_SLICE);

        assert!(api.booking_status(&[]).is_empty());
    }

    #[test]
    fn test_inverted_date_range_yields_empty_view() {
        let orders = vec![order("Alpha", "SO-1", 2, 10.0, 1.0), order("Beta", "SO-2", 3, 20.0, 2.0)];
        let filter = OrderFilter {
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 2, 1),
            ..Default::default()
        };
        let view = ReserveDashboardApi::default().build_view(&orders, &filter, 1);

        assert_eq!(view.kpis, ReserveKpis::default());
        assert!(view.top_parties.is_empty());
        assert!(view.booking_status.is_empty());
        assert!(view.monthly_order_value.is_empty());
        assert_eq!(view.orders.total, 0);
        assert_eq!(view.choices.party_names, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_build_view_choices_use_unfiltered_records() {
        let orders = vec![
            order("Beta", "SO-2", 2, 20.0, 5.0),
            order("Alpha", "SO-1", 1, 10.0, 0.0),
        ];
        let filter = OrderFilter {
            party_name: "Alpha".to_string(),
            ..Default::default()
        };
        let view = ReserveDashboardApi::default()
            .build_view(&orders, &filter, 1);
        assert_eq!(view.choices.party_names, vec!["Alpha", "Beta"]);
        assert_eq!(view.kpis.order_count, 1);
        assert_eq!(view.kpis.avg_order_amount, 10.0);
        assert_eq!(view.orders.total, 1);
        assert_eq!(view.monthly_order_value.len(), 1);
    }
}
