// ==========================================
// 聚合引擎集成测试
// ==========================================
// 测试目标: 拉取后的记录集经过过滤/分组/分桶/透视的整体性质
// ==========================================

mod helpers;

use chrono::NaiveDate;
use helpers::{gp_row, gviz_payload, order_row, test_config, MockSheetSource};
use latam_dashboard::domain::{GpNumericField, GpTextField, OrderNumericField, OrderTextField};
use latam_dashboard::domain::{GpRecord, Order};
use latam_dashboard::engine::{
    filter_records, grouped_sum, pivot, sum, time_bucketed_series, top_n, GpFilter, OrderFilter,
};
use latam_dashboard::importer::SheetImporter;

async fn load_orders() -> Vec<Order> {
    let source = MockSheetSource::new();
    source.push_body(
        "Latam_Reserve",
        gviz_payload(vec![
            order_row("Date(2024,10,5)", "FY25", "Acme", 50.0, 5.0, 55.0, "SO-1", "Retail", 0.0),
            order_row("Date(2025,0,20)", "FY25", "Beta", 30.0, 0.0, 30.0, "SO-2", "Mining", 0.0),
            order_row("Date(2024,11,1)", "FY25", "Acme", 25.0, 10.0, 35.0, "SO-3", "Retail", 0.0),
            order_row("Date(2025,0,31)", "FY25", "Gamma", 30.0, 1.0, 31.0, "SO-4", "Energy", 0.0),
        ]),
    );
    SheetImporter::new(source, test_config())
        .fetch_orders()
        .await
        .unwrap()
}

async fn load_gp() -> Vec<GpRecord> {
    let source = MockSheetSource::new();
    source.push_body(
        "Country Wise Highest Selling GP",
        gviz_payload(vec![
            gp_row("Chile", "Mining", "C1", 10.0, 2.0, 4.0),
            gp_row("Brazil", "Retail", "B1", 10.0, 2.0, 6.0),
            gp_row("Chile", "Retail", "C2", 10.0, 2.0, 1.0),
            gp_row("Peru", "Energy", "P1", 10.0, 2.0, 0.0),
        ]),
    );
    SheetImporter::new(source, test_config())
        .fetch_gp_records()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_group_totals_match_overall_total() {
    let orders = load_orders().await;
    let groups = grouped_sum(&orders, OrderTextField::PartyName, OrderNumericField::Amount);
    let group_total: f64 = groups.iter().map(|g| g.total).sum();
    assert!((group_total - sum(&orders, OrderNumericField::Amount)).abs() < 1e-9);

    let top = top_n(&groups, 2);
    assert_eq!(top[0].key, "Acme");
    // Beta 与 Gamma 并列，保持首次出现顺序
    assert_eq!(top[1].key, "Beta");
}

#[tokio::test]
async fn test_monthly_series_chronological() {
    let orders = load_orders().await;
    let series = time_bucketed_series(&orders, OrderNumericField::Amount);
    let labels: Vec<&str> = series.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Nov '24", "Dec '24", "Jan '25"]);
    assert_eq!(series[2].total, 60.0);
}

#[tokio::test]
async fn test_order_filter_combines_constraints() {
    let orders = load_orders().await;

    let filter = OrderFilter {
        start_date: NaiveDate::from_ymd_opt(2024, 12, 1),
        end_date: NaiveDate::from_ymd_opt(2025, 1, 31),
        party_name: "Acme".to_string(),
        ..Default::default()
    };
    let filtered = filter_records(&orders, &filter.to_record_filter());
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].order_no, "SO-3");

    let no_op = filter_records(&orders, &OrderFilter::default().to_record_filter());
    assert_eq!(no_op, orders);
}

#[tokio::test]
async fn test_pivot_over_filtered_gp() {
    let records = load_gp().await;
    let table = pivot(&records, GpTextField::Country, GpTextField::Segment, GpNumericField::Gp);

    assert_eq!(table.columns, vec!["Energy", "Mining", "Retail"]);
    let keys: Vec<&str> = table.rows.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["Brazil", "Chile", "Peru"]);
    assert_eq!(table.cell("Chile", "Mining"), Some(4.0));
    assert_eq!(table.cell("Chile", "Energy"), Some(0.0));

    let chile_only = filter_records(
        &records,
        &GpFilter {
            country: "Chile".to_string(),
            segment: String::new(),
        }
        .to_record_filter(),
    );
    let table = pivot(&chile_only, GpTextField::Country, GpTextField::Segment, GpNumericField::Gp);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.columns, vec!["Mining", "Retail"]);
    assert_eq!(table.rows[0].total, 5.0);
}
