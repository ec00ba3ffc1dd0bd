// ==========================================
// Latam 看板系统 - 国家毛利看板 API
// ==========================================
// 职责: 过滤毛利记录集，并计算看板全部展示形状
// 输出: KPI / 国家×板块透视 / 国家毛利 / 板块占比 / 分页明细
// ==========================================

use crate::api::pagination::{paginate, Page, DEFAULT_ROWS_PER_PAGE};
use crate::domain::types::{GpNumericField, GpTextField, NA_SENTINEL};
use crate::domain::GpRecord;
use crate::engine::{
    distinct_values, filter_records, grouped_sum, grouped_sums, pivot, sort_desc_by, sum, top_n,
    GpFilter, GroupTotal, PivotTable,
};
use serde::{Deserialize, Serialize};

// ==========================================
// 展示形状
// ==========================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpFilterChoices {
    pub countries: Vec<String>,
    pub segments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpKpis {
    pub total_gp: f64,
    pub top_country: String,
    pub top_segment: String,
}

impl Default for GpKpis {
    fn default() -> Self {
        Self {
            total_gp: 0.0,
            top_country: NA_SENTINEL.to_string(),
            top_segment: NA_SENTINEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryGp {
    pub country: String,
    pub gp: f64,
    pub export_value: f64,
    pub import_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpDashboardView {
    pub filter: GpFilter,
    pub choices: GpFilterChoices,
    pub kpis: GpKpis,
    pub country_segment: PivotTable,
    pub gp_by_country: Vec<CountryGp>,
    pub segment_share: Vec<GroupTotal>,
    pub records: Page<GpRecord>,
}

// ==========================================
// GpDashboardApi
// ==========================================
#[derive(Debug, Clone)]
pub struct GpDashboardApi {
    rows_per_page: usize,
}

impl Default for GpDashboardApi {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl GpDashboardApi {
    pub fn new(rows_per_page: usize) -> Self {
        Self { rows_per_page }
    }

    pub fn filter_choices(&self, records: &[GpRecord]) -> GpFilterChoices {
        GpFilterChoices {
            countries: distinct_values(records, GpTextField::Country),
            segments: distinct_values(records, GpTextField::Segment),
        }
    }

    pub fn apply_filter(&self, records: &[GpRecord], filter: &GpFilter) -> Vec<GpRecord> {
        filter_records(records, &filter.to_record_filter())
    }

    /// KPI（空集时 Top 国家/板块为 "N/A"）
    pub fn kpis(&self, records: &[GpRecord]) -> GpKpis {
        if records.is_empty() {
            return GpKpis::default();
        }

        let leader = |field: GpTextField| {
            top_n(&grouped_sum(records, field, GpNumericField::Gp), 1)
                .into_iter()
                .next()
                .map(|g| g.key)
                .unwrap_or_else(|| NA_SENTINEL.to_string())
        };

        GpKpis {
            total_gp: sum(records, GpNumericField::Gp),
            top_country: leader(GpTextField::Country),
            top_segment: leader(GpTextField::Segment),
        }
    }

    /// 国家 × 板块毛利透视
    pub fn country_segment(&self, records: &[GpRecord]) -> PivotTable {
        pivot(
            records,
            GpTextField::Country,
            GpTextField::Segment,
            GpNumericField::Gp,
        )
    }

    /// 国家毛利（按毛利降序）
    pub fn gp_by_country(&self, records: &[GpRecord]) -> Vec<CountryGp> {
        let mut countries: Vec<CountryGp> = grouped_sums(
            records,
            GpTextField::Country,
            &[
                GpNumericField::Gp,
                GpNumericField::ExportValue,
                GpNumericField::ImportValue,
            ],
        )
        .into_iter()
        .map(|g| CountryGp {
            gp: g.values[0],
            export_value: g.values[1],
            import_value: g.values[2],
            country: g.key,
        })
        .collect();

        sort_desc_by(&mut countries, |c| c.gp);
        countries
    }

    /// 板块毛利占比（仅正值，降序）
    pub fn segment_share(&self, records: &[GpRecord]) -> Vec<GroupTotal> {
        let mut segments: Vec<GroupTotal> =
            grouped_sum(records, GpTextField::Segment, GpNumericField::Gp)
                .into_iter()
                .filter(|g| g.total > 0.0)
                .collect();
        sort_desc_by(&mut segments, |g| g.total);
        segments
    }

    /// 计算完整看板视图
    pub fn build_view(&self, records: &[GpRecord], filter: &GpFilter, page: usize) -> GpDashboardView {
        let filtered = self.apply_filter(records, filter);

        GpDashboardView {
            filter: filter.clone(),
            choices: self.filter_choices(records),
            kpis: self.kpis(&filtered),
            country_segment: self.country_segment(&filtered),
            gp_by_country: self.gp_by_country(&filtered),
            segment_share: self.segment_share(&filtered),
            records: paginate(&filtered, page, self.rows_per_page),
        }
    }
}
