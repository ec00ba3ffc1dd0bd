// ==========================================
// Latam 看板系统 - 聚合引擎层
// ==========================================
// 职责: 过滤、去重、分组求和、TopN、标量汇总、月度分桶、透视
// 红线: 纯函数，确定性输出，不做 I/O，不报错
// ==========================================

pub mod aggregation;
pub mod filter;
pub mod pivot;
pub mod time_bucket;

// 重导出核心函数与结果类型
pub use aggregation::{
    distinct_values, grouped_sum, grouped_sums, sort_desc_by, sum, summarize, top_n, GroupTotal,
    GroupTotals, ScalarSummary,
};
pub use filter::{filter_records, GpFilter, OrderFilter, RecordFilter};
pub use pivot::{pivot, PivotRow, PivotTable};
pub use time_bucket::{
    bucket_label, bucket_sort_key, compare_labels, sort_bucket_labels, time_bucketed_series,
    BucketTotal,
};
