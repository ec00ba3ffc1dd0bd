// ==========================================
// Latam 看板系统 - 应用状态
// ==========================================
// 职责: 持有每个看板视图的当前快照、错误与提示，并负责刷新
// 红线: 拉取成功才整体替换快照；失败保留上一份快照
// 并发: 后完成的拉取覆盖先完成的（last completed fetch wins）
// ==========================================

use crate::api::error::{ApiError, ApiResult, ViewError};
use crate::api::gp_dashboard_api::{GpDashboardApi, GpDashboardView};
use crate::api::reserve_dashboard_api::{ReserveDashboardApi, ReserveDashboardView};
use crate::config::DashboardConfig;
use crate::domain::{GpRecord, Order};
use crate::engine::{GpFilter, OrderFilter};
use crate::importer::{SheetImporter, SheetRecord, SheetSource};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// 首次加载为空时的提示
pub const NO_DATA_NOTICE: &str = "未找到数据：表格可能为空，或尚未公开共享";

// ==========================================
// Snapshot - 一次成功拉取的记录集
// ==========================================
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<T> {
    pub records: Vec<T>,
    pub fetched_at: DateTime<Utc>,
    pub batch_id: String,
}

// ==========================================
// ViewState - 单个视图的状态
// ==========================================
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    pub snapshot: Option<Arc<Snapshot<T>>>,
    pub last_error: Option<ViewError>,
    pub notice: Option<String>,
    pub in_flight: usize, // 进行中的拉取数
    pub initial_load_done: bool,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            snapshot: None,
            last_error: None,
            notice: None,
            in_flight: 0,
            initial_load_done: false,
        }
    }
}

impl<T> ViewState<T> {
    pub fn is_refreshing(&self) -> bool {
        self.in_flight > 0
    }

    /// 当前记录（尚无快照时为空）
    pub fn records(&self) -> &[T] {
        self.snapshot
            .as_ref()
            .map(|s| s.records.as_slice())
            .unwrap_or_default()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.snapshot.as_ref().map(|s| s.fetched_at)
    }
}

// ==========================================
// DashboardController - 单视图控制器
// ==========================================
pub struct DashboardController<S, T>
where
    S: SheetSource,
    T: SheetRecord,
{
    importer: Arc<SheetImporter<S>>,
    state: Mutex<ViewState<T>>,
}

impl<S, T> DashboardController<S, T>
where
    S: SheetSource,
    T: SheetRecord,
{
    pub fn new(importer: Arc<SheetImporter<S>>) -> Self {
        Self {
            importer,
            state: Mutex::new(ViewState::default()),
        }
    }

    // 状态只做整体替换，锁中毒时沿用内部数据
    fn lock_state(&self) -> MutexGuard<'_, ViewState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 当前状态副本（快照以 Arc 共享）
    pub fn state(&self) -> ViewState<T> {
        self.lock_state().clone()
    }

    pub fn snapshot(&self) -> Option<Arc<Snapshot<T>>> {
        self.lock_state().snapshot.clone()
    }

    /// 拉取并替换快照
    ///
    /// # 返回
    /// - Ok(usize): 新快照记录数
    /// - Err(ApiError): 拉取失败（旧快照保留，错误写入状态）
    #[instrument(skip(self), fields(kind = %T::kind()))]
    pub async fn refresh(&self) -> ApiResult<usize> {
        self.lock_state().in_flight += 1;

        let result = T::fetch_from(&*self.importer).await;

        let mut state = self.lock_state();
        state.in_flight = state.in_flight.saturating_sub(1);
        let first_load = !state.initial_load_done;
        state.initial_load_done = true;

        match result {
            Ok(records) => {
                let count = records.len();
                let snapshot = Snapshot {
                    records,
                    fetched_at: Utc::now(),
                    batch_id: Uuid::new_v4().to_string(),
                };
                info!(count, batch_id = %snapshot.batch_id, first_load, "快照已替换");

                state.snapshot = Some(Arc::new(snapshot));
                state.last_error = None;
                state.notice = (count == 0 && first_load).then(|| NO_DATA_NOTICE.to_string());
                Ok(count)
            }
            Err(err) => {
                let err = ApiError::from(err);
                warn!(error = %err, kept_records = state.records().len(), "刷新失败，保留上一份快照");
                state.last_error = Some(ViewError::from(&err));
                Err(err)
            }
        }
    }
}

// ==========================================
// AppState - 两个看板的组合状态
// ==========================================
pub struct AppState<S>
where
    S: SheetSource,
{
    pub config: DashboardConfig,
    pub orders: DashboardController<S, Order>,
    pub gp_records: DashboardController<S, GpRecord>,
    pub reserve_api: ReserveDashboardApi,
    pub gp_api: GpDashboardApi,
}

impl<S> AppState<S>
where
    S: SheetSource,
{
    /// 创建应用状态（两个视图共享同一个拉取器）
    pub fn new(source: S, config: DashboardConfig) -> Self {
        let importer = Arc::new(SheetImporter::new(source, config.clone()));
        Self {
            config,
            orders: DashboardController::new(Arc::clone(&importer)),
            gp_records: DashboardController::new(importer),
            reserve_api: ReserveDashboardApi::default(),
            gp_api: GpDashboardApi::default(),
        }
    }

    /// 并发刷新两个视图
    pub async fn refresh_all(&self) -> (ApiResult<usize>, ApiResult<usize>) {
        futures::join!(self.orders.refresh(), self.gp_records.refresh())
    }

    /// 预留单看板视图
    pub fn reserve_view(&self, filter: &OrderFilter, page: usize) -> ReserveDashboardView {
        let state = self.orders.state();
        self.reserve_api.build_view(state.records(), filter, page)
    }

    /// 国家毛利看板视图
    pub fn gp_view(&self, filter: &GpFilter, page: usize) -> GpDashboardView {
        let state = self.gp_records.state();
        self.gp_api.build_view(state.records(), filter, page)
    }
}
