// ==========================================
// Latam 看板系统 - 定时刷新任务
// ==========================================
// 职责: 按固定间隔触发刷新（首次立即触发），可取消
// 取消: RefreshHandle::cancel() 或丢弃句柄；进行中的拉取不中断
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::app::state::{AppState, DashboardController};
use crate::importer::{SheetRecord, SheetSource};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

// ==========================================
// Refreshable Trait
// ==========================================
// 实现者: DashboardController, AppState
#[async_trait]
pub trait Refreshable: Send + Sync + 'static {
    /// 执行一次刷新（错误由实现者记录到自身状态）
    async fn refresh_once(&self);
}

#[async_trait]
impl<S, T> Refreshable for DashboardController<S, T>
where
    S: SheetSource + 'static,
    T: SheetRecord,
{
    async fn refresh_once(&self) {
        let _ = self.refresh().await;
    }
}

#[async_trait]
impl<S> Refreshable for AppState<S>
where
    S: SheetSource + 'static,
{
    async fn refresh_once(&self) {
        let _ = self.refresh_all().await;
    }
}

// ==========================================
// RefreshHandle
// ==========================================
pub struct RefreshHandle {
    cancel_tx: watch::Sender<bool>,
    task: Option<JoinHandle<u64>>,
}

impl RefreshHandle {
    /// 请求停止（当前刷新完成后退出）
    pub fn cancel(&self) {
        let _ = self.cancel_tx.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |t| t.is_finished())
    }

    /// 等待任务退出，返回已执行的刷新次数
    ///
    /// 未调用 cancel() 时会一直等待
    pub async fn join(mut self) -> ApiResult<u64> {
        match self.task.take() {
            Some(task) => task
                .await
                .map_err(|e| ApiError::InternalError(format!("刷新任务异常退出: {}", e))),
            None => Ok(0),
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        let _ = self.cancel_tx.send(true);
    }
}

/// 启动定时刷新任务
///
/// 需在 tokio 运行时内调用；间隔为 0 返回 InvalidInput
pub fn spawn_periodic_refresh<R>(target: Arc<R>, interval: Duration) -> ApiResult<RefreshHandle>
where
    R: Refreshable,
{
    if interval.is_zero() {
        return Err(ApiError::InvalidInput("刷新间隔必须大于 0".to_string()));
    }

    let (cancel_tx, mut cancel_rx) = watch::channel(false);
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ticks: u64 = 0;

        info!(interval_ms = interval.as_millis() as u64, "定时刷新任务启动");
        loop {
            tokio::select! {
                biased;
                changed = cancel_rx.changed() => {
                    if changed.is_err() || *cancel_rx.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    ticks += 1;
                    debug!(tick = ticks, "触发刷新");
                    target.refresh_once().await;
                }
            }
        }
        info!(ticks, "定时刷新任务停止");
        ticks
    });

    Ok(RefreshHandle {
        cancel_tx,
        task: Some(task),
    })
}
