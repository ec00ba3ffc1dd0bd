use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::config::config_keys;

static PERF_ENABLED: AtomicBool = AtomicBool::new(cfg!(debug_assertions));

thread_local! {
    static PERF_DEPTH: Cell<u32> = Cell::new(0);
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 按环境变量安装性能日志开关
///
/// 开关：
/// - Debug 默认开启；Release 默认关闭
/// - `LATAM_DASHBOARD_PERF=1` 强制开启，`=0` 强制关闭
pub fn install_from_env() {
    let enabled = match std::env::var(config_keys::PERF) {
        Ok(v) => is_true(&v),
        Err(_) => cfg!(debug_assertions),
    };
    set_enabled(enabled);
}

pub fn set_enabled(enabled: bool) {
    PERF_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    PERF_ENABLED.load(Ordering::Relaxed)
}

/// 性能统计 Guard：记录 elapsed_ms + 处理行数 + 嵌套深度
///
/// 使用方式：
/// ```ignore
/// let mut perf = latam_dashboard::perf::PerfGuard::new("fetch_orders");
/// perf.set_rows(rows.len());
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    rows: Option<usize>,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        PERF_DEPTH.with(|d| d.set(d.get().saturating_add(1)));
        Self {
            op,
            start: Instant::now(),
            rows: None,
        }
    }

    /// 记录本次操作处理的行数
    pub fn set_rows(&mut self, rows: usize) {
        self.rows = Some(rows);
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let depth = PERF_DEPTH.with(|d| {
            let current = d.get();
            d.set(current.saturating_sub(1));
            current
        });

        if !is_enabled() {
            return;
        }

        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            rows = self.rows,
            depth,
            "done"
        );
    }
}
