// ==========================================
// Latam 看板系统 - 命令行入口
// ==========================================
// 用法: latam-dashboard [--watch] [--json-logs] [--page N]
//                       [--from YYYY-MM-DD] [--to YYYY-MM-DD]
//                       [--party NAME] [--order-no NO]
//                       [--country NAME] [--segment NAME]
// 输出: 两个看板视图的 JSON
// ==========================================

use anyhow::{bail, Context};
use chrono::NaiveDate;
use latam_dashboard::app::{spawn_periodic_refresh, AppState};
use latam_dashboard::engine::{GpFilter, OrderFilter};
use latam_dashboard::importer::{HttpSheetSource, SheetSource};
use latam_dashboard::logging::{self, LogFormat};
use latam_dashboard::{perf, ConfigManager};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Default)]
struct CliArgs {
    watch: bool,
    json_logs: bool,
    page: usize,
    order_filter: OrderFilter,
    gp_filter: GpFilter,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut cli = CliArgs {
        page: 1,
        ..Default::default()
    };
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .with_context(|| format!("参数 {} 缺少取值", name))
        };
        match arg.as_str() {
            "--watch" => cli.watch = true,
            "--json-logs" => cli.json_logs = true,
            "--page" => cli.page = value("--page")?.parse().context("--page 必须是正整数")?,
            "--from" => cli.order_filter.start_date = Some(parse_date(&value("--from")?)?),
            "--to" => cli.order_filter.end_date = Some(parse_date(&value("--to")?)?),
            "--party" => cli.order_filter.party_name = value("--party")?,
            "--order-no" => cli.order_filter.order_no = value("--order-no")?,
            "--country" => cli.gp_filter.country = value("--country")?,
            "--segment" => cli.gp_filter.segment = value("--segment")?,
            other => bail!("未知参数: {}", other),
        }
    }
    Ok(cli)
}

fn parse_date(text: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("日期格式应为 YYYY-MM-DD: {}", text))
}

fn print_views<S: SheetSource>(state: &AppState<S>, cli: &CliArgs) -> anyhow::Result<()> {
    let orders = state.orders.state();
    let gp = state.gp_records.state();

    let output = json!({
        "reserve": {
            "lastUpdated": orders.last_updated(),
            "error": orders.last_error,
            "notice": orders.notice,
            "view": state.reserve_view(&cli.order_filter, cli.page),
        },
        "gp": {
            "lastUpdated": gp.last_updated(),
            "error": gp.last_error,
            "notice": gp.notice,
            "view": state.gp_view(&cli.gp_filter, cli.page),
        },
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = parse_args()?;

    logging::init_with_format(if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    });
    perf::install_from_env();

    tracing::info!("==================================================");
    tracing::info!("{}", latam_dashboard::APP_NAME);
    tracing::info!("系统版本: {}", latam_dashboard::VERSION);
    tracing::info!("==================================================");

    let config = ConfigManager::from_env()
        .load()
        .context("配置加载失败")?;
    tracing::info!(sheet_id = %config.sheet_id, refresh_secs = config.refresh_interval_secs, "配置加载完成");

    let source = HttpSheetSource::new(config.request_timeout()).context("HTTP 客户端初始化失败")?;
    let interval = config.refresh_interval();
    let state = Arc::new(AppState::new(source, config));

    if !cli.watch {
        let (orders, gp) = state.refresh_all().await;
        for (name, result) in [("orders", orders), ("gp", gp)] {
            if let Err(err) = result {
                tracing::error!(view = name, error = %err, guidance = err.guidance(), "视图加载失败");
            }
        }
        return print_views(&state, &cli);
    }

    let handle = spawn_periodic_refresh(Arc::clone(&state), interval)?;
    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("收到 Ctrl-C，停止刷新");
                break;
            }
            _ = ticker.tick() => {
                // 首次加载完成前不输出
                if state.orders.state().initial_load_done || state.gp_records.state().initial_load_done {
                    print_views(&state, &cli)?;
                }
            }
        }
    }

    handle.cancel();
    let ticks = handle.join().await?;
    tracing::info!(ticks, "已退出");
    Ok(())
}
