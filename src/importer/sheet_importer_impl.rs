// ==========================================
// Latam 看板系统 - 表格拉取器实现
// ==========================================
// 职责: 整合拉取流程，从远程表格到强类型记录集
// 流程: 构造地址 → 拉取文本 → 解析封包 → 归一化 → 身份过滤
// 红线: 解析/归一化错误原样向上传递，不包装不改名
// ==========================================

use crate::config::DashboardConfig;
use crate::config::SheetSelector;
use crate::domain::types::RecordKind;
use crate::domain::{GpRecord, Order};
use crate::importer::error::{FetchError, FetchResult};
use crate::importer::gviz_parser::GvizParser;
use crate::importer::record_normalizer::{normalize_batch, GpRecordNormalizer, OrderNormalizer};
use crate::importer::sheet_importer_trait::{PayloadParser, RowNormalizer, SheetRecord, SheetSource};
use crate::perf::PerfGuard;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

// ==========================================
// SheetImporter - 表格拉取器
// ==========================================
pub struct SheetImporter<S>
where
    S: SheetSource,
{
    // 远程表格源
    source: S,

    // 表格配置
    config: DashboardConfig,

    // 响应解析器
    parser: Box<dyn PayloadParser>,
}

impl<S> SheetImporter<S>
where
    S: SheetSource,
{
    /// 创建新的 SheetImporter 实例
    ///
    /// # 参数
    /// - source: 表格源（HTTP 或测试假源）
    /// - config: 表格配置
    pub fn new(source: S, config: DashboardConfig) -> Self {
        Self {
            source,
            config,
            parser: Box::new(GvizParser),
        }
    }

    /// 当前配置
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// 拉取预留单记录集
    ///
    /// # 返回
    /// - Ok(Vec<Order>): 保序的有效预留单（空表为空集合）
    /// - Err(FetchError): 网络错误或返回格式错误
    pub async fn fetch_orders(&self) -> FetchResult<Vec<Order>> {
        let mut perf = PerfGuard::new("fetch_orders");
        let records = self.fetch_records(&self.config.orders, &OrderNormalizer).await?;
        perf.set_rows(records.len());
        Ok(records)
    }

    /// 拉取国家毛利记录集
    pub async fn fetch_gp_records(&self) -> FetchResult<Vec<GpRecord>> {
        let mut perf = PerfGuard::new("fetch_gp_records");
        let records = self.fetch_records(&self.config.gp, &GpRecordNormalizer).await?;
        perf.set_rows(records.len());
        Ok(records)
    }

    /// 通用拉取流程
    #[instrument(skip(self, selector, normalizer), fields(sheet = %selector.sheet_name, batch_id = tracing::field::Empty))]
    async fn fetch_records<N>(
        &self,
        selector: &SheetSelector,
        normalizer: &N,
    ) -> FetchResult<Vec<N::Record>>
    where
        N: RowNormalizer,
    {
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        // === 步骤 1: 构造地址（带防缓存时间戳） ===
        let url = self
            .config
            .sheet_url(selector, Utc::now().timestamp_millis())
            .map_err(|e| FetchError::Format(format!("表格地址构造失败: {}", e)))?;
        info!(kind = %normalizer.kind(), range = %selector.range, "开始拉取表格数据");

        // === 步骤 2: 拉取文本 ===
        let raw_text = self.source.fetch_text(url.as_str()).await.map_err(|e| {
            error!(error = %e, "表格拉取失败");
            e
        })?;

        // === 步骤 3: 解析封包 ===
        debug!("步骤 3: 解析封包");
        let rows = self.parser.parse_to_raw_rows(&raw_text).map_err(|e| {
            error!(error = %e, "表格响应解析失败");
            e
        })?;

        // === 步骤 4: 归一化 + 身份过滤 ===
        debug!("步骤 4: 归一化");
        let batch = normalize_batch(normalizer, &rows);
        info!(
            total_rows = batch.total_rows,
            retained = batch.records.len(),
            dropped = batch.dropped_rows,
            identity_field = normalizer.kind().identity_field(),
            "表格数据归一化完成"
        );

        Ok(batch.records)
    }
}

// ==========================================
// SheetRecord 实现
// ==========================================

#[async_trait]
impl SheetRecord for Order {
    fn kind() -> RecordKind {
        RecordKind::Order
    }

    async fn fetch_from<S: SheetSource>(importer: &SheetImporter<S>) -> FetchResult<Vec<Self>> {
        importer.fetch_orders().await
    }
}

#[async_trait]
impl SheetRecord for GpRecord {
    fn kind() -> RecordKind {
        RecordKind::GpRecord
    }

    async fn fetch_from<S: SheetSource>(importer: &SheetImporter<S>) -> FetchResult<Vec<Self>> {
        importer.fetch_gp_records().await
    }
}
