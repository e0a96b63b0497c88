// ==========================================
// 公司方案目录 - 目录导入器
// ==========================================
// 职责: 整合构建流程，从数据源到输出文件
// 流程: 并发拉取 → 解析 → 空表检查 → 表结构校验 → 对账 → 输出
// 红线: 任一表失败则整次运行失败，不写出部分文件
// ==========================================

use crate::config::{BuildConfig, TableNames};
use crate::domain::catalog::CatalogDocument;
use crate::domain::report::{BuildSummary, ReconcileReport};
use crate::emitter;
use crate::engine::Reconciler;
use crate::importer::columns::{self, RequiredColumn};
use crate::importer::csv_parser::{CsvParser, ParsedTable};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::schema_validator::SchemaValidator;
use crate::importer::table_source::{self, TableSource};
use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// 警告中最多列出的未匹配问题数
const MAX_LISTED_PROBLEMS: usize = 20;

// ==========================================
// CatalogBuild - 单次构建结果
// ==========================================
#[derive(Debug, Clone)]
pub struct CatalogBuild {
    pub document: CatalogDocument,
    pub summary: BuildSummary,
}

// ==========================================
// CatalogImporter
// ==========================================
pub struct CatalogImporter {
    source: Box<dyn TableSource>,
    tables: TableNames,
    strict: bool,
    parser: CsvParser,
    validator: SchemaValidator,
}

impl CatalogImporter {
    /// 创建导入器
    ///
    /// # 参数
    /// - source: 表数据源
    /// - tables: 三张表的名称
    /// - strict: 严格模式（空表失败 + Companies 必须有 id 列）
    pub fn new(source: Box<dyn TableSource>, tables: TableNames, strict: bool) -> Self {
        Self {
            source,
            tables,
            strict,
            parser: CsvParser,
            validator: SchemaValidator,
        }
    }

    pub fn from_config(config: &BuildConfig) -> ImportResult<Self> {
        Ok(Self::new(
            table_source::from_config(config)?,
            config.tables.clone(),
            config.strict,
        ))
    }

    /// 构建目录（不落盘）
    #[instrument(skip(self), fields(run_id = tracing::field::Empty))]
    pub async fn build(&self) -> ImportResult<CatalogBuild> {
        let start_time = Instant::now();
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());

        info!(
            source = %self.source.describe(),
            strict = self.strict,
            "开始构建公司方案目录"
        );

        // === 步骤 1: 并发拉取 + 解析 + 校验 ===
        let (companies, problems, links) = futures::try_join!(
            self.load_table(&self.tables.companies, columns::companies_required(self.strict)),
            self.load_table(&self.tables.problems, columns::problems_required()),
            self.load_table(&self.tables.links, columns::links_required()),
        )?;

        // === 步骤 2: 对账 ===
        debug!("步骤 2: 对账");
        let (document, report) = Reconciler.reconcile(&companies, &problems, &links);
        Self::log_warnings(&report);

        info!(
            companies = document.companies.len(),
            problems = report.indexed_problems,
            matched = report.matched_links,
            unmatched_companies = report.unmatched_companies,
            unmatched_problems = report.unmatched_problems.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "公司方案目录构建完成"
        );

        let summary = BuildSummary {
            run_id,
            generated_at: Utc::now(),
            companies_written: document.companies.len(),
            report,
        };

        Ok(CatalogBuild { document, summary })
    }

    /// 构建并写出目录（及可选的对账报告）
    pub async fn build_to_file(
        &self,
        output_path: &Path,
        report_path: Option<&Path>,
    ) -> ImportResult<BuildSummary> {
        let build = self.build().await?;

        emitter::write_document(&build.document, output_path)?;
        info!(path = %output_path.display(), "目录已写出");

        if let Some(path) = report_path {
            emitter::write_report(&build.summary, path)?;
            info!(path = %path.display(), "对账报告已写出");
        }

        Ok(build.summary)
    }

    /// 拉取单表并立即校验
    async fn load_table(
        &self,
        table: &str,
        required: Vec<RequiredColumn>,
    ) -> ImportResult<ParsedTable> {
        let text = self.source.fetch_csv(table).await?;
        let parsed = self.parser.parse_str(table, &text)?;
        debug!(table = %table, rows = parsed.len(), "表解析完成");

        if parsed.is_empty() {
            if self.strict {
                return Err(ImportError::EmptyTable(table.to_string()));
            }
            warn!(table = %table, "表没有数据行，按空表继续");
            if parsed.headers.is_empty() {
                return Ok(parsed);
            }
        }

        self.validator.validate_table(&parsed, &required)?;
        info!(table = %table, rows = parsed.len(), "表已加载");
        Ok(parsed)
    }

    fn log_warnings(report: &ReconcileReport) {
        if report.skipped_companies > 0 {
            warn!(count = report.skipped_companies, "公司行缺少 id 与名称，已跳过");
        }
        if report.duplicate_companies > 0 {
            warn!(count = report.duplicate_companies, "重复公司行，已保留首行");
        }
        if report.duplicate_problems > 0 {
            warn!(count = report.duplicate_problems, "重复问题行，后行覆盖前行");
        }
        if report.skipped_links > 0 {
            warn!(count = report.skipped_links, "关联行缺少问题引用，已跳过");
        }
        if report.unmatched_companies > 0 {
            warn!(count = report.unmatched_companies, "关联行中的公司未匹配");
        }
        if !report.unmatched_problems.is_empty() {
            warn!(count = report.unmatched_problems.len(), "关联行中的问题未匹配");
            for problem in report.unmatched_problems.iter().take(MAX_LISTED_PROBLEMS) {
                warn!(problem = %problem, "未匹配问题");
            }
        }
    }
}
