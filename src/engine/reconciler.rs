// ==========================================
// 公司方案目录 - 对账引擎
// ==========================================
// 职责: Problems 索引 + Companies 索引 + 关联行解析
// 流程: 建问题索引 → 建公司索引 → 逐行解析关联 → 去重挂载
// 红线: 任何行级不一致都不是错误，只计入 ReconcileReport
// ==========================================

use crate::domain::catalog::{CatalogDocument, Company, LinkRow, Problem};
use crate::domain::report::{LinkIssue, LinkIssueKind, ReconcileReport};
use crate::importer::csv_parser::{ParsedTable, RawRow};
use crate::importer::field_resolver::FieldResolver;
use crate::importer::key_normalizer::{keyify, norm};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// 公司身份：有 id 按 id，否则按名称
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CompanyIdentity {
    Id(String),
    Name(String),
}

/// 数据行在表格中的行号（表头为第 1 行）
fn sheet_row_number(idx: usize) -> usize {
    idx + 2
}

// ==========================================
// ProblemIndex - 问题索引
// ==========================================
// 键: keyify(problem)，后写覆盖先写
#[derive(Debug, Default)]
pub struct ProblemIndex {
    by_key: HashMap<String, Arc<Problem>>,
}

impl ProblemIndex {
    pub fn build(rows: &[RawRow], report: &mut ReconcileReport) -> Self {
        let resolver = FieldResolver;
        let mut by_key = HashMap::new();

        for row in rows {
            let Some(problem) = resolver.to_problem(row) else {
                report.skipped_problems += 1;
                continue;
            };

            let key = keyify(&problem.problem);
            if key.is_empty() {
                report.skipped_problems += 1;
                continue;
            }

            if by_key.insert(key, Arc::new(problem)).is_some() {
                report.duplicate_problems += 1;
            }
        }

        report.indexed_problems = by_key.len();
        Self { by_key }
    }

    pub fn get(&self, key: &str) -> Option<&Arc<Problem>> {
        self.by_key.get(key)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

// ==========================================
// CompanyIndex - 公司索引
// ==========================================
// 身份键: norm(id)，无 id 时退化为 norm(name)；两类键互不相交，先到先得
// 辅助索引: norm(id) / norm(name) → 位置，一次构建
#[derive(Debug, Default)]
pub struct CompanyIndex {
    companies: Vec<Company>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl CompanyIndex {
    pub fn build(rows: &[RawRow], report: &mut ReconcileReport) -> Self {
        let resolver = FieldResolver;
        let mut index = Self::default();
        let mut identities: HashSet<CompanyIdentity> = HashSet::new();

        for row in rows {
            let company = resolver.to_company(row);
            let id_key = norm(&company.id);
            let name_key = norm(&company.name);

            let identity = if !id_key.is_empty() {
                CompanyIdentity::Id(id_key.clone())
            } else if !name_key.is_empty() {
                CompanyIdentity::Name(name_key.clone())
            } else {
                report.skipped_companies += 1;
                continue;
            };

            if !identities.insert(identity.clone()) {
                report.duplicate_companies += 1;
                debug!(identity = ?identity, "重复公司行，保留首行");
                continue;
            }

            let position = index.companies.len();
            if !id_key.is_empty() {
                index.by_id.insert(id_key, position);
            }
            if !name_key.is_empty() {
                index.by_name.entry(name_key).or_insert(position);
            }
            index.companies.push(company);
        }

        report.indexed_companies = index.companies.len();
        index
    }

    /// 解析关联行中的公司引用
    ///
    /// # 顺序
    /// 1. id 引用 → id 索引
    /// 2. 名称引用 → 名称索引
    /// 3. 名称引用 → id 索引，id 引用 → 名称索引（列名写错时的兜底）
    pub fn resolve(&self, link: &LinkRow) -> Option<usize> {
        let id_ref = norm(&link.company_id);
        let name_ref = norm(&link.company_name);

        let lookup = |map: &HashMap<String, usize>, key: &str| {
            if key.is_empty() {
                None
            } else {
                map.get(key).copied()
            }
        };

        lookup(&self.by_id, &id_ref)
            .or_else(|| lookup(&self.by_name, &name_ref))
            .or_else(|| lookup(&self.by_id, &name_ref))
            .or_else(|| lookup(&self.by_name, &id_ref))
    }

    pub fn get(&self, position: usize) -> Option<&Company> {
        self.companies.get(position)
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    fn company_mut(&mut self, position: usize) -> Option<&mut Company> {
        self.companies.get_mut(position)
    }

    fn into_companies(self) -> Vec<Company> {
        self.companies
    }
}

// ==========================================
// Reconciler - 对账
// ==========================================
pub struct Reconciler;

impl Reconciler {
    /// 三表对账
    ///
    /// # 参数
    /// - companies / problems / links: 已通过表结构校验的三张表
    ///
    /// # 返回
    /// - CatalogDocument: 公司按 Companies 表首次出现顺序排列
    /// - ReconcileReport: 匹配/不匹配统计与逐行问题
    pub fn reconcile(
        &self,
        companies: &ParsedTable,
        problems: &ParsedTable,
        links: &ParsedTable,
    ) -> (CatalogDocument, ReconcileReport) {
        let mut report = ReconcileReport::default();

        let problem_index = ProblemIndex::build(&problems.rows, &mut report);
        let mut company_index = CompanyIndex::build(&companies.rows, &mut report);
        debug!(
            problems = problem_index.len(),
            companies = company_index.len(),
            "索引构建完成"
        );

        let resolver = FieldResolver;
        for (idx, row) in links.rows.iter().enumerate() {
            let link = resolver.to_link(row, sheet_row_number(idx));
            report.total_links += 1;
            Self::apply_link(&link, &problem_index, &mut company_index, &mut report);
        }

        let document = CatalogDocument {
            companies: company_index.into_companies(),
        };
        (document, report)
    }

    fn apply_link(
        link: &LinkRow,
        problem_index: &ProblemIndex,
        company_index: &mut CompanyIndex,
        report: &mut ReconcileReport,
    ) {
        let issue = |kind: LinkIssueKind, reference: &str| LinkIssue {
            row_number: link.row_number,
            kind,
            reference: reference.to_string(),
        };

        // 公司引用为空同样算未匹配公司
        if link.company_reference().is_empty() {
            report.unmatched_companies += 1;
            report.issues.push(issue(
                LinkIssueKind::MissingReference,
                link.problem.as_str(),
            ));
            debug!(row = link.row_number, "关联行缺少公司引用");
            return;
        }

        if link.problem.is_empty() {
            report.skipped_links += 1;
            report.issues.push(issue(
                LinkIssueKind::MissingReference,
                link.company_reference(),
            ));
            return;
        }

        let Some(position) = company_index.resolve(link) else {
            report.unmatched_companies += 1;
            report.issues.push(issue(
                LinkIssueKind::UnmatchedCompany,
                link.company_reference(),
            ));
            debug!(row = link.row_number, company = %link.company_reference(), "公司未匹配");
            return;
        };

        let key = keyify(&link.problem);
        let Some(problem) = problem_index.get(&key) else {
            report.unmatched_problems.insert(link.problem.clone());
            report
                .issues
                .push(issue(LinkIssueKind::UnmatchedProblem, &link.problem));
            debug!(row = link.row_number, problem = %link.problem, "问题未匹配");
            return;
        };

        let Some(company) = company_index.company_mut(position) else {
            return;
        };
        if company.attach(&key, Arc::clone(problem)) {
            report.matched_links += 1;
        } else {
            report.duplicate_links += 1;
            report
                .issues
                .push(issue(LinkIssueKind::DuplicateLink, &link.problem));
        }
    }
}
