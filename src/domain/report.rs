// ==========================================
// 公司方案目录 - 对账报告模型
// ==========================================
// 职责: 对账统计、逐行问题记录、运行汇总
// 说明: 对账不一致不是错误，只进入报告
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// LinkIssueKind - 关联行问题类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkIssueKind {
    UnmatchedCompany, // 公司无法解析
    UnmatchedProblem, // 问题无法解析
    MissingReference, // 公司或问题引用为空
    DuplicateLink,    // 同一公司重复挂载同一问题
}

// ==========================================
// LinkIssue - 关联行问题记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkIssue {
    pub row_number: usize,    // 表格行号（表头为第 1 行）
    pub kind: LinkIssueKind,  // 问题类型
    pub reference: String,    // 原始引用文本
}

// ==========================================
// ReconcileReport - 对账报告
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileReport {
    // Problems 表
    pub indexed_problems: usize,
    pub duplicate_problems: usize, // 同键覆盖（后写覆盖先写）
    pub skipped_problems: usize,   // 问题文本为空

    // Companies 表
    pub indexed_companies: usize,
    pub duplicate_companies: usize, // 同键重复（先到先得）
    pub skipped_companies: usize,   // id 与名称均为空

    // Company Solutions 表
    pub total_links: usize,
    pub matched_links: usize,
    pub duplicate_links: usize,
    pub skipped_links: usize,
    pub unmatched_companies: usize,
    pub unmatched_problems: BTreeSet<String>,

    pub issues: Vec<LinkIssue>,
}

impl ReconcileReport {
    /// 是否存在需要提示的不一致
    pub fn has_warnings(&self) -> bool {
        self.unmatched_companies > 0
            || !self.unmatched_problems.is_empty()
            || self.skipped_links > 0
            || self.skipped_companies > 0
    }

    pub fn issues_of(&self, kind: LinkIssueKind) -> impl Iterator<Item = &LinkIssue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }
}

// ==========================================
// BuildSummary - 单次运行汇总
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSummary {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub companies_written: usize,
    pub report: ReconcileReport,
}

impl BuildSummary {
    /// 单行汇总（成功时输出到 stdout）
    pub fn one_line(&self) -> String {
        format!(
            "写入 {} 家公司; 匹配关联 {} 条; 未匹配公司 {} 条; 未匹配问题 {} 个",
            self.companies_written,
            self.report.matched_links,
            self.report.unmatched_companies,
            self.report.unmatched_problems.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report_has_no_warnings() {
        let report = ReconcileReport::default();
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_issues_of_filters_by_kind() {
        let mut report = ReconcileReport::default();
        report.issues.push(LinkIssue {
            row_number: 2,
            kind: LinkIssueKind::UnmatchedCompany,
            reference: "c9".to_string(),
        });
        report.issues.push(LinkIssue {
            row_number: 3,
            kind: LinkIssueKind::UnmatchedProblem,
            reference: "Unknown".to_string(),
        });

        let companies: Vec<_> = report.issues_of(LinkIssueKind::UnmatchedCompany).collect();
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].row_number, 2);
    }

    #[test]
    fn test_one_line_summary() {
        let mut report = ReconcileReport::default();
        report.matched_links = 5;
        report.unmatched_companies = 1;
        report.unmatched_problems.insert("x".to_string());

        let summary = BuildSummary {
            run_id: "run".to_string(),
            generated_at: Utc::now(),
            companies_written: 3,
            report,
        };

        assert_eq!(
            summary.one_line(),
            "写入 3 家公司; 匹配关联 5 条; 未匹配公司 1 条; 未匹配问题 1 个"
        );
    }
}
