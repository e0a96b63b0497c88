// ==========================================
// 公司方案目录 - 领域模型层
// ==========================================
// 职责: 定义目录实体与对账报告
// 红线: 不含拉取逻辑,不含对账逻辑
// ==========================================

pub mod catalog;
pub mod report;

// 重导出核心类型
pub use catalog::{CatalogDocument, Company, LinkRow, Problem};
pub use report::{BuildSummary, LinkIssue, LinkIssueKind, ReconcileReport};
