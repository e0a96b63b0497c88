// ==========================================
// 公司方案目录 - 引擎层
// ==========================================
// 职责: 三表对账（纯内存、单次运行）
// ==========================================

pub mod reconciler;

// 重导出核心引擎
pub use reconciler::{CompanyIndex, ProblemIndex, Reconciler};
