// ==========================================
// 公司方案目录 - 核心库
// ==========================================
// 职责: 拉取 Companies / Problems / Company Solutions 三张表,
//       对账后输出去规范化的公司方案目录 JSON
// 系统定位: 单次运行的批处理工具
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与报告
pub mod domain;

// 导入层 - 外部表数据
pub mod importer;

// 引擎层 - 对账
pub mod engine;

// 配置层 - 运行配置
pub mod config;

// 输出层 - JSON 文件
pub mod emitter;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::BuildConfig;
pub use domain::{
    BuildSummary, CatalogDocument, Company, LinkIssue, LinkIssueKind, LinkRow, Problem,
    ReconcileReport,
};
pub use engine::Reconciler;
pub use importer::{CatalogBuild, CatalogImporter, ImportError, ImportResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "公司方案目录构建工具";
