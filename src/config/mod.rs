// ==========================================
// 公司方案目录 - 配置层
// ==========================================
// 职责: 运行配置加载（环境变量 / .env）
// ==========================================

pub mod build_config;

// 重导出核心配置
pub use build_config::{config_keys, BuildConfig, SourceConfig, TableNames};
