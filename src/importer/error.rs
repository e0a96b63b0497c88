// ==========================================
// 公司方案目录 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 对账不一致不在此列，见 domain::report
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 配置错误 =====
    #[error("缺少必需的环境变量: {key}")]
    ConfigMissing { key: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValue {
        key: String,
        value: String,
        message: String,
    },

    // ===== 拉取错误 =====
    #[error("表 '{table}' 拉取失败{}: {message}", .status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    Fetch {
        table: String,
        status: Option<u16>,
        message: String,
    },

    #[error("表 '{0}' 解析后没有任何数据行（数据源可能返回了错误的工作表）")]
    EmptyTable(String),

    // ===== 表结构错误 =====
    #[error("表 '{table}' 缺少必需列: {}; 实际列: {}", .missing.join(", "), .found.join(", "))]
    SchemaMismatch {
        table: String,
        missing: Vec<String>,
        found: Vec<String>,
    },

    // ===== 解析错误 =====
    #[error("表 '{table}' CSV 解析失败: {message}")]
    CsvParse { table: String, message: String },

    // ===== 输出错误 =====
    #[error("文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 缺失列（仅 SchemaMismatch 有值）
    pub fn missing_columns(&self) -> &[String] {
        match self {
            ImportError::SchemaMismatch { missing, .. } => missing,
            _ => &[],
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
