// ==========================================
// 公司方案目录 - 构建配置
// ==========================================
// 职责: 从环境变量加载运行配置（支持 .env，见 main）
// 红线: 缺少必需配置时在任何网络请求之前失败
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use std::path::PathBuf;
use std::time::Duration;

/// 默认拉取地址模板（Google Sheets gviz CSV 导出）
pub const DEFAULT_URL_TEMPLATE: &str =
    "https://docs.google.com/spreadsheets/d/{sheet_id}/gviz/tq?tqx=out:csv&sheet={table}";

pub const DEFAULT_OUTPUT_PATH: &str = "data/companies.json";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    pub const SHEET_ID: &str = "SHEET_ID";
    pub const OUTPUT_PATH: &str = "CATALOG_OUTPUT_PATH";
    pub const REPORT_PATH: &str = "CATALOG_REPORT_PATH";
    pub const URL_TEMPLATE: &str = "CATALOG_URL_TEMPLATE";
    pub const FETCH_TIMEOUT_SECS: &str = "CATALOG_FETCH_TIMEOUT_SECS";
    pub const STRICT: &str = "CATALOG_STRICT";
    pub const COMPANIES_TABLE: &str = "CATALOG_COMPANIES_TABLE";
    pub const PROBLEMS_TABLE: &str = "CATALOG_PROBLEMS_TABLE";
    pub const LINKS_TABLE: &str = "CATALOG_LINKS_TABLE";
    pub const SOURCE_DIR: &str = "CATALOG_SOURCE_DIR";
}

// ==========================================
// SourceConfig - 数据源
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// 远程表格服务
    Http {
        sheet_id: String,
        url_template: String,
        timeout: Duration,
    },
    /// 本地目录（<dir>/<table>.csv），用于离线复现
    Dir(PathBuf),
}

// ==========================================
// TableNames - 三张表的名称
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub companies: String,
    pub problems: String,
    pub links: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            companies: "Companies".to_string(),
            problems: "Problems".to_string(),
            links: "Company Solutions".to_string(),
        }
    }
}

// ==========================================
// BuildConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub source: SourceConfig,
    pub tables: TableNames,
    pub output_path: PathBuf,
    pub report_path: Option<PathBuf>,
    /// 严格模式: 空表即失败，Companies 必须有 id 列
    pub strict: bool,
}

impl BuildConfig {
    /// 从进程环境变量加载
    pub fn from_env() -> ImportResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载（测试用）
    pub fn from_lookup<F>(lookup: F) -> ImportResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 空白值视为未设置
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let source = match get(config_keys::SOURCE_DIR) {
            Some(dir) => SourceConfig::Dir(PathBuf::from(dir)),
            None => {
                let sheet_id =
                    get(config_keys::SHEET_ID).ok_or_else(|| ImportError::ConfigMissing {
                        key: config_keys::SHEET_ID.to_string(),
                    })?;

                let url_template = get(config_keys::URL_TEMPLATE)
                    .unwrap_or_else(|| DEFAULT_URL_TEMPLATE.to_string());
                if !url_template.contains("{table}") {
                    return Err(ImportError::ConfigValue {
                        key: config_keys::URL_TEMPLATE.to_string(),
                        value: url_template,
                        message: "模板必须包含 {table} 占位符".to_string(),
                    });
                }

                let timeout_secs = match get(config_keys::FETCH_TIMEOUT_SECS) {
                    Some(raw) => parse_timeout(&raw)?,
                    None => DEFAULT_FETCH_TIMEOUT_SECS,
                };

                SourceConfig::Http {
                    sheet_id,
                    url_template,
                    timeout: Duration::from_secs(timeout_secs),
                }
            }
        };

        let defaults = TableNames::default();
        let tables = TableNames {
            companies: get(config_keys::COMPANIES_TABLE).unwrap_or(defaults.companies),
            problems: get(config_keys::PROBLEMS_TABLE).unwrap_or(defaults.problems),
            links: get(config_keys::LINKS_TABLE).unwrap_or(defaults.links),
        };

        let strict = match get(config_keys::STRICT) {
            Some(raw) => parse_bool(config_keys::STRICT, &raw)?,
            None => true,
        };

        Ok(Self {
            source,
            tables,
            output_path: PathBuf::from(
                get(config_keys::OUTPUT_PATH).unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string()),
            ),
            report_path: get(config_keys::REPORT_PATH).map(PathBuf::from),
            strict,
        })
    }
}

fn parse_timeout(raw: &str) -> ImportResult<u64> {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ImportError::ConfigValue {
            key: config_keys::FETCH_TIMEOUT_SECS.to_string(),
            value: raw.to_string(),
            message: "必须是正整数（秒）".to_string(),
        }),
    }
}

fn parse_bool(key: &str, raw: &str) -> ImportResult<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ImportError::ConfigValue {
            key: key.to_string(),
            value: raw.to_string(),
            message: "期望 true/false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> ImportResult<BuildConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BuildConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_missing_sheet_id() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ImportError::ConfigMissing { ref key } if key == "SHEET_ID"));

        // 空白值同样视为缺失
        let err = load(&[("SHEET_ID", "   ")]).unwrap_err();
        assert!(matches!(err, ImportError::ConfigMissing { .. }));
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("SHEET_ID", "abc")]).unwrap();

        assert_eq!(
            config.source,
            SourceConfig::Http {
                sheet_id: "abc".to_string(),
                url_template: DEFAULT_URL_TEMPLATE.to_string(),
                timeout: Duration::from_secs(30),
            }
        );
        assert_eq!(config.tables, TableNames::default());
        assert_eq!(config.output_path, PathBuf::from("data/companies.json"));
        assert_eq!(config.report_path, None);
        assert!(config.strict);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SHEET_ID", "abc"),
            ("CATALOG_STRICT", "false"),
            ("CATALOG_FETCH_TIMEOUT_SECS", "5"),
            ("CATALOG_LINKS_TABLE", "Links"),
            ("CATALOG_OUTPUT_PATH", "out/catalog.json"),
            ("CATALOG_REPORT_PATH", "out/report.json"),
        ])
        .unwrap();

        assert!(!config.strict);
        assert_eq!(config.tables.links, "Links");
        assert_eq!(config.output_path, PathBuf::from("out/catalog.json"));
        assert_eq!(config.report_path, Some(PathBuf::from("out/report.json")));
        match config.source {
            SourceConfig::Http { timeout, .. } => assert_eq!(timeout, Duration::from_secs(5)),
            other => panic!("期望 Http 数据源，实际: {:?}", other),
        }
    }

    #[test]
    fn test_source_dir_does_not_need_sheet_id() {
        let config = load(&[("CATALOG_SOURCE_DIR", "fixtures/sheets")]).unwrap();
        assert_eq!(config.source, SourceConfig::Dir(PathBuf::from("fixtures/sheets")));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("SHEET_ID", "abc"), ("CATALOG_STRICT", "maybe")]),
            Err(ImportError::ConfigValue { .. })
        ));
        assert!(matches!(
            load(&[("SHEET_ID", "abc"), ("CATALOG_FETCH_TIMEOUT_SECS", "0")]),
            Err(ImportError::ConfigValue { .. })
        ));
        assert!(matches!(
            load(&[("SHEET_ID", "abc"), ("CATALOG_URL_TEMPLATE", "https://x/{sheet_id}")]),
            Err(ImportError::ConfigValue { .. })
        ));
    }
}
