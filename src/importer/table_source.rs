// ==========================================
// 公司方案目录 - 表数据源
// ==========================================
// 职责: 按表名获取 CSV 原文
// 实现: HttpTableSource（远程表格服务）/ DirTableSource（本地目录）/ MemoryTableSource（内存）
// ==========================================

use crate::config::{BuildConfig, SourceConfig};
use crate::importer::error::{ImportError, ImportResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

// 错误信息中保留的响应体长度
const BODY_SNIPPET_CHARS: usize = 200;

// ==========================================
// TableSource Trait
// ==========================================
#[async_trait]
pub trait TableSource: Send + Sync {
    /// 获取一张表的 CSV 原文
    ///
    /// # 返回
    /// - Ok(String): CSV 文本
    /// - Err(Fetch): 传输失败或非 2xx 响应
    async fn fetch_csv(&self, table: &str) -> ImportResult<String>;

    /// 数据源描述（用于日志）
    fn describe(&self) -> String;
}

/// 按配置创建数据源
pub fn from_config(config: &BuildConfig) -> ImportResult<Box<dyn TableSource>> {
    match &config.source {
        SourceConfig::Http {
            sheet_id,
            url_template,
            timeout,
        } => Ok(Box::new(HttpTableSource::new(
            sheet_id.clone(),
            url_template.clone(),
            *timeout,
        )?)),
        SourceConfig::Dir(dir) => Ok(Box::new(DirTableSource::new(dir.clone()))),
    }
}

// ==========================================
// HttpTableSource
// ==========================================
pub struct HttpTableSource {
    client: reqwest::Client,
    sheet_id: String,
    url_template: String,
}

impl HttpTableSource {
    pub fn new(sheet_id: String, url_template: String, timeout: Duration) -> ImportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(client_init_error)?;
        Ok(Self::with_client(client, sheet_id, url_template))
    }

    /// 使用外部构建的 HTTP 客户端
    pub fn with_client(client: reqwest::Client, sheet_id: String, url_template: String) -> Self {
        Self {
            client,
            sheet_id,
            url_template,
        }
    }

    /// 按模板生成表地址（表名 URL 编码）
    pub fn table_url(&self, table: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(table.as_bytes()).collect();
        self.url_template
            .replace("{sheet_id}", &self.sheet_id)
            .replace("{table}", &encoded)
    }
}

#[async_trait]
impl TableSource for HttpTableSource {
    async fn fetch_csv(&self, table: &str) -> ImportResult<String> {
        let url = self.table_url(table);
        debug!(table = %table, url = %url, "请求表数据");

        let fetch_error = |status: Option<u16>, message: String| ImportError::Fetch {
            table: table.to_string(),
            status,
            message,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| fetch_error(None, format!("请求失败: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(fetch_error(Some(status.as_u16()), snippet(&text)));
        }

        // 未公开的表格会以 200 返回登录页
        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("text/html"))
            .unwrap_or(false);
        if is_html {
            return Err(fetch_error(
                Some(status.as_u16()),
                "返回了 HTML 页面而不是 CSV（表格可能未公开共享）".to_string(),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| fetch_error(Some(status.as_u16()), format!("读取响应失败: {}", e)))
    }

    fn describe(&self) -> String {
        format!("http:{}", self.sheet_id)
    }
}

// 客户端初始化失败与具体表无关
fn client_init_error(err: reqwest::Error) -> ImportError {
    ImportError::Other(anyhow::Error::new(err).context("HTTP 客户端初始化失败"))
}

fn snippet(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= BODY_SNIPPET_CHARS {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(BODY_SNIPPET_CHARS).collect();
        format!("{}…", cut)
    }
}

// ==========================================
// DirTableSource
// ==========================================
// 读取 <dir>/<table>.csv
pub struct DirTableSource {
    dir: PathBuf,
}

impl DirTableSource {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", table))
    }
}

#[async_trait]
impl TableSource for DirTableSource {
    async fn fetch_csv(&self, table: &str) -> ImportResult<String> {
        let path = self.table_path(table);
        debug!(table = %table, path = %path.display(), "读取本地表文件");

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ImportError::Fetch {
                table: table.to_string(),
                status: None,
                message: format!("{}: {}", path.display(), e),
            })
    }

    fn describe(&self) -> String {
        format!("dir:{}", self.dir.display())
    }
}

// ==========================================
// MemoryTableSource
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct MemoryTableSource {
    tables: HashMap<String, String>,
}

impl MemoryTableSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: &str, csv: &str) -> Self {
        self.tables.insert(table.to_string(), csv.to_string());
        self
    }
}

#[async_trait]
impl TableSource for MemoryTableSource {
    async fn fetch_csv(&self, table: &str) -> ImportResult<String> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| ImportError::Fetch {
                table: table.to_string(),
                status: Some(404),
                message: "表不存在".to_string(),
            })
    }

    fn describe(&self) -> String {
        format!("memory:{} tables", self.tables.len())
    }
}
