// ==========================================
// 公司方案目录 - 输出器
// ==========================================
// 职责: 目录 / 对账报告序列化为 JSON（2 空格缩进）并整体覆写文件
// 写法: 同目录临时文件 + rename，失败时不留下半截文件
// ==========================================

use crate::domain::catalog::CatalogDocument;
use crate::domain::report::BuildSummary;
use crate::importer::error::ImportResult;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// 目录渲染为 JSON 文本
pub fn render_document(document: &CatalogDocument) -> ImportResult<String> {
    render(document)
}

/// 写出目录文件（整体覆写）
pub fn write_document(document: &CatalogDocument, path: &Path) -> ImportResult<()> {
    write_atomic(path, &render_document(document)?)
}

/// 写出对账报告文件
pub fn write_report(summary: &BuildSummary, path: &Path) -> ImportResult<()> {
    write_atomic(path, &render(summary)?)
}

fn render<T: Serialize>(value: &T) -> ImportResult<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

fn write_atomic(path: &Path, contents: &str) -> ImportResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
