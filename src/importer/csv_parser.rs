// ==========================================
// 公司方案目录 - CSV 解析器
// ==========================================
// 职责: CSV 文本 → 行记录（HashMap<列名, 值>）
// 规则: 首行为表头; 空表头列丢弃; 全空白行丢弃
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Read;

/// 原始行记录（列名 → 去空白后的单元格值）
pub type RawRow = HashMap<String, String>;

// ==========================================
// ParsedTable - 解析后的表
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ParsedTable {
    pub name: String,
    pub headers: Vec<String>, // 非空表头（按原始顺序）
    pub rows: Vec<RawRow>,
}

impl ParsedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// CsvParser
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 解析 CSV 文本
    ///
    /// # 参数
    /// - table: 表名（用于错误信息）
    /// - text: CSV 原文
    ///
    /// # 返回
    /// - Ok(ParsedTable): 空输入返回 0 行，不报错
    /// - Err: 编码错误等
    pub fn parse_str(&self, table: &str, text: &str) -> ImportResult<ParsedTable> {
        self.parse_reader(table, text.as_bytes())
    }

    pub fn parse_reader<R: Read>(&self, table: &str, source: R) -> ImportResult<ParsedTable> {
        let csv_error = |e: csv::Error| ImportError::CsvParse {
            table: table.to_string(),
            message: e.to_string(),
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(source);

        // 读取表头
        let columns: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        // 读取所有行
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(csv_error)?;
            let mut row = RawRow::new();

            for (col_idx, value) in record.iter().enumerate() {
                match columns.get(col_idx) {
                    Some(header) if !header.is_empty() => {
                        row.entry(header.clone())
                            .or_insert_with(|| value.trim().to_string());
                    }
                    _ => {}
                }
            }

            // 跳过完全空白的行
            if row.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(row);
        }

        Ok(ParsedTable {
            name: table.to_string(),
            headers: columns.into_iter().filter(|h| !h.is_empty()).collect(),
            rows,
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    // 解析器会去掉单元格首尾空白，生成的值预先规整
    fn arb_cell() -> impl Strategy<Value = String> {
        prop_oneof![
            any::<String>(),
            "[a-zA-Z0-9 ,\"\r\n]{0,24}",
        ]
        .prop_map(|s| s.trim().to_string())
    }

    fn arb_row() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(arb_cell(), 3)
            .prop_filter("至少一个非空单元格", |row| row.iter().any(|c| !c.is_empty()))
    }

    proptest! {
        #[test]
        fn round_trip_through_writer(rows in prop::collection::vec(arb_row(), 0..8)) {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["Name", "Quote", "Notes"]).unwrap();
            for row in &rows {
                writer.write_record(row).unwrap();
            }
            let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();

            let table = CsvParser.parse_str("t", &text).unwrap();

            prop_assert_eq!(table.len(), rows.len());
            for (parsed, original) in table.rows.iter().zip(&rows) {
                prop_assert_eq!(&parsed["Name"], &original[0]);
                prop_assert_eq!(&parsed["Quote"], &original[1]);
                prop_assert_eq!(&parsed["Notes"], &original[2]);
            }
        }
    }
}
