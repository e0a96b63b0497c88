// ==========================================
// 公司方案目录 - 表结构校验器
// ==========================================
// 职责: 拉取并解析后立即校验必需列，先于对账失败
// 场景: 数据源静默返回了错误的工作表（例如总是第一个 tab）
// ==========================================

use crate::importer::columns::RequiredColumn;
use crate::importer::csv_parser::ParsedTable;
use crate::importer::error::{ImportError, ImportResult};

pub struct SchemaValidator;

impl SchemaValidator {
    /// 校验表头是否包含全部必需列
    ///
    /// # 参数
    /// - table: 表名
    /// - headers: 实际表头
    /// - required: 必需列（任一别名出现即满足，不区分大小写）
    ///
    /// # 返回
    /// - Err(SchemaMismatch): 列出缺失的规范列名与实际全部列名
    pub fn validate_columns(
        &self,
        table: &str,
        headers: &[String],
        required: &[RequiredColumn],
    ) -> ImportResult<()> {
        let missing: Vec<String> = required
            .iter()
            .filter(|column| !Self::has_any(headers, column.aliases))
            .map(|column| column.name.to_string())
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        Err(ImportError::SchemaMismatch {
            table: table.to_string(),
            missing,
            found: headers.to_vec(),
        })
    }

    pub fn validate_table(
        &self,
        table: &ParsedTable,
        required: &[RequiredColumn],
    ) -> ImportResult<()> {
        self.validate_columns(&table.name, &table.headers, required)
    }

    fn has_any(headers: &[String], aliases: &[&str]) -> bool {
        headers
            .iter()
            .any(|header| aliases.iter().any(|alias| header.trim().eq_ignore_ascii_case(alias)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::columns;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_validate_ok_with_aliases() {
        let validator = SchemaValidator;
        let result = validator.validate_columns(
            "Problems",
            &headers(&["Common Problem", "solution", "OpenRecovery Feature"]),
            &columns::problems_required(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_missing_solution() {
        let validator = SchemaValidator;
        let err = validator
            .validate_columns(
                "Problems",
                &headers(&["Problem", "Feature"]),
                &columns::problems_required(),
            )
            .unwrap_err();

        match err {
            ImportError::SchemaMismatch {
                table,
                missing,
                found,
            } => {
                assert_eq!(table, "Problems");
                assert_eq!(missing, vec!["Solution"]);
                assert_eq!(found, vec!["Problem", "Feature"]);
            }
            other => panic!("期望 SchemaMismatch，实际: {:?}", other),
        }
    }

    #[test]
    fn test_validate_wrong_tab_lists_everything_missing() {
        // 数据源返回了 Companies 表而不是 Problems 表
        let validator = SchemaValidator;
        let err = validator
            .validate_columns(
                "Problems",
                &headers(&["Company ID", "Company Name", "Website"]),
                &columns::problems_required(),
            )
            .unwrap_err();

        assert_eq!(err.missing_columns(), &["Problem", "Solution", "Feature"]);
        assert!(err.to_string().contains("Company ID, Company Name, Website"));
    }

    #[test]
    fn test_companies_strict_requires_id() {
        let validator = SchemaValidator;
        let names = headers(&["Company Name", "Website"]);

        assert!(validator
            .validate_columns("Companies", &names, &columns::companies_required(false))
            .is_ok());

        let err = validator
            .validate_columns("Companies", &names, &columns::companies_required(true))
            .unwrap_err();
        assert_eq!(err.missing_columns(), &["Company ID"]);
    }

    #[test]
    fn test_links_accept_company_id_column() {
        let validator = SchemaValidator;
        assert!(validator
            .validate_columns(
                "Company Solutions",
                &headers(&["Company ID", "Problem"]),
                &columns::links_required(),
            )
            .is_ok());
    }
}
