// ==========================================
// 公司方案目录 - 字段解析器
// ==========================================
// 职责: 按别名优先级取值 + 行记录 → 领域结构映射
// ==========================================

use crate::domain::catalog::{Company, LinkRow, Problem};
use crate::importer::columns;
use crate::importer::csv_parser::RawRow;

/// 取第一个存在且非空的别名列值（列名不区分大小写）
///
/// # 返回
/// - 去空白后的值；无匹配或 row 为 None 时返回空字符串
pub fn pick(row: Option<&RawRow>, aliases: &[&str]) -> String {
    let Some(row) = row else {
        return String::new();
    };

    // 尝试所有可能的列名
    for alias in aliases {
        let alias = alias.trim();
        let hit = row
            .iter()
            .filter(|(header, _)| header.trim().eq_ignore_ascii_case(alias))
            .map(|(_, value)| value.trim())
            .find(|value| !value.is_empty());

        if let Some(value) = hit {
            return value.to_string();
        }
    }
    String::new()
}

/// 取多值单元格（`,` `;` `|` 或换行分隔），去空白并丢弃空项
pub fn pick_list(row: Option<&RawRow>, aliases: &[&str]) -> Vec<String> {
    pick(row, aliases)
        .split(|c: char| matches!(c, ',' | ';' | '|' | '\n' | '\r'))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

// ==========================================
// FieldResolver - 行记录映射
// ==========================================
pub struct FieldResolver;

impl FieldResolver {
    /// Problems 行 → Problem（问题文本为空返回 None）
    pub fn to_problem(&self, row: &RawRow) -> Option<Problem> {
        let problem = pick(Some(row), columns::PROBLEM);
        if problem.is_empty() {
            return None;
        }

        Some(Problem {
            problem,
            solution: pick(Some(row), columns::SOLUTION),
            feature: pick(Some(row), columns::FEATURE),
        })
    }

    /// Companies 行 → Company（solutions 为空）
    pub fn to_company(&self, row: &RawRow) -> Company {
        let mut company = Company::new(
            pick(Some(row), columns::COMPANY_ID),
            pick(Some(row), columns::COMPANY_NAME),
        );
        company.website = pick(Some(row), columns::WEBSITE);
        company.location = pick(Some(row), columns::LOCATION);
        company.target = pick(Some(row), columns::TARGET);
        company.org_types = pick_list(Some(row), columns::ORG_TYPES).into_iter().collect();
        company
    }

    /// Company Solutions 行 → LinkRow
    pub fn to_link(&self, row: &RawRow, row_number: usize) -> LinkRow {
        LinkRow {
            row_number,
            company_id: pick(Some(row), columns::COMPANY_ID),
            company_name: pick(Some(row), columns::COMPANY_NAME),
            problem: pick(Some(row), columns::PROBLEM),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_pick_first_alias_wins() {
        let r = row(&[("Problem", "A"), ("Common Problem", "B")]);
        assert_eq!(pick(Some(&r), &["Problem", "Common Problem"]), "A");
        assert_eq!(pick(Some(&r), &["Common Problem", "Problem"]), "B");
    }

    #[test]
    fn test_pick_skips_blank_alias() {
        let r = row(&[("Problem", "   "), ("Common Problem", " B ")]);
        assert_eq!(pick(Some(&r), columns::PROBLEM), "B");
    }

    #[test]
    fn test_pick_case_insensitive_header() {
        let r = row(&[("company id", "c1"), ("COMPANY NAME", "Acme")]);
        assert_eq!(pick(Some(&r), columns::COMPANY_ID), "c1");
        assert_eq!(pick(Some(&r), columns::COMPANY_NAME), "Acme");
    }

    #[test]
    fn test_pick_missing_row_or_column() {
        assert_eq!(pick(None, columns::PROBLEM), "");
        let r = row(&[("Other", "x")]);
        assert_eq!(pick(Some(&r), columns::PROBLEM), "");
    }

    #[test]
    fn test_pick_list_splits_and_trims() {
        let r = row(&[("Org Types", "Nonprofit; Government , ,Faith|Nonprofit")]);
        assert_eq!(
            pick_list(Some(&r), columns::ORG_TYPES),
            vec!["Nonprofit", "Government", "Faith", "Nonprofit"]
        );
    }

    #[test]
    fn test_to_problem_requires_text() {
        let resolver = FieldResolver;
        let r = row(&[("Common Problem", "Slow onboarding"), ("Solution", "Checklist")]);
        let problem = resolver.to_problem(&r).unwrap();

        assert_eq!(problem.problem, "Slow onboarding");
        assert_eq!(problem.solution, "Checklist");
        assert_eq!(problem.feature, "");

        let blank = row(&[("Problem", ""), ("Solution", "x")]);
        assert!(resolver.to_problem(&blank).is_none());
    }

    #[test]
    fn test_to_company_fields() {
        let r = row(&[
            ("ID", "c1"),
            ("Company Name", "Acme"),
            ("Website", "https://acme.test"),
            ("Location", "Denver"),
            ("Target Market", "Rural"),
            ("Organization Type", "Nonprofit, Clinic, Nonprofit"),
        ]);
        let company = FieldResolver.to_company(&r);

        assert_eq!(company.id, "c1");
        assert_eq!(company.name, "Acme");
        assert_eq!(company.website, "https://acme.test");
        assert_eq!(company.location, "Denver");
        assert_eq!(company.target, "Rural");
        assert_eq!(company.org_types.len(), 2);
        assert!(company.solutions().is_empty());
    }

    #[test]
    fn test_to_link() {
        let r = row(&[("Company ID", "c1"), ("Problem", "slow onboarding")]);
        let link = FieldResolver.to_link(&r, 2);

        assert_eq!(link.row_number, 2);
        assert_eq!(link.company_id, "c1");
        assert_eq!(link.company_name, "");
        assert_eq!(link.company_reference(), "c1");
        assert_eq!(link.problem, "slow onboarding");
    }
}
