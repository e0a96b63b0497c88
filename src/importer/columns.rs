// ==========================================
// 公司方案目录 - 列名别名表
// ==========================================
// 职责: 三张表的列名别名 + 必需列定义
// 说明: 列名匹配一律不区分大小写，别名按优先级排列
// ==========================================

// ===== Companies =====
pub const COMPANY_ID: &[&str] = &["Company ID", "ID"];
pub const COMPANY_NAME: &[&str] = &["Company Name", "Company", "Name"];
pub const WEBSITE: &[&str] = &["Website", "Web Site", "URL"];
pub const LOCATION: &[&str] = &["Location", "HQ", "City"];
pub const TARGET: &[&str] = &["Target", "Target Market", "Target Audience"];
pub const ORG_TYPES: &[&str] = &[
    "Org Types",
    "Org Type",
    "Organization Types",
    "Organization Type",
];

// ===== Problems =====
pub const PROBLEM: &[&str] = &["Problem", "Common Problem"];
pub const SOLUTION: &[&str] = &["Solution"];
pub const FEATURE: &[&str] = &["Feature", "OpenRecovery Feature"];

// ===== Company Solutions =====
pub const LINK_COMPANY: &[&str] = &["Company Name", "Company", "Name", "Company ID", "ID"];

// ==========================================
// RequiredColumn - 必需列
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredColumn {
    pub name: &'static str,                // 报错时使用的规范列名
    pub aliases: &'static [&'static str], // 任一出现即视为满足
}

impl RequiredColumn {
    pub const fn new(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { name, aliases }
    }
}

/// Companies 必需列（严格模式额外要求公司 id 列）
pub fn companies_required(strict: bool) -> Vec<RequiredColumn> {
    let mut required = vec![RequiredColumn::new("Company Name", COMPANY_NAME)];
    if strict {
        required.push(RequiredColumn::new("Company ID", COMPANY_ID));
    }
    required
}

pub fn problems_required() -> Vec<RequiredColumn> {
    vec![
        RequiredColumn::new("Problem", PROBLEM),
        RequiredColumn::new("Solution", SOLUTION),
        RequiredColumn::new("Feature", FEATURE),
    ]
}

pub fn links_required() -> Vec<RequiredColumn> {
    vec![
        RequiredColumn::new("Company Name", LINK_COMPANY),
        RequiredColumn::new("Problem", PROBLEM),
    ]
}
