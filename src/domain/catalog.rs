// ==========================================
// 公司方案目录 - 目录领域模型
// ==========================================
// 职责: Problem / Company / CatalogDocument 定义
// 红线: Company 的 solutions 与 problems 只能通过 attach 同步增长
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

// ==========================================
// Problem - 问题/方案记录
// ==========================================
// 用途: 由 Problems 表构建，多个公司只读共享同一实例
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub problem: String,  // 问题描述（原文）
    pub solution: String, // 解决方案
    pub feature: String,  // 对应功能
}

// ==========================================
// Company - 公司记录
// ==========================================
// 生命周期: 对账期间 solutions 增长，输出后冻结
#[derive(Debug, Clone, Serialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub website: String,
    pub location: String,
    pub target: String,
    pub org_types: BTreeSet<String>,

    solutions: Vec<Arc<Problem>>,
    problems: Vec<String>,

    #[serde(skip)]
    solution_keys: HashSet<String>,
}

impl Company {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            website: String::new(),
            location: String::new(),
            target: String::new(),
            org_types: BTreeSet::new(),
            solutions: Vec::new(),
            problems: Vec::new(),
            solution_keys: HashSet::new(),
        }
    }

    /// 挂载一个问题
    ///
    /// # 参数
    /// - key: 问题的归一化键（keyify 结果）
    /// - problem: 共享的问题记录
    ///
    /// # 返回
    /// - true: 新挂载
    /// - false: 同键问题已存在，未挂载
    pub fn attach(&mut self, key: &str, problem: Arc<Problem>) -> bool {
        if !self.solution_keys.insert(key.to_string()) {
            return false;
        }
        self.problems.push(problem.problem.clone());
        self.solutions.push(problem);
        true
    }

    pub fn solutions(&self) -> &[Arc<Problem>] {
        &self.solutions
    }

    /// 已挂载问题的原文列表（与 solutions 一一对应）
    pub fn problems(&self) -> &[String] {
        &self.problems
    }

    pub fn has_solution(&self, key: &str) -> bool {
        self.solution_keys.contains(key)
    }
}

// ==========================================
// LinkRow - 关联行中间结构体
// ==========================================
// 用途: Company Solutions 表的一行，对账时消费一次即丢弃
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkRow {
    pub row_number: usize,    // 表格行号（表头为第 1 行）
    pub company_id: String,   // 公司 id 引用（可空）
    pub company_name: String, // 公司名称引用（可空）
    pub problem: String,      // 问题原文引用
}

impl LinkRow {
    /// 用于报告的公司引用文本（优先 id）
    pub fn company_reference(&self) -> &str {
        if self.company_id.is_empty() {
            &self.company_name
        } else {
            &self.company_id
        }
    }
}

// ==========================================
// CatalogDocument - 输出文档
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct CatalogDocument {
    pub companies: Vec<Company>,
}
