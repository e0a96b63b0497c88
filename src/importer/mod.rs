// ==========================================
// 公司方案目录 - 导入层
// ==========================================
// 职责: 外部表数据拉取、解析、字段解析、表结构校验
// 支持: 远程表格服务 (CSV 导出), 本地目录, 内存
// ==========================================

// 模块声明
pub mod catalog_importer;
pub mod columns;
pub mod csv_parser;
pub mod error;
pub mod field_resolver;
pub mod key_normalizer;
pub mod schema_validator;
pub mod table_source;

// 重导出核心类型
pub use catalog_importer::{CatalogBuild, CatalogImporter};
pub use csv_parser::{CsvParser, ParsedTable, RawRow};
pub use error::{ImportError, ImportResult};
pub use field_resolver::{pick, pick_list, FieldResolver};
pub use key_normalizer::{keyify, norm};
pub use schema_validator::SchemaValidator;

// 重导出 Trait 接口
pub use table_source::{DirTableSource, HttpTableSource, MemoryTableSource, TableSource};
