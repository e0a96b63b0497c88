// ==========================================
// 公司方案目录 - 命令行入口
// ==========================================
// 配置: 环境变量（可由 .env 提供），见 config::build_config
// 退出码: 成功 0；配置/拉取/空表/表结构/写文件失败 1
// ==========================================

use solution_catalog::{logging, BuildConfig, BuildSummary, CatalogImporter};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // .env 不存在时忽略
    let _ = dotenvy::dotenv();

    // 初始化日志系统
    logging::init();

    tracing::info!(
        "{} v{}",
        solution_catalog::APP_NAME,
        solution_catalog::VERSION
    );

    match run().await {
        Ok(summary) => {
            println!("{}", summary.one_line());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "构建失败");
            eprintln!("构建失败: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<BuildSummary> {
    let config = BuildConfig::from_env()?;
    tracing::info!(output = %config.output_path.display(), "配置加载完成");

    let importer = CatalogImporter::from_config(&config)?;
    let summary = importer
        .build_to_file(&config.output_path, config.report_path.as_deref())
        .await?;

    Ok(summary)
}
