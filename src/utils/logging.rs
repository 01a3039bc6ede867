/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs::{self, OpenOptions};
use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::services::verifier::MismatchReport;

/// 安装 tracing 订阅器
///
/// 优先使用 `RUST_LOG`；未设置时默认 `info`，详细模式下为 `debug`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n题库重排日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法创建日志文件: {}", log_file_path))?;
    Ok(())
}

/// 追加一行到日志文件
pub fn append_log(log_file_path: &str, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .with_context(|| format!("无法打开日志文件: {}", log_file_path))?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `mode`: 运行模式名称
/// - `max_concurrent`: 最大并发数
/// - `dry_run`: 是否只处理不写回
pub fn log_startup(mode: &str, max_concurrent: usize, dry_run: bool) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - {}", mode);
    info!("📊 最大并发数: {}", max_concurrent);
    if dry_run {
        info!("🧪 试运行：不会写回任何文件");
    }
    info!("{}", "=".repeat(60));
}

/// 记录文件扫描结果
pub fn log_files_found(total: usize) {
    info!("✓ 清单共列出 {} 个题库文件", total);
    info!("💡 不存在的文件会被静默跳过\n");
}

/// 打印最终统计信息
///
/// # 参数
/// - `processed`: 处理完成的文件数
/// - `missing`: 不存在而跳过的文件数
/// - `failed`: 失败的文件数
/// - `records`: 处理的题目数
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(
    processed: usize,
    missing: usize,
    failed: usize,
    records: usize,
    log_file_path: &str,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已处理文件: {}", processed);
    info!("⏭️ 跳过（不存在）: {}", missing);
    info!("❌ 失败: {}", failed);
    info!("📝 题目总数: {}", records);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 输出校验结果
///
/// 每条不一致打印一行；没有不一致时打印一行确认信息
pub fn print_verification_report(reports: &[MismatchReport]) -> Vec<String> {
    let lines: Vec<String> = if reports.is_empty() {
        vec!["✅ 所有已配置文件的正确答案与解析标记一致".to_string()]
    } else {
        reports.iter().map(|r| format!("[WARN] {}", r)).collect()
    };
    for line in &lines {
        println!("{}", line);
    }
    lines
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
