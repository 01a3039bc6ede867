//! 批量题库处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量题库文件的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：写日志文件头、加载清单、构建规则表和循环表
//! 2. **文件发现**：按清单列出所有待处理的题库文件
//! 3. **并发控制**：使用 Semaphore 限制同时处理的文件数量
//! 4. **重排模式**：加载 → 重排 → 原子写回
//! 5. **校验模式**：加载 → 校验 → 输出不一致报告
//! 6. **全局统计**：汇总所有文件的处理结果
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个题组的细节，委托 set_processor
//! - **只读共享**：规则表和循环表通过 Arc 在任务间共享，任务之间不共享可变状态

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::cli::RunMode;
use crate::config::{Config, Manifest};
use crate::models::loaders::{discover_banks, load_bank, save_bank, BankTarget};
use crate::orchestrator::set_processor::{self, SetStats};
use crate::rules::{CycleTable, RewriteRules};
use crate::services::verifier::{self, MismatchReport};
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
    manifest: Manifest,
    rules: Arc<RewriteRules>,
    cycles: Arc<CycleTable>,
}

/// 运行统计
#[derive(Debug, Default)]
pub struct ProcessingStats {
    /// 清单列出的文件数
    pub total: usize,
    /// 处理完成的文件数
    pub processed: usize,
    /// 不存在而跳过的文件数
    pub missing: usize,
    /// 失败的文件数
    pub failed: usize,
    /// 处理的题目总数
    pub records: usize,
    /// 校验模式下的不一致报告
    pub reports: Vec<MismatchReport>,
}

/// 单个文件的处理结果
enum FileOutcome {
    Processed(SetStats),
    Missing,
}

impl App {
    /// 初始化应用
    ///
    /// 清单或规则无效时直接返回错误，不处理任何文件
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::init_log_file(&config.output_log_file)?;

        let manifest = match &config.manifest_path {
            Some(path) => {
                info!("📋 加载清单: {}", path);
                Manifest::load(Path::new(path))
                    .await
                    .with_context(|| format!("无法加载清单: {}", path))?
            }
            None => {
                info!("📋 未指定清单，使用内置清单");
                Manifest::builtin()
            }
        };

        let rules = manifest.rewrite_rules().context("改写规则无效")?;
        let cycles = manifest.cycle_table().context("循环配置无效")?;

        Ok(Self {
            config,
            manifest,
            rules: Arc::new(rules),
            cycles: Arc::new(cycles),
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self, mode: RunMode) -> Result<ProcessingStats> {
        logging::log_startup(
            &mode.to_string(),
            self.config.max_concurrent_files,
            self.config.dry_run,
        );

        info!("\n📁 正在扫描题库文件...");
        let targets = discover_banks(Path::new(&self.config.bank_root), &self.manifest).await?;
        if targets.is_empty() {
            warn!("⚠️ 清单没有列出任何题库文件");
        } else {
            logging::log_files_found(targets.len());
        }

        let stats = match mode {
            RunMode::Rebalance => self.rebalance_all(targets).await?,
            RunMode::Verify => self.verify_all(targets).await?,
        };

        logging::print_final_stats(
            stats.processed,
            stats.missing,
            stats.failed,
            stats.records,
            &self.config.output_log_file,
        );
        Ok(stats)
    }

    /// 并发重排所有文件
    ///
    /// 所有任务结束后再汇总；任一文件失败时返回第一个错误
    async fn rebalance_all(&self, targets: Vec<BankTarget>) -> Result<ProcessingStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_files));
        let mut stats = ProcessingStats {
            total: targets.len(),
            ..Default::default()
        };

        let mut handles = Vec::new();
        for (idx, target) in targets.into_iter().enumerate() {
            let file_index = idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;
            let rules = Arc::clone(&self.rules);
            let cycles = Arc::clone(&self.cycles);
            let dry_run = self.config.dry_run;

            let handle = tokio::spawn(async move {
                let _permit = permit;
                rebalance_file(target, file_index, &cycles, &rules, dry_run).await
            });
            handles.push((file_index, handle));
        }

        let mut first_error = None;
        for (file_index, handle) in handles {
            match handle.await {
                Ok(Ok(FileOutcome::Processed(set_stats))) => {
                    stats.processed += 1;
                    stats.records += set_stats.total;
                }
                Ok(Ok(FileOutcome::Missing)) => stats.missing += 1,
                Ok(Err(e)) => {
                    error!("[文件 {}] ❌ 处理过程中发生错误: {:#}", file_index, e);
                    stats.failed += 1;
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
                Err(e) => {
                    error!("[文件 {}] 任务执行失败: {}", file_index, e);
                    stats.failed += 1;
                    if first_error.is_none() {
                        first_error = Some(anyhow::Error::new(e));
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(stats),
        }
    }

    /// 依次校验所有文件
    async fn verify_all(&self, targets: Vec<BankTarget>) -> Result<ProcessingStats> {
        let mut stats = ProcessingStats {
            total: targets.len(),
            ..Default::default()
        };

        for target in targets {
            let Some(bank) = load_bank(&target.path, target.style)
                .await
                .with_context(|| format!("无法读取题库: {}", target.path.display()))?
            else {
                stats.missing += 1;
                continue;
            };

            let reports = verifier::verify(&bank.location(), bank.questions());
            for report in &reports {
                warn!("⚠️ 正确答案与解析标记不一致: {}", report);
            }
            stats.processed += 1;
            stats.records += bank.questions().len();
            stats.reports.extend(reports);
        }

        for line in logging::print_verification_report(&stats.reports) {
            logging::append_log(&self.config.output_log_file, &line)?;
        }
        Ok(stats)
    }
}

/// 重排单个文件：加载 → 处理 → 写回
async fn rebalance_file(
    target: BankTarget,
    file_index: usize,
    cycles: &CycleTable,
    rules: &RewriteRules,
    dry_run: bool,
) -> Result<FileOutcome> {
    let path = target.path;
    let Some(mut bank) = load_bank(&path, target.style)
        .await
        .with_context(|| format!("无法读取题库: {}", path.display()))?
    else {
        return Ok(FileOutcome::Missing);
    };

    info!("[文件 {}] 分组: {}", file_index, target.group);
    let stats = set_processor::process_bank(&mut bank, cycles, rules, file_index)?;

    if dry_run {
        info!("[文件 {}] 🧪 试运行，未写回: {}", file_index, bank.location());
    } else {
        save_bank(&bank)
            .await
            .with_context(|| format!("无法写回题库: {}", bank.location()))?;
        info!("[文件 {}] ✓ 已写回: {}", file_index, bank.location());
    }

    Ok(FileOutcome::Processed(stats))
}
