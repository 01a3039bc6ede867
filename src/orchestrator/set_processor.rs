//! 单个题组处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责处理单个题库文件中的所有题目，是题组级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **查找循环**：按题组标识解析目标循环（每个题组只查一次）
//! 2. **遍历题目**：按位置依次交给 `RecordFlow`
//! 3. **统计输出**：记录交换/保持/跳过数量以及正确答案分布

use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::bank::QuestionBank;
use crate::models::slot::{Slot, SLOT_COUNT};
use crate::rules::{CycleTable, RewriteRules, TargetCycle};
use crate::services::normalizer::Style;
use crate::workflow::{RecordCtx, RecordFlow, RecordOutcome};

/// 题组处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SetStats {
    pub total: usize,
    pub swapped: usize,
    pub kept: usize,
    pub skipped: usize,
    /// 处理后正确答案在各位置的数量（A→D）
    pub distribution: [usize; SLOT_COUNT],
}

impl SetStats {
    fn record(&mut self, outcome: RecordOutcome) {
        self.total += 1;
        match outcome {
            RecordOutcome::Swapped { to, .. } => {
                self.swapped += 1;
                self.distribution[to.index()] += 1;
            }
            RecordOutcome::Kept(slot) => {
                self.kept += 1;
                self.distribution[slot.index()] += 1;
            }
            RecordOutcome::Skipped => self.skipped += 1,
        }
    }

    /// 分布摘要，如 "A=3 B=2 C=2 D=2"
    pub fn distribution_summary(&self) -> String {
        Slot::ALL
            .iter()
            .map(|slot| format!("{}={}", slot, self.distribution[slot.index()]))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// 处理一组题目
///
/// # 参数
/// - `questions`: 题目列表（原地修改）
/// - `set_id`: 题组标识
/// - `cycle`: 目标循环
/// - `style`: 改写风格
/// - `rules`: 规则表
/// - `file_index`: 文件序号（用于日志）
pub fn process_questions(
    questions: &mut [serde_json::Value],
    set_id: &str,
    cycle: TargetCycle,
    style: Style,
    rules: &RewriteRules,
    file_index: usize,
) -> SetStats {
    let flow = RecordFlow::new(rules, style, cycle);
    let mut stats = SetStats::default();

    for (position, question) in questions.iter_mut().enumerate() {
        let ctx = RecordCtx::new(set_id, file_index, position);
        stats.record(flow.run(question, &ctx));
    }

    stats
}

/// 处理单个题库文件
///
/// 文档顶层必须是对象；缺少 `questions` 数组时按空题组处理
pub fn process_bank(
    bank: &mut QuestionBank,
    cycles: &CycleTable,
    rules: &RewriteRules,
    file_index: usize,
) -> AppResult<SetStats> {
    if !bank.document.is_object() {
        return Err(AppError::invalid_bank(bank.location(), "顶层不是 JSON 对象"));
    }

    let cycle = cycles.resolve(&bank.set_id);
    if !cycles.is_known(&bank.set_id) {
        warn!(
            "[文件 {}] ⚠️ 题组 {} 没有配置循环，使用默认循环 {}",
            file_index, bank.set_id, cycle
        );
    }

    let location = bank.location();
    let set_id = bank.set_id.clone();
    let style = bank.style;
    log_set_start(file_index, &location, &cycle, style);

    let stats = match bank.questions_mut() {
        Some(questions) => process_questions(questions, &set_id, cycle, style, rules, file_index),
        None => {
            warn!("[文件 {}] ⚠️ 没有 questions 数组: {}", file_index, location);
            SetStats::default()
        }
    };

    log_set_complete(file_index, &stats);
    Ok(stats)
}

// ========== 日志辅助函数 ==========

fn log_set_start(file_index: usize, location: &str, cycle: &TargetCycle, style: Style) {
    info!("[文件 {}] 开始处理", file_index);
    info!("[文件 {}] 路径: {}", file_index, location);
    info!("[文件 {}] 目标循环: {} | 风格: {}", file_index, cycle, style);
}

fn log_set_complete(file_index: usize, stats: &SetStats) {
    info!(
        "[文件 {}] 题目统计: 交换 {}, 保持 {}, 跳过 {}, 总计 {}",
        file_index, stats.swapped, stats.kept, stats.skipped, stats.total
    );
    info!(
        "[文件 {}] 正确答案分布: {}",
        file_index,
        stats.distribution_summary()
    );
}
