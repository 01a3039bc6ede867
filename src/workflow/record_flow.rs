//! 题目处理流程 - 流程层
//!
//! 核心职责：定义"一道题"的完整处理流程
//!
//! 流程顺序：
//! 1. JSON → 题目记录（不满足条件则跳过，原样保留）
//! 2. 按目标循环重排并规范化
//! 3. 记录 → 写回 JSON

use serde_json::Value;
use tracing::{debug, warn};

use crate::models::question::QuestionRecord;
use crate::models::slot::Slot;
use crate::rules::{RewriteRules, TargetCycle};
use crate::services::normalizer::Style;
use crate::services::SlotRebalancer;
use crate::utils::logging::truncate_text;
use crate::workflow::record_ctx::RecordCtx;

/// 题目处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// 正确答案换了位置
    Swapped { from: Slot, to: Slot },
    /// 正确答案已在目标位置，只做了规范化
    Kept(Slot),
    /// 不满足重排条件，原样保留
    Skipped,
}

/// 题目处理流程
///
/// - 不持有任何题目数据
/// - 只依赖业务能力（services）
pub struct RecordFlow<'a> {
    rebalancer: SlotRebalancer<'a>,
    cycle: TargetCycle,
}

impl<'a> RecordFlow<'a> {
    /// 创建新的题目处理流程
    pub fn new(rules: &'a RewriteRules, style: Style, cycle: TargetCycle) -> Self {
        Self {
            rebalancer: SlotRebalancer::new(rules, style),
            cycle,
        }
    }

    pub fn run(&self, question: &mut Value, ctx: &RecordCtx) -> RecordOutcome {
        let record = match QuestionRecord::from_json(question) {
            Ok(record) => record,
            Err(reason) => {
                warn!("{} ⚠️ 跳过: {}", ctx, reason);
                return RecordOutcome::Skipped;
            }
        };

        let from = record.correct;
        let to = self.cycle.slot_for(ctx.position);
        let record = self.rebalancer.rebalance(record, to);
        record.write_into(question);
        debug!(
            "{} 正确选项: {}",
            ctx,
            truncate_text(&record.options[to.index()], 60)
        );

        if from == to {
            debug!("{} 题目 {} 正确答案保持在 {}", ctx, record.id, to);
            RecordOutcome::Kept(to)
        } else {
            debug!("{} 题目 {} 正确答案 {} → {}", ctx, record.id, from, to);
            RecordOutcome::Swapped { from, to }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_run_swaps_and_writes_back() {
        let rules = RewriteRules::default();
        let cycle = TargetCycle::parse(["C", "A", "D", "B"]).unwrap();
        let flow = RecordFlow::new(&rules, Style::VerbLed, cycle);
        let mut question = json!({
            "id": "q",
            "options": { "A": "Right.", "B": "Wrong one.", "C": "Wrong two.", "D": "Wrong three." },
            "correct_answer": "A"
        });

        let outcome = flow.run(&mut question, &RecordCtx::new("set.json", 1, 0));

        assert_eq!(outcome, RecordOutcome::Swapped { from: Slot::A, to: Slot::C });
        assert_eq!(question["correct_answer"], json!("C"));
        assert_eq!(question["options"]["C"], json!("Contends that right."));
        assert_eq!(question["options"]["A"], json!("Argues that wrong two."));
    }

    #[test]
    fn test_unknown_correct_answer_is_rewritten_to_slot_letter() {
        let rules = RewriteRules::default();
        let flow = RecordFlow::new(&rules, Style::VerbLed, TargetCycle::DEFAULT);
        let mut question = json!({
            "id": "q",
            "options": { "A": "First.", "B": "Second.", "C": "Third.", "D": "Fourth." },
            "correct_answer": "E"
        });

        let outcome = flow.run(&mut question, &RecordCtx::new("set.json", 1, 0));

        assert_eq!(outcome, RecordOutcome::Kept(Slot::A));
        assert_eq!(question["correct_answer"], json!("A"));
        assert_eq!(question["options"]["A"], json!("Argues that first."));
    }

    #[test]
    fn test_ineligible_question_is_untouched() {
        let rules = RewriteRules::default();
        let flow = RecordFlow::new(&rules, Style::VerbLed, TargetCycle::DEFAULT);
        let mut question = json!({ "id": "q", "options": { "A": "x", "B": "y" }, "correct_answer": "B" });
        let before = question.clone();

        let outcome = flow.run(&mut question, &RecordCtx::new("set.json", 1, 2));

        assert_eq!(outcome, RecordOutcome::Skipped);
        assert_eq!(question, before);
    }

    #[test]
    fn test_ctx_display() {
        let ctx = RecordCtx::new("clk.json", 2, 4);
        assert_eq!(ctx.to_string(), "[文件 #2 题组 clk.json 题目 #5]");
    }
}
