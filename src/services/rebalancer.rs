//! 选项位置重排 - 业务能力层
//!
//! 只负责"把一道题的正确答案挪到指定位置"，不关心题目在题组中的顺序

use crate::models::question::QuestionRecord;
use crate::models::slot::Slot;
use crate::rules::RewriteRules;
use crate::services::normalizer::{normalize, Style};

/// 选项位置重排器
///
/// 职责：
/// - 交换当前正确位置与目标位置的选项文本和解析说明
/// - 按展示位置（而不是对错）规范化全部四个选项
pub struct SlotRebalancer<'a> {
    rules: &'a RewriteRules,
    style: Style,
}

impl<'a> SlotRebalancer<'a> {
    pub fn new(rules: &'a RewriteRules, style: Style) -> Self {
        Self { rules, style }
    }

    /// 重排一道题
    ///
    /// # 参数
    /// - `record`: 题目记录（按值传入，整体替换后返回）
    /// - `desired`: 正确答案的目标位置
    ///
    /// # 返回
    /// 重排并规范化后的记录
    pub fn rebalance(&self, mut record: QuestionRecord, desired: Slot) -> QuestionRecord {
        let current = record.correct;
        if desired != current {
            record.options.swap(current.index(), desired.index());
            if let Some(explanation) = record.explanation.as_mut() {
                explanation.swap(current, desired);
            }
            record.correct = desired;
        }

        record.options = Slot::ALL
            .map(|slot| normalize(&record.options[slot.index()], self.style, slot.index(), self.rules));
        record
    }
}
