//! 正确答案一致性校验 - 业务能力层
//!
//! 只读扫描：对比 `correct_answer` 与解析说明里嵌入的"正确"标记。
//!
//! 标记来源有两种：
//! - `explanation.options` 中的 `is_correct` 标志（可信度高）
//! - `explanation.incorrect` 的文本里提到 "correct answer"（启发式，只作参考；
//!   否定说法同样报告，但单独标出）

use serde_json::Value;

use crate::models::question::{read_explanation, record_id, ExplanationShape};
use crate::models::slot::Slot;

/// 标记来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerSource {
    /// 显式的 `is_correct` 标志
    Flag,
    /// 错误原因文本中出现 "correct answer"
    TextHeuristic,
    /// 同上，但至少有一处处于否定语境（如 "not the correct answer"），需人工确认
    AmbiguousText,
}

impl std::fmt::Display for MarkerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerSource::Flag => write!(f, "is_correct 标志"),
            MarkerSource::TextHeuristic => write!(f, "文本启发式"),
            MarkerSource::AmbiguousText => write!(f, "文本启发式，否定语境待确认"),
        }
    }
}

/// 不一致报告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchReport {
    /// 文件位置
    pub location: String,
    /// 题目 ID
    pub record_id: String,
    /// 声明的正确答案（原样，可能缺失或无效）
    pub declared: Option<String>,
    /// 带"正确"标记的位置
    pub observed: Vec<Slot>,
    pub source: MarkerSource,
}

impl std::fmt::Display for MismatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let observed: Vec<String> = self.observed.iter().map(Slot::to_string).collect();
        write!(
            f,
            "{} {} -> correct={}, flagged=[{}] ({})",
            self.location,
            self.record_id,
            self.declared.as_deref().unwrap_or("<缺失>"),
            observed.join(", "),
            self.source
        )
    }
}

/// 校验一个题组
///
/// # 参数
/// - `location`: 文件位置（写入报告）
/// - `questions`: 题目列表
///
/// # 返回
/// 所有不一致的报告；没有任何标记的题目不算不一致
pub fn verify(location: &str, questions: &[Value]) -> Vec<MismatchReport> {
    questions
        .iter()
        .filter_map(|question| check_question(location, question))
        .collect()
}

fn check_question(location: &str, question: &Value) -> Option<MismatchReport> {
    let obj = question.as_object()?;
    let explanation = read_explanation(obj)?;
    let declared = obj
        .get("correct_answer")
        .and_then(Value::as_str)
        .map(str::to_string);

    let (observed, source, flags_promised) = match explanation.shape {
        ExplanationShape::PerOption => {
            let promised = explanation
                .entries
                .iter()
                .flatten()
                .any(|entry| entry.get("is_correct").is_some());
            let observed = Slot::ALL
                .into_iter()
                .filter(|slot| {
                    explanation
                        .entry(*slot)
                        .and_then(|entry| entry.get("is_correct"))
                        .is_some_and(is_truthy)
                })
                .collect::<Vec<_>>();
            (observed, MarkerSource::Flag, promised)
        }
        ExplanationShape::IncorrectText => {
            let mut negated = false;
            let observed = Slot::ALL
                .into_iter()
                .filter(|slot| {
                    match explanation
                        .entry(*slot)
                        .and_then(Value::as_str)
                        .and_then(find_correct_answer)
                    {
                        Some(TextMarker::Plain) => true,
                        Some(TextMarker::Negated) => {
                            negated = true;
                            true
                        }
                        None => false,
                    }
                })
                .collect::<Vec<_>>();
            let source = if negated {
                MarkerSource::AmbiguousText
            } else {
                MarkerSource::TextHeuristic
            };
            (observed, source, false)
        }
    };

    let declared_slot = declared.as_deref().and_then(Slot::parse);
    let aligned = match (declared_slot, observed.as_slice()) {
        // 标志齐全却没有一个为真，同样视为不一致
        (_, []) => !flags_promised,
        (Some(slot), [only]) => slot == *only,
        _ => false,
    };
    if aligned {
        return None;
    }

    Some(MismatchReport {
        location: location.to_string(),
        record_id: record_id(question),
        declared,
        observed,
        source,
    })
}

/// 类布尔值：`true`、非零数字、"true"/"yes"/"1"
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
        _ => false,
    }
}

/// 文本中 "correct answer" 的出现方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextMarker {
    /// 直接提到
    Plain,
    /// 只出现在否定说法里
    Negated,
}

/// 大小写不敏感地查找 "correct answer"
///
/// "incorrect answer" 不算；只出现在 "not the correct answer" 这类否定说法里时
/// 仍然算命中，但标记为否定
fn find_correct_answer(text: &str) -> Option<TextMarker> {
    const NEEDLE: &str = "correct answer";
    const NEGATIONS: [&str; 3] = ["not the ", "not a ", "n't the "];

    let lower = text.to_lowercase();
    let mut found = None;
    for (at, _) in lower.match_indices(NEEDLE) {
        let before = &lower[..at];
        let part_of_word = before
            .chars()
            .next_back()
            .is_some_and(char::is_alphanumeric);
        if part_of_word {
            continue;
        }
        if NEGATIONS.iter().any(|neg| before.ends_with(neg)) {
            found = Some(TextMarker::Negated);
        } else {
            return Some(TextMarker::Plain);
        }
    }
    found
}
