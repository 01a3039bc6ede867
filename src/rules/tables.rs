//! 内置规则表
//!
//! 只用来初始化 `RewriteRules` 和 `CycleTable`，引擎本身不直接读取这些静态表

use phf::{phf_map, phf_set};

use crate::models::slot::{Slot, SLOT_COUNT};
use crate::services::normalizer::ClauseRoute;

/// 选项改写后的最大词数
pub const DEFAULT_MAX_WORDS: usize = 38;

/// 动词引导风格：按展示位置轮换的开头动词
pub const OPENER_VERBS: [&str; 4] = ["Argues", "Maintains", "Contends", "Posits"];

/// 已知的引导语（大小写不敏感）
///
/// 带路由的条目是分句分类风格自己的输出模板，再次处理时按原路由输出
pub const LEAD_INS: &[(&str, Option<ClauseRoute>)] = &[
    ("Claims that the model rests on ", Some(ClauseRoute::ModelRestsOn)),
    ("Claims this emphasis ", Some(ClauseRoute::Emphasis)),
    ("Advocates for ", None),
    ("Advocates ", None),
    ("Assumes that ", Some(ClauseRoute::Assumes)),
    ("Suggests that ", None),
    ("Maintains that ", None),
    ("Positions ", None),
    ("Claims that ", None),
];

/// 形容词类开头：命中时改写为 "Claims that the model rests on ..."
pub static ADJECTIVE_OPENERS: phf::Set<&'static str> = phf_set! {
    "large",
    "small",
    "purely",
    "general",
    "exclusive",
    "codified",
    "resident",
    "doctrinal",
    "investigative",
    "comprehensive",
    "broad",
    "narrow",
    "formal",
    "written",
    "constant",
    "subjective",
    "state",
    "private",
    "historic",
    "historically",
    "technical",
    "modular",
    "layered",
    "jury-centric",
};

/// 各题组的目标循环（按文件名）
pub static DEFAULT_CYCLES: phf::Map<&'static str, [Slot; SLOT_COUNT]> = phf_map! {
    "clk-lt-module1-questions.json" => [Slot::C, Slot::A, Slot::D, Slot::B],
    "clk-lt-module2-questions.json" => [Slot::A, Slot::D, Slot::B, Slot::C],
    "clk-lt-module3-questions.json" => [Slot::D, Slot::B, Slot::C, Slot::A],
    "clk-lt-module4-questions.json" => [Slot::B, Slot::C, Slot::A, Slot::D],
    // 各模块错开排列，让整体分布更平滑
    "csk5-module1-questions.json" => [Slot::A, Slot::C, Slot::D, Slot::B],
    "csk5-module2-questions.json" => [Slot::C, Slot::A, Slot::B, Slot::D],
    "csk5-module3-questions.json" => [Slot::D, Slot::B, Slot::A, Slot::C],
    "csk5-module4-questions.json" => [Slot::B, Slot::D, Slot::C, Slot::A],
    "csk5-module5-questions.json" => [Slot::C, Slot::D, Slot::A, Slot::B],
};
