//! 选项文本规范化 - 业务能力层
//!
//! 把选项改写成统一的句式，让正确选项和错误选项在开头、长度上看不出差别。
//!
//! 两种风格共用同一套前处理：
//! 1. 去掉已知引导语（如上一次改写留下的 "Claims that "）
//! 2. 处理结尾标点、合并空白
//! 3. 按句切分，只保留前两句
//! 4. 限制最大词数，超出时截断并加省略号
//! 5. 首字母小写（缩写词除外）
//!
//! 然后按风格套用模板，最后保证只有一个句号结尾。

use serde::{Deserialize, Serialize};

use crate::rules::RewriteRules;

/// 截断标记
const ELLIPSIS: &str = "...";

/// 改写风格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    /// 按展示位置轮换动词："Argues that ..."、"Maintains that ..."
    VerbLed,
    /// 按开头连接词分类："Assumes that ..."、"Claims this emphasis ..."
    ClauseClassifier,
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Style::VerbLed => write!(f, "verb-led"),
            Style::ClauseClassifier => write!(f, "clause-classifier"),
        }
    }
}

/// 分句分类风格的输出模板
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseRoute {
    /// "Assumes that {rest}"
    Assumes,
    /// "Claims this emphasis {rest}"
    Emphasis,
    /// "Claims that the model rests on {text}"
    ModelRestsOn,
    /// "Claims that {text}"
    Claims,
}

impl ClauseRoute {
    fn render(self, body: &str) -> String {
        match self {
            ClauseRoute::Assumes => format!("Assumes that {}", body),
            ClauseRoute::Emphasis => format!("Claims this emphasis {}", body),
            ClauseRoute::ModelRestsOn => format!("Claims that the model rests on {}", body),
            ClauseRoute::Claims => format!("Claims that {}", body),
        }
    }
}

/// 规范化一个选项文本
///
/// # 参数
/// - `text`: 原始选项文本
/// - `style`: 改写风格
/// - `position`: 展示位置（0 = A），动词引导风格据此选择动词
/// - `rules`: 规则表
///
/// # 返回
/// 改写后的文本；空白输入返回空串，无法提取内容时返回去除首尾空白的原文
pub fn normalize(text: &str, style: Style, position: usize, rules: &RewriteRules) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let Some(core) = extract_core(trimmed, rules) else {
        return trimmed.to_string();
    };

    let body = match style {
        Style::VerbLed => format!("{} that {}", rules.verb_for(position), core.text),
        Style::ClauseClassifier => classify(&core.text, core.route, rules),
    };
    ensure_terminal_period(body)
}

/// 前处理结果
struct Core {
    text: String,
    route: Option<ClauseRoute>,
}

fn extract_core(trimmed: &str, rules: &RewriteRules) -> Option<Core> {
    let mut text = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut route = None;
    if let Some(lead_in) = rules.match_lead_in(&text) {
        route = lead_in.route;
        text = text[lead_in.phrase.len()..].trim().to_string();
    }

    // 已经带省略号的文本视为截断过的，保留标记
    let mut truncated = false;
    if text.ends_with(ELLIPSIS) {
        text = text.trim_end_matches('.').trim_end().to_string();
        truncated = true;
    } else if text.ends_with('.') {
        text.pop();
    }

    let sentences = split_sentences(&text);
    let core = match sentences.as_slice() {
        [] => return None,
        [first] => first.clone(),
        [first, second, ..] => format!("{} {}", first, second),
    };

    let (mut core, cut) = truncate_words(&core, rules.max_words());
    if cut || truncated {
        core.push_str(ELLIPSIS);
    }

    Some(Core {
        text: lowercase_first(&core),
        route,
    })
}

/// 分句：分号和句末句号都算断句，`U.S.`、`e.g.` 这类带点缩写不断句
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    for part in text.split(';') {
        let mut current: Vec<&str> = Vec::new();
        for word in part.split_whitespace() {
            current.push(word);
            if word.ends_with('.') && !is_dotted_abbreviation(word) {
                push_sentence(&mut sentences, &current);
                current.clear();
            }
        }
        push_sentence(&mut sentences, &current);
    }
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, words: &[&str]) {
    let sentence = words.join(" ");
    let sentence = sentence.trim_end_matches('.').trim_end();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
}

/// 词内还有句点且只由字母和句点组成，如 "U.S."、"e.g."
fn is_dotted_abbreviation(word: &str) -> bool {
    let stem = word.trim_end_matches('.');
    stem.contains('.') && stem.chars().all(|c| c.is_alphabetic() || c == '.')
}

/// 按词数截断
///
/// 超过 `limit` 时只保留前 `limit` 个词，并去掉末尾的 `. , ; :`
fn truncate_words(text: &str, limit: usize) -> (String, bool) {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= limit {
        return (text.to_string(), false);
    }
    let mut trimmed = words[..limit].join(" ");
    if trimmed.ends_with(&['.', ',', ';', ':'][..]) {
        trimmed.pop();
    }
    (trimmed, true)
}

/// 首字母小写；首词是缩写（第二个字符也是大写，如 "EU"）时保持原样
fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if chars.next().is_some_and(char::is_uppercase) {
        return text.to_string();
    }
    first.to_lowercase().chain(text[first.len_utf8()..].chars()).collect()
}

/// 分句分类：先判断因果/目的连接词，再看引导语留下的路由，
/// 然后判断形容词开头，最后走通用模板
fn classify(core: &str, hint: Option<ClauseRoute>, rules: &RewriteRules) -> String {
    if let Some(rest) = core.strip_prefix("because ") {
        return ClauseRoute::Assumes.render(rest);
    }

    if let Some(rest) = core.strip_prefix("to ") {
        let rest = match rest.strip_prefix("support ") {
            Some(object) => format!("supports {}", object),
            None => rest.to_string(),
        };
        return ClauseRoute::Emphasis.render(&rest);
    }

    let core = core.strip_prefix("so ").unwrap_or(core);

    if let Some(rest) = core.strip_prefix("support ") {
        return ClauseRoute::Emphasis.render(&format!("supports {}", rest));
    }

    if let Some(route) = hint {
        return route.render(core);
    }

    let first_word = core
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .trim_end_matches(',')
        .to_lowercase();
    if rules.is_adjective_opener(&first_word) {
        return ClauseRoute::ModelRestsOn.render(core);
    }

    ClauseRoute::Claims.render(core)
}

/// 保证以一个句号结尾
fn ensure_terminal_period(mut text: String) -> String {
    if !text.ends_with('.') {
        text.push('.');
    }
    text
}
