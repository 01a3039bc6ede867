//! 题目记录
//!
//! 外部 JSON 以字母为键（`"A"`..`"D"`），内部统一转换为按位置索引的
//! 定长数组，交换两个选项只需一次 `swap`。字母键格式只在读写边界出现。

use serde_json::{Map, Value};

use crate::models::slot::{Slot, SLOT_COUNT};

/// 解析说明字段的形态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplanationShape {
    /// `explanation.incorrect`：字母 → 错误原因文本
    IncorrectText,
    /// `explanation.options`：字母 → `{ text, is_correct }` 对象
    PerOption,
}

impl ExplanationShape {
    /// 在 `explanation` 对象中的键名
    pub fn key(self) -> &'static str {
        match self {
            ExplanationShape::IncorrectText => "incorrect",
            ExplanationShape::PerOption => "options",
        }
    }
}

/// 按位置索引的解析说明
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    pub shape: ExplanationShape,
    /// `None` 表示原数据中缺少该字母的条目
    pub entries: [Option<Value>; SLOT_COUNT],
}

impl Explanation {
    /// 交换两个位置的条目（缺失的条目也随之移动）
    pub fn swap(&mut self, a: Slot, b: Slot) {
        self.entries.swap(a.index(), b.index());
    }

    pub fn entry(&self, slot: Slot) -> Option<&Value> {
        self.entries[slot.index()].as_ref()
    }
}

/// 题目记录
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionRecord {
    /// 题目 ID（仅用于日志和报告，不会回写）
    pub id: String,
    /// 四个选项文本，按 A→D 排列
    pub options: [String; SLOT_COUNT],
    /// 当前正确答案位置
    pub correct: Slot,
    /// 解析说明（两种形态之一，或不存在）
    pub explanation: Option<Explanation>,
}

/// 题目不满足重排条件的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ineligible {
    /// 题目不是 JSON 对象
    NotAnObject,
    /// 缺少 `options` 对象
    MissingOptions,
    /// 缺少某个选项（或选项不是文本）
    MissingSlot(Slot),
}

impl std::fmt::Display for Ineligible {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ineligible::NotAnObject => write!(f, "题目不是对象"),
            Ineligible::MissingOptions => write!(f, "缺少 options 字段"),
            Ineligible::MissingSlot(slot) => write!(f, "缺少选项 {}", slot),
        }
    }
}

impl QuestionRecord {
    /// 从 JSON 题目对象读取
    ///
    /// `correct_answer` 缺失或无法识别时默认为 A
    pub fn from_json(value: &Value) -> Result<Self, Ineligible> {
        let obj = value.as_object().ok_or(Ineligible::NotAnObject)?;
        let options_map = obj
            .get("options")
            .and_then(Value::as_object)
            .ok_or(Ineligible::MissingOptions)?;

        let mut options: [String; SLOT_COUNT] = Default::default();
        for slot in Slot::ALL {
            let text = options_map
                .get(slot.key())
                .and_then(Value::as_str)
                .ok_or(Ineligible::MissingSlot(slot))?;
            options[slot.index()] = text.to_string();
        }

        let correct = obj
            .get("correct_answer")
            .and_then(Value::as_str)
            .and_then(Slot::parse)
            .unwrap_or(Slot::A);

        Ok(Self {
            id: record_id(value),
            options,
            correct,
            explanation: read_explanation(obj),
        })
    }

    /// 将记录写回原 JSON 对象
    ///
    /// 只改写 `options`、`correct_answer` 与对应形态的解析说明，
    /// 其余字段原样保留。字母键按 A→D 重新排列，非字母键追加在后面。
    pub fn write_into(&self, value: &mut Value) {
        let Some(obj) = value.as_object_mut() else {
            return;
        };

        // 原字段缺失且正确答案仍是 A 时不补写；其余情况必须是规范的 A-D
        let declared = match obj.get("correct_answer") {
            None => Some(Slot::A),
            Some(raw) => raw.as_str().and_then(Slot::from_letter),
        };
        if declared != Some(self.correct) {
            obj.insert(
                "correct_answer".to_string(),
                Value::String(self.correct.key().to_string()),
            );
        }

        let mut options = Map::new();
        for slot in Slot::ALL {
            options.insert(
                slot.key().to_string(),
                Value::String(self.options[slot.index()].clone()),
            );
        }
        if let Some(old) = obj.get("options").and_then(Value::as_object) {
            options.extend(non_slot_entries(old));
        }
        obj.insert("options".to_string(), Value::Object(options));

        let Some(explanation) = &self.explanation else {
            return;
        };
        let Some(expl_obj) = obj.get_mut("explanation").and_then(Value::as_object_mut) else {
            return;
        };

        let mut entries = Map::new();
        for slot in Slot::ALL {
            match &explanation.entries[slot.index()] {
                Some(entry) => {
                    entries.insert(slot.key().to_string(), entry.clone());
                }
                // 只有错误原因文本会补空串；is_correct 对象缺失时保持缺失
                None if explanation.shape == ExplanationShape::IncorrectText => {
                    entries.insert(slot.key().to_string(), Value::String(String::new()));
                }
                None => {}
            }
        }
        if let Some(old) = expl_obj.get(explanation.shape.key()).and_then(Value::as_object) {
            entries.extend(non_slot_entries(old));
        }
        expl_obj.insert(explanation.shape.key().to_string(), Value::Object(entries));
    }
}

/// 题目 ID 的展示形式
pub fn record_id(value: &Value) -> String {
    match value.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "<无ID>".to_string(),
        Some(other) => other.to_string(),
    }
}

/// 读取解析说明，优先识别 `options` 形态
pub fn read_explanation(obj: &Map<String, Value>) -> Option<Explanation> {
    let expl = obj.get("explanation")?.as_object()?;
    [ExplanationShape::PerOption, ExplanationShape::IncorrectText]
        .into_iter()
        .find_map(|shape| {
            let map = expl.get(shape.key())?.as_object()?;
            if map.is_empty() {
                return None;
            }
            Some(Explanation {
                shape,
                entries: Slot::ALL.map(|slot| map.get(slot.key()).cloned()),
            })
        })
}

fn non_slot_entries(map: &Map<String, Value>) -> Vec<(String, Value)> {
    map.iter()
        .filter(|(key, _)| Slot::from_letter(key).is_none())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "id": "q-7",
            "stem": "Which court?",
            "options": { "B": "Second", "A": "First", "D": "Fourth", "C": "Third", "note": "keep" },
            "correct_answer": "C",
            "explanation": {
                "correct": "Because.",
                "incorrect": { "A": "Wrong A", "D": "Wrong D" }
            },
            "difficulty": 3
        })
    }

    #[test]
    fn test_from_json_reads_slots_in_canonical_order() {
        let record = QuestionRecord::from_json(&sample()).unwrap();
        assert_eq!(record.id, "q-7");
        assert_eq!(record.options, ["First", "Second", "Third", "Fourth"].map(String::from));
        assert_eq!(record.correct, Slot::C);

        let expl = record.explanation.unwrap();
        assert_eq!(expl.shape, ExplanationShape::IncorrectText);
        assert_eq!(expl.entry(Slot::A), Some(&json!("Wrong A")));
        assert_eq!(expl.entry(Slot::B), None);
    }

    #[test]
    fn test_missing_slot_is_ineligible() {
        let value = json!({ "id": 1, "options": { "A": "a", "B": "b", "C": "c" } });
        assert_eq!(
            QuestionRecord::from_json(&value),
            Err(Ineligible::MissingSlot(Slot::D))
        );
        assert_eq!(
            QuestionRecord::from_json(&json!({ "id": 1 })),
            Err(Ineligible::MissingOptions)
        );
    }

    #[test]
    fn test_missing_correct_answer_defaults_to_a() {
        let value = json!({ "options": { "A": "a", "B": "b", "C": "c", "D": "d" } });
        let record = QuestionRecord::from_json(&value).unwrap();
        assert_eq!(record.correct, Slot::A);
        assert_eq!(record.id, "<无ID>");
        assert!(record.explanation.is_none());
    }

    #[test]
    fn test_write_into_preserves_unrelated_fields_and_order() {
        let mut value = sample();
        let record = QuestionRecord::from_json(&value).unwrap();
        record.write_into(&mut value);

        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            ["id", "stem", "options", "correct_answer", "explanation", "difficulty"]
        );
        let option_keys: Vec<&String> = value["options"].as_object().unwrap().keys().collect();
        assert_eq!(option_keys, ["A", "B", "C", "D", "note"]);
        assert_eq!(value["explanation"]["correct"], json!("Because."));
        // 错误原因文本补齐空串
        assert_eq!(
            value["explanation"]["incorrect"],
            json!({ "A": "Wrong A", "B": "", "C": "", "D": "Wrong D" })
        );
    }

    #[test]
    fn test_per_option_shape_is_never_backfilled() {
        let mut value = json!({
            "id": "x",
            "options": { "A": "a", "B": "b", "C": "c", "D": "d" },
            "correct_answer": "A",
            "explanation": { "options": {
                "A": { "text": "yes", "is_correct": true },
                "C": { "text": "no", "is_correct": false }
            } }
        });
        let record = QuestionRecord::from_json(&value).unwrap();
        record.write_into(&mut value);

        let keys: Vec<&String> = value["explanation"]["options"]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys, ["A", "C"]);
    }

    #[test]
    fn test_defaulted_correct_answer_is_not_added_when_unchanged() {
        let mut value = json!({ "id": "x", "options": { "A": "a", "B": "b", "C": "c", "D": "d" } });
        let record = QuestionRecord::from_json(&value).unwrap();
        record.write_into(&mut value);
        assert!(value.get("correct_answer").is_none());
    }

    #[test]
    fn test_non_canonical_correct_answer_is_normalized_on_write() {
        for raw in [json!("E"), json!(" b "), json!(2), json!(null)] {
            let mut value = json!({
                "id": "x",
                "options": { "A": "a", "B": "b", "C": "c", "D": "d" },
                "correct_answer": raw.clone()
            });
            let record = QuestionRecord::from_json(&value).unwrap();
            record.write_into(&mut value);
            assert_eq!(
                value["correct_answer"],
                json!(record.correct.key()),
                "原值: {}",
                raw
            );
        }
    }
}
