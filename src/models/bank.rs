use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::services::normalizer::Style;

/// 一个题库文件（一个题组）
///
/// 整份 JSON 文档原样保存在 `document` 中，处理时只改写题目里的相关字段
#[derive(Debug, Clone)]
pub struct QuestionBank {
    /// 文件路径
    pub path: PathBuf,
    /// 题组标识（文件名），用于查找目标循环
    pub set_id: String,
    /// 选项改写风格
    pub style: Style,
    /// 原始文档
    pub document: Value,
}

impl QuestionBank {
    pub fn new(path: impl Into<PathBuf>, style: Style, document: Value) -> Self {
        let path = path.into();
        let set_id = set_id_for(&path);
        Self {
            path,
            set_id,
            style,
            document,
        }
    }

    /// 题目列表（只读）
    pub fn questions(&self) -> &[Value] {
        self.document
            .get("questions")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 题目列表（可变）；文档中没有 `questions` 数组时返回 `None`
    pub fn questions_mut(&mut self) -> Option<&mut Vec<Value>> {
        self.document
            .get_mut("questions")
            .and_then(Value::as_array_mut)
    }

    /// 用于日志和报告的位置描述
    pub fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// 由文件路径得到题组标识
pub fn set_id_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}
