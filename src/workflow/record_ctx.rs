//! 题目处理上下文
//!
//! 封装"我正在处理哪个题组的第几题"这一信息

use std::fmt::Display;

/// 题目处理上下文
#[derive(Debug, Clone)]
pub struct RecordCtx {
    /// 题组标识（文件名）
    pub set_id: String,

    /// 文件序号（仅用于日志显示）
    pub file_index: usize,

    /// 题目在题组中的位置（从0开始，决定目标位置）
    pub position: usize,
}

impl RecordCtx {
    /// 创建新的题目上下文
    pub fn new(set_id: impl Into<String>, file_index: usize, position: usize) -> Self {
        Self {
            set_id: set_id.into(),
            file_index,
            position,
        }
    }
}

impl Display for RecordCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[文件 #{} 题组 {} 题目 #{}]",
            self.file_index,
            self.set_id,
            self.position + 1
        )
    }
}
