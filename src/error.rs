use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 目标循环错误
    #[error("目标循环错误: {0}")]
    Cycle(#[from] CycleError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// 题库文件结构不符合预期
    #[error("题库文件结构无效 ({path}): {reason}")]
    InvalidBank { path: String, reason: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 清单文件解析失败
    #[error("清单文件解析失败 ({path}): {source}")]
    ManifestParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 清单中的循环配置无效
    #[error("题组 {set_id} 的循环配置无效: {source}")]
    InvalidCycle {
        set_id: String,
        #[source]
        source: CycleError,
    },
    /// 规则配置无效
    #[error("规则配置无效: {0}")]
    InvalidRules(String),
}

/// 目标循环错误
///
/// 循环必须是 A/B/C/D 的一个排列
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    /// 长度不是 4
    #[error("循环长度必须为 4，实际为 {0}")]
    WrongLength(usize),
    /// 同一个字母出现多次
    #[error("字母 {0} 重复出现")]
    Duplicate(char),
    /// 无法识别的字母
    #[error("无法识别的选项字母: {0:?}")]
    UnknownLetter(String),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建 JSON 解析错误
    pub fn json_parse_failed(path: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::File(FileError::JsonParseFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建题库结构错误
    pub fn invalid_bank(path: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::File(FileError::InvalidBank {
            path: path.into(),
            reason: reason.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
