use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult, ConfigError};
use crate::rules::{CycleTable, RewriteRules};
use crate::services::normalizer::Style;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 题库根目录，清单中的相对路径都基于它
    pub bank_root: String,
    /// 清单文件路径；为空时使用内置清单
    pub manifest_path: Option<String>,
    /// 同时处理的文件数量
    pub max_concurrent_files: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 运行日志文件
    pub output_log_file: String,
    /// 只处理不写回
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bank_root: ".".to_string(),
            manifest_path: None,
            max_concurrent_files: 4,
            verbose_logging: false,
            output_log_file: "rebalance.log".to_string(),
            dry_run: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            bank_root: std::env::var("BANK_ROOT").unwrap_or(default.bank_root),
            manifest_path: std::env::var("REBALANCE_MANIFEST").ok().or(default.manifest_path),
            max_concurrent_files: std::env::var("MAX_CONCURRENT_FILES").ok().and_then(|v| v.parse().ok()).filter(|n| *n > 0).unwrap_or(default.max_concurrent_files),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            dry_run: std::env::var("DRY_RUN").ok().and_then(|v| v.parse().ok()).unwrap_or(default.dry_run),
        }
    }
}

/// 一组题库文件
#[derive(Clone, Debug, Deserialize)]
pub struct FileGroup {
    /// 组名（仅用于日志）
    pub name: String,
    /// 改写风格
    pub style: Style,
    /// 所在目录（相对于题库根目录）
    pub directories: Vec<String>,
    /// 显式列出的文件名
    #[serde(default)]
    pub files: Vec<String>,
    /// 文件名正则，匹配的文件按名称排序后加入
    #[serde(default)]
    pub pattern: Option<String>,
}

/// 规则覆盖
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RulesSection {
    pub max_words: Option<usize>,
    pub verbs: Option<Vec<String>>,
    #[serde(default)]
    pub extra_adjective_openers: Vec<String>,
}

/// 处理清单
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Manifest {
    /// 为空时使用内置分组
    #[serde(default)]
    pub groups: Vec<FileGroup>,
    /// 题组标识 → 循环字母
    #[serde(default)]
    pub cycles: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub rules: RulesSection,
}

impl Manifest {
    /// 内置清单：法律与科技模块（动词引导）+ CSK-5 模块（分句分类）
    pub fn builtin() -> Self {
        Self {
            groups: builtin_groups(),
            cycles: BTreeMap::new(),
            rules: RulesSection::default(),
        }
    }

    /// 从 TOML 文本解析
    pub fn from_toml_str(content: &str, path: &str) -> AppResult<Self> {
        let mut manifest: Manifest =
            toml::from_str(content).map_err(|source| ConfigError::ManifestParseFailed {
                path: path.to_string(),
                source,
            })?;
        if manifest.groups.is_empty() {
            manifest.groups = builtin_groups();
        }
        Ok(manifest)
    }

    /// 从 TOML 文件加载
    pub async fn load(path: &Path) -> AppResult<Self> {
        let location = path.display().to_string();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::file_read_failed(&location, e))?;
        Self::from_toml_str(&content, &location)
    }

    /// 构建改写规则
    pub fn rewrite_rules(&self) -> AppResult<RewriteRules> {
        let mut rules = RewriteRules::default();
        if let Some(max_words) = self.rules.max_words {
            rules = rules.with_max_words(max_words)?;
        }
        if let Some(verbs) = &self.rules.verbs {
            rules = rules.with_verbs(verbs.clone())?;
        }
        Ok(rules.with_extra_adjective_openers(&self.rules.extra_adjective_openers))
    }

    /// 构建循环表（内置 + 清单覆盖）
    pub fn cycle_table(&self) -> AppResult<CycleTable> {
        Ok(CycleTable::default().with_overrides(&self.cycles)?)
    }
}

fn builtin_groups() -> Vec<FileGroup> {
    vec![
        FileGroup {
            name: "clk-lt".to_string(),
            style: Style::VerbLed,
            directories: vec![
                "Question Bank Raw/5 Contemporary Legal Knowledge/2 Laws and Technology"
                    .to_string(),
                "QUESTION BANK PLATFORM".to_string(),
            ],
            files: (1..=4)
                .map(|i| format!("clk-lt-module{}-questions.json", i))
                .collect(),
            pattern: None,
        },
        FileGroup {
            name: "csk5".to_string(),
            style: Style::ClauseClassifier,
            directories: vec!["Question Bank Raw/5 Contemporary Legal Knowledge/5 CSK-5".to_string()],
            files: Vec::new(),
            pattern: Some(r"^csk5-module.*-questions\.json$".to_string()),
        },
    ]
}
