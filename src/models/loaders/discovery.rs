use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use regex::Regex;
use tokio::fs;

use crate::config::{FileGroup, Manifest};
use crate::error::{AppError, AppResult, ConfigError};
use crate::services::normalizer::Style;

/// 待处理的题库文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankTarget {
    pub path: PathBuf,
    pub style: Style,
    /// 所属分组名
    pub group: String,
}

/// 按清单列出所有待处理的题库文件
///
/// 显式列出的文件即使不存在也会返回（加载时静默跳过）；
/// 按正则匹配时目录不存在则视为没有文件
pub async fn discover_banks(root: &Path, manifest: &Manifest) -> AppResult<Vec<BankTarget>> {
    let mut targets = Vec::new();
    for group in &manifest.groups {
        let pattern = compile_pattern(group)?;
        for directory in &group.directories {
            let dir = root.join(directory);

            for file in &group.files {
                targets.push(BankTarget {
                    path: dir.join(file),
                    style: group.style,
                    group: group.name.clone(),
                });
            }

            if let Some(pattern) = &pattern {
                for path in list_matching(&dir, pattern).await? {
                    targets.push(BankTarget {
                        path,
                        style: group.style,
                        group: group.name.clone(),
                    });
                }
            }
        }
    }

    tracing::debug!("清单共列出 {} 个文件", targets.len());
    Ok(targets)
}

fn compile_pattern(group: &FileGroup) -> AppResult<Option<Regex>> {
    group
        .pattern
        .as_deref()
        .map(|pattern| {
            Regex::new(pattern).map_err(|e| {
                AppError::from(ConfigError::InvalidRules(format!(
                    "分组 {} 的文件名正则无效: {}",
                    group.name, e
                )))
            })
        })
        .transpose()
}

/// 列出目录中文件名匹配正则的文件，按名称排序
async fn list_matching(dir: &Path, pattern: &Regex) -> AppResult<Vec<PathBuf>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("目录不存在，跳过: {}", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(AppError::file_read_failed(dir.display().to_string(), e)),
    };

    let mut matched = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(dir.display().to_string(), e))?
    {
        let path = entry.path();
        let is_match = path
            .file_name()
            .and_then(|s| s.to_str())
            .is_some_and(|name| pattern.is_match(name));
        if is_match && path.is_file() {
            matched.push(path);
        }
    }
    matched.sort();
    Ok(matched)
}
