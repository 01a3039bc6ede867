use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;

use crate::error::{AppError, AppResult};
use crate::models::bank::QuestionBank;
use crate::services::normalizer::Style;

/// 从 JSON 文件加载题库
///
/// 文件不存在时返回 `Ok(None)`，由调用方静默跳过
pub async fn load_bank(path: &Path, style: Style) -> AppResult<Option<QuestionBank>> {
    let location = path.display().to_string();
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("文件不存在，跳过: {}", location);
            return Ok(None);
        }
        Err(e) => return Err(AppError::file_read_failed(location, e)),
    };

    let document: Value =
        serde_json::from_str(&content).map_err(|e| AppError::json_parse_failed(&location, e))?;

    let bank = QuestionBank::new(path, style, document);
    tracing::info!(
        "正在加载: {} ({} 个题目)",
        bank.set_id,
        bank.questions().len()
    );
    Ok(Some(bank))
}

/// 序列化题库：两空格缩进、保持键顺序、非 ASCII 原样输出、结尾恰好一个换行
pub fn render_bank(document: &Value) -> Result<String, serde_json::Error> {
    let mut rendered = serde_json::to_string_pretty(document)?;
    rendered.push('\n');
    Ok(rendered)
}

/// 写回题库文件
///
/// 先写同目录下的临时文件再重命名，保证文件不会只写了一半
pub async fn save_bank(bank: &QuestionBank) -> AppResult<()> {
    let location = bank.location();
    let rendered =
        render_bank(&bank.document).map_err(|e| AppError::json_parse_failed(&location, e))?;

    let temp_path = temp_path_for(&bank.path);
    fs::write(&temp_path, rendered)
        .await
        .map_err(|e| AppError::file_write_failed(temp_path.display().to_string(), e))?;

    if let Err(e) = fs::rename(&temp_path, &bank.path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(AppError::file_write_failed(location, e));
    }

    tracing::debug!("已写回: {}", location);
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
