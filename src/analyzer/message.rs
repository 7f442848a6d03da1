use serde::{Deserialize, Serialize};

use super::classifier::CommitType;
use super::diff::FileChange;
use crate::infrastructure::SuggestError;

/// 格式化完成的提交消息
///
/// 不变量：text 一定以八种类型标记之一开头。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMessage {
    pub text: String,
}

/// 按 `type(scope): description` 拼接消息
///
/// 校验规则只有两条：类型标记必须可识别，描述去除首尾空白后不能为空。
/// 描述除 trim 外原样透传，不做大小写改写。
pub fn generate(
    commit_type: &str,
    scope: &str,
    description: &str,
) -> Result<CommitMessage, SuggestError> {
    let commit_type = CommitType::parse(commit_type).ok_or_else(|| {
        SuggestError::invalid_input(format!(
            "unrecognized commit type '{}'. Valid types: {}",
            commit_type.trim(),
            CommitType::ALL
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })?;

    let description = description.trim();
    if description.is_empty() {
        return Err(SuggestError::invalid_input("description cannot be empty"));
    }

    let scope = scope.trim();
    let scope = if scope.is_empty() { None } else { Some(scope) };
    Ok(format_message(commit_type, scope, description))
}

/// 类型已解析时的无错版本，供分类器的建议路径使用
pub fn format_message(
    commit_type: CommitType,
    scope: Option<&str>,
    description: &str,
) -> CommitMessage {
    let text = match scope {
        Some(scope) if !scope.is_empty() => {
            format!("{}({}): {}", commit_type.as_str(), scope, description)
        }
        _ => format!("{}: {}", commit_type.as_str(), description),
    };
    CommitMessage { text }
}

/// 调用方未提供描述时，从文件列表生成默认描述
pub fn suggested_description(files: &[FileChange]) -> String {
    match files.len() {
        0 => "update files".to_string(),
        1 => format!("update {}", files[0].path),
        n if n <= 3 => {
            let names: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
            format!("update {}", names.join(", "))
        }
        n => format!("update {} files", n),
    }
}
