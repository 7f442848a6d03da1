pub mod classifier;
pub mod diff;
pub mod message;

pub use classifier::{classify, ChangeAnalysis, CommitType};
pub use diff::{parse_diff, ChangeStatus, FileChange};
pub use message::{generate, suggested_description, CommitMessage};

use serde::Serialize;

/// 对暂存 diff 的完整分析结果：分类 + 建议的提交消息
#[derive(Debug, Serialize)]
pub struct StagedSuggestion {
    pub analysis: ChangeAnalysis,
    pub suggested_message: CommitMessage,
}

/// 从原始 diff 文本生成建议
///
/// diff 中解析不出任何文件时返回 None（"无暂存变更"由调用方处理，
/// 分类器本身不会失败）。
pub fn suggest_from_diff(diff: &str, hint: Option<&str>) -> Option<StagedSuggestion> {
    let files = parse_diff(diff);
    if files.is_empty() {
        return None;
    }

    let analysis = classify(&files, diff, hint);
    let description = suggested_description(&analysis.files);
    let suggested_message = message::format_message(analysis.commit_type, analysis.scope.as_deref(), &description);

    Some(StagedSuggestion {
        analysis,
        suggested_message,
    })
}
