use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static FILE_HEADER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^diff --git a/(.+?) b/(.+?)$").unwrap());

/// 单个文件的变更状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
}

/// 解析 diff 得到的单文件记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub status: ChangeStatus,
    pub additions: usize,
    pub deletions: usize,
}

impl FileChange {
    pub fn new(path: impl Into<String>, status: ChangeStatus) -> Self {
        FileChange {
            path: path.into(),
            status,
            additions: 0,
            deletions: 0,
        }
    }
}

/// 解析 `git diff --cached` 的输出为文件变更列表
///
/// 状态判定：`new file mode` → Added，`deleted file mode` → Deleted，
/// 头部里 a/ 与 b/ 路径不同 → Renamed，其余为 Modified。
/// `+++`/`---` 头部行不计入增删行数。
pub fn parse_diff(diff: &str) -> Vec<FileChange> {
    let mut changes: Vec<FileChange> = Vec::new();
    let mut current: Option<FileChange> = None;

    for line in diff.lines() {
        if let Some(captures) = FILE_HEADER_REGEX.captures(line) {
            if let Some(change) = current.take() {
                changes.push(change);
            }

            let old_path = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            let new_path = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
            let status = if old_path != new_path {
                ChangeStatus::Renamed
            } else {
                ChangeStatus::Modified
            };
            current = Some(FileChange::new(new_path, status));
        } else if let Some(change) = current.as_mut() {
            if line.starts_with("new file mode") {
                change.status = ChangeStatus::Added;
            } else if line.starts_with("deleted file mode") {
                change.status = ChangeStatus::Deleted;
            } else if line.starts_with("rename from") {
                change.status = ChangeStatus::Renamed;
            } else if line.starts_with('+') && !line.starts_with("+++") {
                change.additions += 1;
            } else if line.starts_with('-') && !line.starts_with("---") {
                change.deletions += 1;
            }
        }
    }

    if let Some(change) = current {
        changes.push(change);
    }

    changes
}

/// 判断 diff 的变更行是否仅有空白差异
///
/// 启发式：去掉所有空白后，删除行的拼接与新增行的拼接完全一致。
pub fn is_whitespace_only(diff: &str) -> bool {
    let mut removed = String::new();
    let mut added = String::new();
    let mut has_change_line = false;

    for line in diff.lines() {
        if line.starts_with('+') && !line.starts_with("+++") {
            has_change_line = true;
            added.extend(line[1..].chars().filter(|c| !c.is_whitespace()));
        } else if line.starts_with('-') && !line.starts_with("---") {
            has_change_line = true;
            removed.extend(line[1..].chars().filter(|c| !c.is_whitespace()));
        }
    }

    has_change_line && removed == added
}

/// 遍历 diff 中的新增内容行（去掉前导 '+'）
pub fn added_lines(diff: &str) -> impl Iterator<Item = &str> {
    diff.lines()
        .filter(|line| line.starts_with('+') && !line.starts_with("+++"))
        .map(|line| &line[1..])
}
