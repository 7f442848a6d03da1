use serde::{Deserialize, Serialize};

/// `git status --porcelain` 的单行记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    /// 两字符状态码，如 " M"、"A "、"??"
    pub status_code: String,
    pub path: String,
}

/// 仓库状态快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitStatus {
    pub branch: String,
    pub files: Vec<StatusEntry>,
    pub has_staged: bool,
    pub has_unstaged: bool,
}

impl GitStatus {
    pub fn is_clean(&self) -> bool {
        self.files.is_empty()
    }
}

/// 解析 porcelain v1 输出
///
/// 状态码首列是暂存区状态，次列是工作区状态；`??` 的未跟踪文件
/// 不算已暂存，但算有未暂存变更。
pub fn parse_porcelain(output: &str, branch: &str) -> GitStatus {
    let mut files = Vec::new();

    for line in output.lines() {
        if line.len() < 4 {
            continue;
        }
        let status_code = &line[..2];
        let path = &line[3..];
        files.push(StatusEntry {
            status_code: status_code.to_string(),
            path: path.to_string(),
        });
    }

    let has_staged = files.iter().any(|f| {
        let first = f.status_code.chars().next().unwrap_or(' ');
        first != ' ' && first != '?'
    });
    let has_unstaged = files
        .iter()
        .any(|f| f.status_code.chars().nth(1).unwrap_or(' ') != ' ');

    GitStatus {
        branch: branch.to_string(),
        files,
        has_staged,
        has_unstaged,
    }
}
