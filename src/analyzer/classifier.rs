use glob::Pattern;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::diff::{added_lines, is_whitespace_only, ChangeStatus, FileChange};

/// 约定式提交的八种类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Chore,
}

impl CommitType {
    pub const ALL: [CommitType; 8] = [
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Docs,
        CommitType::Style,
        CommitType::Refactor,
        CommitType::Perf,
        CommitType::Test,
        CommitType::Chore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
        }
    }

    /// 解析类型标记，未识别的标记返回 None
    pub fn parse(token: &str) -> Option<CommitType> {
        match token.trim() {
            "feat" => Some(CommitType::Feat),
            "fix" => Some(CommitType::Fix),
            "docs" => Some(CommitType::Docs),
            "style" => Some(CommitType::Style),
            "refactor" => Some(CommitType::Refactor),
            "perf" => Some(CommitType::Perf),
            "test" => Some(CommitType::Test),
            "chore" => Some(CommitType::Chore),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CommitType::Feat => "A new feature",
            CommitType::Fix => "A bug fix",
            CommitType::Docs => "Documentation only changes",
            CommitType::Style => "Changes that do not affect the meaning of the code",
            CommitType::Refactor => "A code change that neither fixes a bug nor adds a feature",
            CommitType::Perf => "A code change that improves performance",
            CommitType::Test => "Adding missing tests or correcting existing tests",
            CommitType::Chore => "Changes to the build process or auxiliary tools",
        }
    }
}

impl std::fmt::Display for CommitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 分类结果
#[derive(Debug, Clone, Serialize)]
pub struct ChangeAnalysis {
    pub commit_type: CommitType,
    pub scope: Option<String>,
    pub files: Vec<FileChange>,
    pub total_additions: usize,
    pub total_deletions: usize,
}

impl ChangeAnalysis {
    pub fn summary(&self) -> String {
        format!(
            "{} files changed, +{} -{}",
            self.files.len(),
            self.total_additions,
            self.total_deletions
        )
    }
}

/// 规则的输入快照
struct RuleInput<'a> {
    files: &'a [FileChange],
    diff: &'a str,
    hint: Option<&'a str>,
    total_additions: usize,
    total_deletions: usize,
}

/// 优先级规则表，自上而下求值，首个命中者胜出
///
/// 顺序即契约：空白类变更（规则 4）永远排在测试/文档/工具类之后，
/// refactor（规则 7）排在所有明确信号之后。调整顺序前先看测试。
static RULES: &[(&str, CommitType, fn(&RuleInput) -> bool)] = &[
    ("all-test-files", CommitType::Test, rule_all_test_files),
    ("all-doc-files", CommitType::Docs, rule_all_doc_files),
    ("tooling-only", CommitType::Chore, rule_tooling_only),
    ("whitespace-only", CommitType::Style, rule_whitespace_only),
    ("new-source-file", CommitType::Feat, rule_new_source_file),
    ("fix-signal", CommitType::Fix, rule_fix_signal),
    ("shrinking-module", CommitType::Refactor, rule_shrinking_module),
];

/// 对一组文件变更进行分类
///
/// 永不失败：信号不足或冲突时退化为 chore。空输入同样返回 chore，
/// "无变更"条件由调用方在解析阶段处理。
pub fn classify(files: &[FileChange], diff: &str, hint: Option<&str>) -> ChangeAnalysis {
    let total_additions = files.iter().map(|f| f.additions).sum();
    let total_deletions = files.iter().map(|f| f.deletions).sum();

    let mut commit_type = CommitType::Chore;
    if !files.is_empty() {
        let input = RuleInput {
            files,
            diff,
            hint,
            total_additions,
            total_deletions,
        };
        for (name, candidate, predicate) in RULES {
            if predicate(&input) {
                tracing::debug!(rule = name, commit_type = %candidate, "classification rule matched");
                commit_type = *candidate;
                break;
            }
        }
    }

    ChangeAnalysis {
        commit_type,
        scope: infer_scope(files),
        files: files.to_vec(),
        total_additions,
        total_deletions,
    }
}

// ---------------------------------------------------------------------------
// 规则谓词
// ---------------------------------------------------------------------------

fn rule_all_test_files(input: &RuleInput) -> bool {
    input.files.iter().all(|f| is_test_path(&f.path))
}

fn rule_all_doc_files(input: &RuleInput) -> bool {
    input.files.iter().all(|f| is_doc_path(&f.path))
}

fn rule_tooling_only(input: &RuleInput) -> bool {
    input.files.iter().any(|f| is_tooling_path(&f.path))
        && !input.files.iter().any(|f| is_source_file(&f.path))
}

fn rule_whitespace_only(input: &RuleInput) -> bool {
    is_whitespace_only(input.diff)
}

fn rule_new_source_file(input: &RuleInput) -> bool {
    input
        .files
        .iter()
        .any(|f| f.status == ChangeStatus::Added && in_source_dir(&f.path))
}

fn rule_fix_signal(input: &RuleInput) -> bool {
    if let Some(hint) = input.hint {
        if FIX_TOKEN_REGEX.is_match(hint) {
            return true;
        }
    }
    FIX_TOKEN_REGEX.is_match(input.diff)
}

fn rule_shrinking_module(input: &RuleInput) -> bool {
    infer_scope(input.files).is_some()
        && input.total_deletions > input.total_additions
        && !has_new_public_symbol(input.diff)
}

// ---------------------------------------------------------------------------
// 路径与文本模式
// ---------------------------------------------------------------------------

const SOURCE_DIRS: [&str; 5] = ["src", "lib", "crates", "app", "pkg"];

const SOURCE_EXTENSIONS: [&str; 20] = [
    "rs", "py", "js", "jsx", "ts", "tsx", "go", "java", "c", "h", "cc", "cpp", "hpp", "rb", "php",
    "swift", "kt", "cs", "scala", "vue",
];

static TOOLING_PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    [
        "Cargo.toml",
        "**/Cargo.toml",
        "Cargo.lock",
        "package.json",
        "**/package.json",
        "**/*.lock",
        "*.lock",
        "package-lock.json",
        "requirements.txt",
        "pyproject.toml",
        "setup.py",
        "Dockerfile",
        "**/Dockerfile",
        "Makefile",
        "**/Makefile",
        ".github/**",
        ".gitlab-ci.yml",
        ".gitignore",
        "**/.gitignore",
    ]
    .iter()
    .map(|p| Pattern::new(p).unwrap())
    .collect()
});

static FIX_TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(fix(es|ed)?|bug|resolve[sd]?)\b").unwrap());

static PUBLIC_SYMBOL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(pub(\s*\([^)]*\))?\s+(fn|struct|enum|trait|mod|const|type)\s|export\s+(default\s+)?(function|class|const|interface)\s|public\s+\w|def\s+\w|class\s+\w|function\s+\w)",
    )
    .unwrap()
});

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn extension(path: &str) -> Option<&str> {
    segments(path).last().and_then(|name| name.rsplit_once('.')).map(|(_, ext)| ext)
}

fn is_test_path(path: &str) -> bool {
    segments(path).any(|seg| {
        let seg = seg.to_lowercase();
        seg == "tests" || seg == "__tests__" || seg.contains("test") || seg.contains("spec")
    })
}

fn is_doc_path(path: &str) -> bool {
    if matches!(extension(path), Some("md") | Some("rst")) {
        return true;
    }
    segments(path).any(|seg| {
        let seg = seg.to_lowercase();
        seg == "docs" || seg == "doc" || seg.contains("readme") || seg.contains("changelog")
    })
}

fn is_tooling_path(path: &str) -> bool {
    if TOOLING_PATTERNS.iter().any(|p| p.matches(path)) {
        return true;
    }
    // 配置类文件：文件名里带 config 的都算工具链
    segments(path)
        .last()
        .map(|name| name.to_lowercase().contains("config"))
        .unwrap_or(false)
}

fn is_source_file(path: &str) -> bool {
    if is_test_path(path) || is_doc_path(path) || is_tooling_path(path) {
        return false;
    }
    in_source_dir(path)
        || extension(path)
            .map(|ext| SOURCE_EXTENSIONS.contains(&ext))
            .unwrap_or(false)
}

fn in_source_dir(path: &str) -> bool {
    segments(path)
        .next()
        .map(|first| SOURCE_DIRS.contains(&first))
        .unwrap_or(false)
}

fn has_new_public_symbol(diff: &str) -> bool {
    added_lines(diff).any(|line| PUBLIC_SYMBOL_REGEX.is_match(line.trim_start()))
}

/// 从触达路径推断作用域
///
/// 取仓库根以下的最长公共前缀目录段，剥掉 src 之类的容器目录；
/// 文件横跨不相关的顶层目录时不给出作用域。
pub fn infer_scope(files: &[FileChange]) -> Option<String> {
    let mut common: Option<Vec<&str>> = None;

    for file in files {
        let parts: Vec<&str> = segments(&file.path).collect();
        if parts.len() < 2 {
            // 根目录文件没有目录段，公共前缀直接归零
            return None;
        }
        let dirs = &parts[..parts.len() - 1];
        common = Some(match common {
            None => dirs.to_vec(),
            Some(prev) => prev
                .iter()
                .zip(dirs.iter())
                .take_while(|(a, b)| a == b)
                .map(|(a, _)| *a)
                .collect(),
        });
    }

    let mut common = common?;
    while let Some(first) = common.first() {
        if SOURCE_DIRS.contains(first) {
            common.remove(0);
        } else {
            break;
        }
    }

    common.first().map(|s| (*s).to_string())
}
