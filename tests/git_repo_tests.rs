//! GitRepo 集成测试
//! 在临时目录里建真实仓库验证 diff/status/commit 链路；环境里没有
//! 可用的 git 时直接跳过

use std::path::{Path, PathBuf};
use std::process::Command;

use commit_suggest::analyzer;
use commit_suggest::config::Config;
use commit_suggest::git::GitRepo;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn run_git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run git {:?}: {}", args, e));
    assert!(
        status.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&status.stderr)
    );
}

fn init_repo(dir: &Path) {
    run_git(dir, &["init"]);
    run_git(dir, &["config", "user.email", "tester@example.com"]);
    run_git(dir, &["config", "user.name", "Tester"]);
}

fn repo_for(dir: &Path) -> GitRepo {
    let config = Config {
        repo_dir: Some(PathBuf::from(dir)),
        ..Config::default()
    };
    GitRepo::new(&config)
}

#[tokio::test]
async fn test_empty_repo_has_no_staged_changes() {
    if !git_available() {
        println!("git unavailable, skipping");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());

    let repo = repo_for(dir.path());
    assert!(!repo.has_staged_changes().await.unwrap());

    let diff = repo.staged_diff().await.unwrap();
    assert!(diff.trim().is_empty());
    assert!(analyzer::suggest_from_diff(&diff, None).is_none());
}

#[tokio::test]
async fn test_staged_file_flows_through_analysis() {
    if !git_available() {
        println!("git unavailable, skipping");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());

    std::fs::create_dir_all(dir.path().join("src/auth")).unwrap();
    std::fs::write(
        dir.path().join("src/auth/token.rs"),
        "pub fn issue() -> String {\n    String::new()\n}\n",
    )
    .unwrap();
    run_git(dir.path(), &["add", "."]);

    let repo = repo_for(dir.path());
    assert!(repo.has_staged_changes().await.unwrap());

    let diff = repo.staged_diff().await.unwrap();
    assert!(diff.contains("src/auth/token.rs"));

    let suggestion = analyzer::suggest_from_diff(&diff, None).unwrap();
    assert_eq!(suggestion.analysis.commit_type.as_str(), "feat");
    assert_eq!(suggestion.analysis.scope.as_deref(), Some("auth"));
    assert_eq!(suggestion.analysis.files[0].path, "src/auth/token.rs");
}

#[tokio::test]
async fn test_status_reflects_staging_state() {
    if !git_available() {
        println!("git unavailable, skipping");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());

    std::fs::write(dir.path().join("notes.txt"), "hello\n").unwrap();

    let repo = repo_for(dir.path());
    let status = repo.status().await.unwrap();
    assert!(!status.has_staged);
    assert!(status.has_unstaged);

    run_git(dir.path(), &["add", "notes.txt"]);
    let status = repo.status().await.unwrap();
    assert!(status.has_staged);
    assert!(status.files.iter().any(|f| f.path == "notes.txt"));
}

#[tokio::test]
async fn test_commit_with_suggested_message() {
    if !git_available() {
        println!("git unavailable, skipping");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());

    std::fs::create_dir_all(dir.path().join("docs")).unwrap();
    std::fs::write(dir.path().join("docs/guide.md"), "# Guide\n").unwrap();
    run_git(dir.path(), &["add", "."]);

    let repo = repo_for(dir.path());
    let diff = repo.staged_diff().await.unwrap();
    let suggestion = analyzer::suggest_from_diff(&diff, None).unwrap();
    assert!(suggestion.suggested_message.text.starts_with("docs"));

    repo.commit(&suggestion.suggested_message.text).await.unwrap();

    // 提交后工作树干净，暂存区为空
    let status = repo.status().await.unwrap();
    assert!(status.is_clean());
    assert!(!repo.has_staged_changes().await.unwrap());
}

#[tokio::test]
async fn test_commit_without_staging_fails() {
    if !git_available() {
        println!("git unavailable, skipping");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());

    let repo = repo_for(dir.path());
    let result = repo.commit("chore: nothing staged").await;
    assert!(result.is_err());
}
