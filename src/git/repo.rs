use std::path::PathBuf;

use tokio::process::Command;

use super::status::{parse_porcelain, GitStatus};
use crate::config::Config;
use crate::infrastructure::SuggestError;

/// 外部 git 命令的封装
///
/// 工作目录覆盖通过 `git -C <dir>` 传递，进程自身的当前目录不变。
#[derive(Debug, Clone)]
pub struct GitRepo {
    dir: Option<PathBuf>,
}

impl GitRepo {
    pub fn new(config: &Config) -> Self {
        GitRepo {
            dir: config.repo_dir.clone(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new("git");
        if let Some(dir) = &self.dir {
            cmd.arg("-C").arg(dir);
        }
        cmd
    }

    async fn read_stdout(&self, args: &[&str]) -> Result<String, SuggestError> {
        let output = self.command().args(args).output().await.map_err(|e| {
            SuggestError::external_tool(format!("failed to run git {}: {}", args.join(" "), e), None)
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SuggestError::external_tool(
                format!("git {} failed: {}", args.join(" "), stderr.trim()),
                output.status.code(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// 读取暂存区 diff
    pub async fn staged_diff(&self) -> Result<String, SuggestError> {
        self.read_stdout(&["diff", "--cached"]).await
    }

    /// 读取未暂存的 diff
    pub async fn unstaged_diff(&self) -> Result<String, SuggestError> {
        self.read_stdout(&["diff"]).await
    }

    /// 暂存区是否有内容待提交
    pub async fn has_staged_changes(&self) -> Result<bool, SuggestError> {
        let output = self
            .command()
            .args(["diff", "--cached", "--quiet"])
            .output()
            .await
            .map_err(|e| {
                SuggestError::external_tool(format!("failed to run git diff --cached: {}", e), None)
            })?;

        // --quiet：退出码 0 表示无差异，1 表示有差异
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            code => Err(SuggestError::external_tool(
                format!(
                    "git diff --cached --quiet failed: {}",
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
                code,
            )),
        }
    }

    /// 查询仓库状态（porcelain + 当前分支）
    pub async fn status(&self) -> Result<GitStatus, SuggestError> {
        let porcelain = self.read_stdout(&["status", "--porcelain"]).await?;
        let branch = self.read_stdout(&["branch", "--show-current"]).await?;
        Ok(parse_porcelain(&porcelain, branch.trim()))
    }

    /// 以给定消息提交暂存内容，原样透传 git 的退出状态
    pub async fn commit(&self, message: &str) -> Result<String, SuggestError> {
        let output = self
            .command()
            .args(["commit", "-m", message])
            .output()
            .await
            .map_err(|e| {
                SuggestError::external_tool(format!("failed to run git commit: {}", e), None)
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SuggestError::external_tool(
                format!("git commit failed: {}", stderr.trim()),
                output.status.code(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
