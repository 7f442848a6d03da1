use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    name = "commit-suggest",
    version,
    about = "根据暂存的 git diff 推断约定式提交消息",
    long_about = "commit-suggest 分析 git 暂存区的变更，用启发式规则归类到八种约定式提交类型之一，并给出 type(scope): description 格式的提交消息建议。支持一次性命令行调用，也可以作为 MCP server 供 agentic IDE 通过 JSON-RPC stdio 调用。"
)]
pub struct Args {
    /// 以 MCP server 模式运行（JSON-RPC over stdio）
    #[arg(long = "mcp", default_value_t = false)]
    pub mcp: bool,

    /// 显示仓库状态后退出
    #[arg(long = "status", short = 's', default_value_t = false)]
    pub status: bool,

    /// 用建议（或显式给出）的消息直接提交
    #[arg(long = "commit", short = 'c', default_value_t = false)]
    pub commit: bool,

    /// 显式指定提交类型（feat, fix, docs, style, refactor, perf, test, chore），
    /// 跳过分类器直接走格式化
    #[arg(long = "type", short = 't', value_name = "TYPE")]
    pub commit_type: Option<String>,

    /// 提交作用域（留空则省略括号）
    #[arg(long = "scope", value_name = "SCOPE", default_value = "")]
    pub scope: String,

    /// 描述文本；与 --type 搭配时是消息描述，单独出现时作为分类提示
    #[arg(long = "message", short = 'm', value_name = "DESC")]
    pub message: Option<String>,

    /// 仓库工作目录（默认当前目录）
    #[arg(long = "repo-dir", value_name = "DIR")]
    pub repo_dir: Option<PathBuf>,

    /// 日志级别（trace/debug/info/warn/error）
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,
}
