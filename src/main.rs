use clap::Parser;
use commit_suggest::analyzer;
use commit_suggest::cli::args::Args;
use commit_suggest::config::Config;
use commit_suggest::git::GitRepo;
use commit_suggest::infrastructure::setup_logging;
use commit_suggest::mcp;

async fn handle_status(repo: &GitRepo) -> anyhow::Result<()> {
    let status = repo.status().await?;

    if status.branch.is_empty() {
        println!("Branch: (detached HEAD)");
    } else {
        println!("Branch: {}", status.branch);
    }

    if status.is_clean() {
        println!("Working tree clean. No changes.");
        return Ok(());
    }

    for entry in &status.files {
        println!("{} {}", entry.status_code, entry.path);
    }
    println!(
        "\nstaged: {}, unstaged: {}",
        if status.has_staged { "yes" } else { "no" },
        if status.has_unstaged { "yes" } else { "no" },
    );
    Ok(())
}

/// 显式 --type 路径：跳过分类器，直接格式化
async fn handle_explicit_message(args: &Args, repo: &GitRepo) -> anyhow::Result<()> {
    let commit_type = args.commit_type.as_deref().unwrap_or_default();
    let description = args.message.as_deref().unwrap_or_default();
    let message = analyzer::generate(commit_type, &args.scope, description)?;

    if args.commit {
        let output = repo.commit(&message.text).await?;
        println!("✓ Committed: {}", message.text);
        if !output.trim().is_empty() {
            println!("{}", output.trim());
        }
    } else {
        println!("{}", message.text);
    }
    Ok(())
}

/// 默认路径：分析暂存变更并给出建议
async fn handle_suggest(args: &Args, repo: &GitRepo) -> anyhow::Result<()> {
    let diff = repo.staged_diff().await?;

    let suggestion = match analyzer::suggest_from_diff(&diff, args.message.as_deref()) {
        Some(s) => s,
        None => {
            println!("No staged changes. Run `git add` first.");
            return Ok(());
        }
    };

    tracing::debug!(
        commit_type = %suggestion.analysis.commit_type,
        scope = suggestion.analysis.scope.as_deref().unwrap_or(""),
        "staged changes classified"
    );

    println!("{}", suggestion.analysis.summary());
    println!("{}", suggestion.suggested_message.text);

    if args.commit {
        let output = repo.commit(&suggestion.suggested_message.text).await?;
        println!("✓ Committed");
        if !output.trim().is_empty() {
            println!("{}", output.trim());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = Config::new();

    config.update_from_args(&args);
    config.validate()?;
    setup_logging(&config)?;

    // MCP server 模式：stdout 归协议所有，所有人类可读输出走日志
    if args.mcp {
        return mcp::run_server(&config).await;
    }

    let repo = GitRepo::new(&config);

    if args.status {
        return handle_status(&repo).await;
    }

    if args.commit_type.is_some() {
        return handle_explicit_message(&args, &repo).await;
    }

    handle_suggest(&args, &repo).await
}
