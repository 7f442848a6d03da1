use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// 设置日志系统
///
/// 日志一律写到 stderr：MCP 模式下 stdout 是 JSON-RPC 传输通道，
/// 任何混入的日志行都会破坏协议。
pub fn setup_logging(config: &Config) -> anyhow::Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive(format!("commit_suggest={}", config.log_level).parse()?);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .ok();

    Ok(())
}
