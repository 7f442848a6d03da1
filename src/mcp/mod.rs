/// MCP (Model Context Protocol) Server 实现
/// 允许 Claude Code / Cursor / Windsurf 等 agentic IDE 通过 JSON-RPC stdio
/// 查询仓库状态并生成约定式提交消息
pub mod server;
pub mod tools;

pub use server::run_server;
