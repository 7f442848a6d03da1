use serde_json::{json, Value};
use std::collections::HashMap;

use super::server::{ToolCallParams, ToolCallResult, ToolDefinition};
use crate::analyzer;
use crate::analyzer::CommitType;
use crate::config::Config;
use crate::git::GitRepo;

/// 列出所有可用的 MCP tools
pub fn list_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "get_status".to_string(),
            description: "Get the current git repository status (branch, changed files, staged/unstaged flags)".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
        ToolDefinition {
            name: "get_diff".to_string(),
            description: "Get the current git diff (staged changes)".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "all": {
                        "type": "boolean",
                        "description": "Include unstaged changes too",
                        "default": false
                    }
                }
            }),
        },
        ToolDefinition {
            name: "analyze_staged".to_string(),
            description: "Analyze staged changes, classify them into a conventional commit type and suggest a commit message".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "description": {
                        "type": "string",
                        "description": "Optional hint describing the change, used as a classification signal"
                    }
                }
            }),
        },
        ToolDefinition {
            name: "generate_message".to_string(),
            description: "Generate a conventional commit message from an explicit type, scope and description".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "type": {
                        "type": "string",
                        "description": "Commit type (feat, fix, docs, style, refactor, perf, test, chore)",
                        "default": "feat"
                    },
                    "scope": {
                        "type": "string",
                        "description": "Optional scope. Empty scope omits the parentheses."
                    },
                    "description": {
                        "type": "string",
                        "description": "The commit description"
                    }
                },
                "required": ["description"]
            }),
        },
        ToolDefinition {
            name: "commit".to_string(),
            description: "Create a git commit with the given message".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "message": {
                        "type": "string",
                        "description": "The commit message"
                    }
                },
                "required": ["message"]
            }),
        },
    ]
}

/// 执行 tool 调用
pub async fn call_tool(params: ToolCallParams, config: &Config) -> ToolCallResult {
    match params.name.as_str() {
        "get_status" => tool_get_status(config).await,
        "get_diff" => tool_get_diff(params.arguments, config).await,
        "analyze_staged" => tool_analyze_staged(params.arguments, config).await,
        "generate_message" => tool_generate_message(params.arguments),
        "commit" => tool_commit(params.arguments, config).await,
        _ => ToolCallResult::error(format!("Unknown tool: {}", params.name)),
    }
}

async fn tool_get_status(config: &Config) -> ToolCallResult {
    let repo = GitRepo::new(config);
    match repo.status().await {
        Ok(status) => {
            if status.is_clean() {
                ToolCallResult::text(format!(
                    "Branch: {}\nWorking tree clean. No changes.",
                    status.branch
                ))
            } else {
                match serde_json::to_string_pretty(&status) {
                    Ok(text) => ToolCallResult::text(text),
                    Err(e) => ToolCallResult::error(format!("Failed to serialize status: {}", e)),
                }
            }
        }
        Err(e) => ToolCallResult::error(format!("Failed to get status: {}", e)),
    }
}

async fn tool_get_diff(args: HashMap<String, Value>, config: &Config) -> ToolCallResult {
    let all = args.get("all").and_then(|v| v.as_bool()).unwrap_or(false);

    let repo = GitRepo::new(config);
    let mut diff = match repo.staged_diff().await {
        Ok(d) => d,
        Err(e) => return ToolCallResult::error(format!("Failed to get diff: {}", e)),
    };

    if all {
        match repo.unstaged_diff().await {
            Ok(unstaged) => diff.push_str(&unstaged),
            Err(e) => return ToolCallResult::error(format!("Failed to get diff: {}", e)),
        }
    }

    if diff.trim().is_empty() {
        ToolCallResult::text("No changes found.")
    } else {
        ToolCallResult::text(diff)
    }
}

async fn tool_analyze_staged(args: HashMap<String, Value>, config: &Config) -> ToolCallResult {
    let hint = args.get("description").and_then(|v| v.as_str());

    let repo = GitRepo::new(config);
    let diff = match repo.staged_diff().await {
        Ok(d) => d,
        Err(e) => return ToolCallResult::error(format!("Failed to get diff: {}", e)),
    };

    match analyzer::suggest_from_diff(&diff, hint) {
        Some(suggestion) => {
            let payload = json!({
                "analysis": suggestion.analysis,
                "summary": suggestion.analysis.summary(),
                "suggested_message": suggestion.suggested_message.text,
            });
            match serde_json::to_string_pretty(&payload) {
                Ok(text) => ToolCallResult::text(text),
                Err(e) => ToolCallResult::error(format!("Failed to serialize analysis: {}", e)),
            }
        }
        None => ToolCallResult::text(
            "No staged changes found. Run `git add` first, then analyze again.",
        ),
    }
}

fn tool_generate_message(args: HashMap<String, Value>) -> ToolCallResult {
    let commit_type = args
        .get("type")
        .and_then(|v| v.as_str())
        .unwrap_or(CommitType::Feat.as_str());
    let scope = args.get("scope").and_then(|v| v.as_str()).unwrap_or("");
    let description = match args.get("description").and_then(|v| v.as_str()) {
        Some(d) => d,
        None => return ToolCallResult::error("Missing required parameter: description"),
    };

    match analyzer::generate(commit_type, scope, description) {
        Ok(message) => {
            let type_description = CommitType::parse(commit_type)
                .map(|t| t.description())
                .unwrap_or_default();
            let payload = json!({
                "commit_message": message.text,
                "type_description": type_description,
            });
            match serde_json::to_string_pretty(&payload) {
                Ok(text) => ToolCallResult::text(text),
                Err(e) => ToolCallResult::error(format!("Failed to serialize message: {}", e)),
            }
        }
        Err(e) => ToolCallResult::error(e.to_string()),
    }
}

async fn tool_commit(args: HashMap<String, Value>, config: &Config) -> ToolCallResult {
    let message = match args.get("message").and_then(|v| v.as_str()) {
        Some(msg) => msg.to_string(),
        None => return ToolCallResult::error("Missing required parameter: message"),
    };

    if message.trim().is_empty() {
        return ToolCallResult::error("Commit message cannot be empty");
    }

    let repo = GitRepo::new(config);
    match repo.has_staged_changes().await {
        Ok(false) => return ToolCallResult::error("No staged changes to commit"),
        Ok(true) => {}
        Err(e) => return ToolCallResult::error(format!("Failed to check staged changes: {}", e)),
    }

    match repo.commit(&message).await {
        Ok(output) => ToolCallResult::text(format!("Committed: {}\n{}", message, output.trim())),
        Err(e) => ToolCallResult::error(format!("Commit failed: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, arguments: HashMap<String, Value>) -> ToolCallParams {
        ToolCallParams {
            name: name.to_string(),
            arguments,
        }
    }

    #[test]
    fn test_list_tools_has_required_tools() {
        let tools = list_tools();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();

        assert!(names.contains(&"get_status"));
        assert!(names.contains(&"get_diff"));
        assert!(names.contains(&"analyze_staged"));
        assert!(names.contains(&"generate_message"));
        assert!(names.contains(&"commit"));
    }

    #[test]
    fn test_tool_definitions_have_schemas() {
        let tools = list_tools();
        for tool in &tools {
            assert!(!tool.name.is_empty());
            assert!(!tool.description.is_empty());
            assert!(tool.input_schema.is_object());
        }
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let config = Config::default();
        let result = call_tool(call("nonexistent", HashMap::new()), &config).await;
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_generate_message_tool() {
        let mut args = HashMap::new();
        args.insert("type".to_string(), json!("fix"));
        args.insert("scope".to_string(), json!("api"));
        args.insert(
            "description".to_string(),
            json!("resolve authentication timeout issue"),
        );

        let result = tool_generate_message(args);
        assert_ne!(result.is_error, Some(true));
        assert!(result.content[0]
            .text
            .contains("fix(api): resolve authentication timeout issue"));
        assert!(result.content[0].text.contains("A bug fix"));
    }

    #[test]
    fn test_generate_message_defaults_to_feat() {
        let mut args = HashMap::new();
        args.insert("description".to_string(), json!("add dark mode toggle"));

        let result = tool_generate_message(args);
        assert!(result.content[0].text.contains("feat: add dark mode toggle"));
    }

    #[test]
    fn test_generate_message_rejects_bogus_type() {
        let mut args = HashMap::new();
        args.insert("type".to_string(), json!("bogus"));
        args.insert("description".to_string(), json!("desc"));

        let result = tool_generate_message(args);
        assert_eq!(result.is_error, Some(true));
        assert!(result.content[0].text.contains("invalid input"));
    }

    #[test]
    fn test_generate_message_missing_description() {
        let result = tool_generate_message(HashMap::new());
        assert_eq!(result.is_error, Some(true));
        assert!(result.content[0].text.contains("Missing"));
    }

    #[tokio::test]
    async fn test_call_commit_missing_message() {
        let config = Config::default();
        let result = call_tool(call("commit", HashMap::new()), &config).await;
        assert_eq!(result.is_error, Some(true));
        assert!(result.content[0].text.contains("Missing"));
    }

    #[tokio::test]
    async fn test_call_commit_empty_message() {
        let config = Config::default();
        let mut args = HashMap::new();
        args.insert("message".to_string(), json!(""));
        let result = call_tool(call("commit", args), &config).await;
        assert_eq!(result.is_error, Some(true));
    }
}
