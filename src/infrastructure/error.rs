use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 工具错误类型
///
/// 只有两类：格式化器的参数错误，以及外部 git 命令失败。
/// 分类器本身没有错误路径，信号不足时退化为默认类别。
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum SuggestError {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("git command failed: {message}")]
    ExternalTool {
        message: String,
        exit_code: Option<i32>,
    },
}

impl SuggestError {
    /// 创建参数错误
    pub fn invalid_input(message: impl Into<String>) -> Self {
        SuggestError::InvalidInput {
            message: message.into(),
        }
    }

    /// 创建外部命令错误
    pub fn external_tool(message: impl Into<String>, exit_code: Option<i32>) -> Self {
        SuggestError::ExternalTool {
            message: message.into(),
            exit_code,
        }
    }

    /// 检查是否为参数错误（协议层据此选择错误码）
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, SuggestError::InvalidInput { .. })
    }
}

impl From<std::io::Error> for SuggestError {
    fn from(error: std::io::Error) -> Self {
        SuggestError::ExternalTool {
            message: error.to_string(),
            exit_code: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = SuggestError::invalid_input("description cannot be empty");
        assert_eq!(
            err.to_string(),
            "invalid input: description cannot be empty"
        );
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_external_tool_display() {
        let err = SuggestError::external_tool("git commit exited with status 128", Some(128));
        assert!(err.to_string().contains("git command failed"));
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "git not found");
        let err: SuggestError = io_err.into();
        match err {
            SuggestError::ExternalTool { exit_code, .. } => assert!(exit_code.is_none()),
            _ => panic!("io errors should map to ExternalTool"),
        }
    }
}
