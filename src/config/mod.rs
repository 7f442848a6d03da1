use std::env;
use std::path::PathBuf;

/// 进程配置
///
/// 启动时构建一次，之后显式传入各个构造函数（如 [`crate::git::GitRepo::new`]），
/// 不依赖任何全局可变状态。
#[derive(Debug, Clone)]
pub struct Config {
    /// 日志级别（trace/debug/info/warn/error）
    pub log_level: String,
    /// 仓库工作目录覆盖，None 表示使用当前目录
    pub repo_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            repo_dir: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();

        // 加载配置文件
        #[cfg(not(test))]
        config.load_from_env_file();
        // 加载环境变量（覆盖配置文件）
        config.load_from_env();

        config
    }

    pub fn load_from_env_file(&mut self) {
        // 尝试从用户主目录加载
        if let Ok(home) = env::var("HOME") {
            let user_env_path = PathBuf::from(format!("{}/.commit-suggest/.env", home));
            if user_env_path.exists() {
                dotenvy::from_path(user_env_path).ok();
            }
        }

        // 尝试从当前目录加载
        dotenvy::dotenv().ok();
    }

    pub fn load_from_env(&mut self) {
        if let Ok(level) = env::var("COMMIT_SUGGEST_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Ok(dir) = env::var("COMMIT_SUGGEST_REPO_DIR") {
            if !dir.is_empty() {
                self.repo_dir = Some(PathBuf::from(dir));
            }
        }
    }

    pub fn update_from_args(&mut self, args: &crate::cli::args::Args) {
        // 命令行参数优先级最高
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
        if let Some(dir) = &args.repo_dir {
            self.repo_dir = Some(dir.clone());
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                anyhow::bail!(
                    "Unsupported log level: {}. Use one of: trace, debug, info, warn, error",
                    other
                );
            }
        }

        if let Some(dir) = &self.repo_dir {
            if !dir.is_dir() {
                anyhow::bail!("Repository directory does not exist: {}", dir.display());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn clear_env() {
        env::remove_var("COMMIT_SUGGEST_LOG_LEVEL");
        env::remove_var("COMMIT_SUGGEST_REPO_DIR");
    }

    // 环境变量是进程级共享状态，分层行为合在一个用例里顺序验证，
    // 避免并行测试互相污染
    #[test]
    fn test_config_layering() {
        clear_env();

        // 默认值
        let config = Config::new();
        assert_eq!(config.log_level, "info");
        assert!(config.repo_dir.is_none());

        // 环境变量覆盖默认值
        env::set_var("COMMIT_SUGGEST_LOG_LEVEL", "debug");
        env::set_var("COMMIT_SUGGEST_REPO_DIR", "/tmp");
        let config = Config::new();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.repo_dir, Some(PathBuf::from("/tmp")));

        // 空的目录变量视为未设置
        env::set_var("COMMIT_SUGGEST_REPO_DIR", "");
        let config = Config::new();
        assert!(config.repo_dir.is_none());

        // 命令行参数覆盖环境变量
        let mut config = Config::new();
        let args = crate::cli::args::Args {
            log_level: Some("trace".to_string()),
            ..Default::default()
        };
        config.update_from_args(&args);
        assert_eq!(config.log_level, "trace");

        clear_env();
    }

    #[test]
    fn test_validate_log_level() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_repo_dir() {
        let mut config = Config::default();
        config.repo_dir = Some(PathBuf::from("/nonexistent/path/for/sure"));
        assert!(config.validate().is_err());

        config.repo_dir = Some(PathBuf::from("/tmp"));
        assert!(config.validate().is_ok());
    }
}
