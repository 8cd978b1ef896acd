//! # Config 模块
//!
//! 命令行前端配置。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (inky.json)
//! 3. 默认值（最低）
//!
//! 环境变量 `NO_COLOR` 存在时总是关闭彩色输出。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "inky.json";

/// 前端配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// REPL 提示符
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// 是否彩色输出
    #[serde(default = "default_color")]
    pub color: bool,

    /// REPL 启动时是否打印 token 列表
    #[serde(default)]
    pub show_tokens: bool,

    /// REPL 启动时是否打印语法树
    #[serde(default)]
    pub show_ast: bool,

    /// 日志级别（error / warn / info / debug / trace）
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_prompt() -> String {
    "inky> ".to_string()
}

fn default_color() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            color: default_color(),
            show_tokens: false,
            show_ast: false,
            log_level: default_log_level(),
        }
    }
}

impl CliConfig {
    /// 加载配置文件
    ///
    /// 文件不存在时静默使用默认配置；`required` 为真（用户显式指定路径）时打印警告。
    /// 读取或解析失败时打印警告并使用默认配置。
    pub fn load(path: impl AsRef<Path>, required: bool) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            if required {
                eprintln!("⚠️ 配置文件不存在: {:?}，使用默认配置", path);
            }
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("⚠️ 配置文件解析失败: {}，使用默认配置", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("⚠️ 配置文件读取失败: {}，使用默认配置", e);
                Self::default()
            }
        }
    }

    /// 解析日志级别，无法识别时退回 `WARN`
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::WARN)
    }

    /// 考虑 `NO_COLOR` 后的实际着色开关
    pub fn color_enabled(&self) -> bool {
        self.color && std::env::var_os("NO_COLOR").is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.prompt, "inky> ");
        assert!(config.color);
        assert!(!config.show_tokens);
        assert_eq!(config.tracing_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CliConfig =
            serde_json::from_str(r#"{ "prompt": ">> ", "show_ast": true }"#).unwrap();
        assert_eq!(config.prompt, ">> ");
        assert!(config.show_ast);
        assert!(config.color);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, r#"{ "log_level": "debug", "color": false }"#).unwrap();

        let config = CliConfig::load(&path, true);
        assert_eq!(config.tracing_level(), tracing::Level::DEBUG);
        assert!(!config.color_enabled());
    }

    #[test]
    fn test_load_missing_or_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert_eq!(CliConfig::load(&missing, false), CliConfig::default());

        let invalid = dir.path().join("invalid.json");
        fs::write(&invalid, "{ not json").unwrap();
        assert_eq!(CliConfig::load(&invalid, true), CliConfig::default());
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let config = CliConfig {
            log_level: "loud".to_string(),
            ..CliConfig::default()
        };
        assert_eq!(config.tracing_level(), tracing::Level::WARN);
    }
}
