//! API 错误类型
//!
//! 统一错误类型和结构化错误报告。

use std::path::PathBuf;

use strata_core::RuntimeError;
use thiserror::Error;

/// Strata error type
#[derive(Error, Debug)]
pub enum StrataError {
    /// Object model error
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    /// Configuration could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration file could not be read
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Global configuration was already set
    #[error("Config already initialized")]
    AlreadyInitialized,

    /// A global log subscriber is already installed
    #[error("Logging error: {0}")]
    Logging(String),
}

impl StrataError {
    /// 获取错误阶段名称
    pub fn phase(&self) -> &'static str {
        match self {
            StrataError::Runtime(_) => "runtime",
            StrataError::Config(_) | StrataError::AlreadyInitialized => "config",
            StrataError::Io { .. } => "io",
            StrataError::Logging(_) => "logging",
        }
    }

    /// 转换为结构化错误报告
    ///
    /// CLI 可以直接打印，上层应用可以序列化为 JSON。
    pub fn to_report(&self) -> ErrorReport {
        let (error_kind, message) = match self {
            StrataError::Runtime(e) => (e.kind().to_string(), e.to_string()),
            StrataError::Config(e) => ("parse".to_string(), e.to_string()),
            StrataError::Io { source, .. } => (format!("{:?}", source.kind()), self.to_string()),
            StrataError::AlreadyInitialized => {
                ("already_initialized".to_string(), self.to_string())
            }
            StrataError::Logging(msg) => ("subscriber".to_string(), msg.clone()),
        };
        ErrorReport {
            phase: self.phase(),
            error_kind,
            message,
        }
    }
}

/// 结构化错误报告
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReport {
    /// 错误阶段: runtime, config, io, logging
    pub phase: &'static str,
    /// 错误类型（可用于程序化处理）
    pub error_kind: String,
    /// 人类可读的错误消息
    pub message: String,
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} error: {}", self.error_kind, self.phase, self.message)
    }
}

impl ErrorReport {
    /// 转换为 JSON 格式
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "phase": self.phase,
            "error_kind": self.error_kind,
            "message": self.message,
        })
        .to_string()
    }

    /// 简洁格式（适合终端）
    pub fn to_short(&self) -> String {
        format!("{}: {}", self.phase, self.message)
    }
}
