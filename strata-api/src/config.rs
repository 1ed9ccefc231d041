//! API 层配置
//!
//! 执行配置 RunConfig、全局单例和配置文件加载

use std::path::Path;

use once_cell::sync::OnceCell;
use strata_config::StrataConfig;

use crate::error::StrataError;
use crate::logging::LogFormat;

/// Process-wide configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Object model, limits and logging settings
    pub strata: StrataConfig,
    /// Output format used by `logging::init_from_config`
    pub log_format: LogFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            strata: StrataConfig::default(),
            log_format: LogFormat::Compact,
        }
    }
}

impl From<StrataConfig> for RunConfig {
    fn from(strata: StrataConfig) -> Self {
        Self {
            strata,
            ..Self::default()
        }
    }
}

// Global config singleton
static GLOBAL_CONFIG: OnceCell<RunConfig> = OnceCell::new();

/// Initialize global configuration
///
/// Runtimes created afterwards (including each thread's default runtime)
/// use it. Fails if a configuration was already set.
pub fn init(config: RunConfig) -> Result<(), StrataError> {
    GLOBAL_CONFIG
        .set(config)
        .map_err(|_| StrataError::AlreadyInitialized)
}

/// Get global config reference, falling back to (and fixing) the default
pub fn config() -> &'static RunConfig {
    GLOBAL_CONFIG.get_or_init(RunConfig::default)
}

/// Global config if one was set, without installing the default
pub fn try_config() -> Option<&'static RunConfig> {
    GLOBAL_CONFIG.get()
}

/// Check if config is initialized
pub fn is_initialized() -> bool {
    GLOBAL_CONFIG.get().is_some()
}

/// Read a JSON configuration file; absent keys take their defaults
pub fn load_config(path: impl AsRef<Path>) -> Result<StrataConfig, StrataError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| StrataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = StrataConfig::from_json_str(&source)?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_run_config() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.strata.runtime.root_name, "Object");
        assert_eq!(cfg.strata.limits.max_call_depth, 256);
        assert_eq!(cfg.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_run_config_from_strata_config() {
        let mut strata = StrataConfig::default();
        strata.runtime.unnamed_class_name = "Anon".to_string();
        let cfg = RunConfig::from(strata.clone());
        assert_eq!(cfg.strata, strata);
        assert_eq!(cfg.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/strata.json").unwrap_err();
        assert!(matches!(err, StrataError::Io { .. }));
        assert_eq!(err.phase(), "io");
    }
}
