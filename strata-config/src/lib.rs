//! Strata Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all Strata crates.

use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrataConfig {
    /// Object model settings
    pub runtime: RuntimeConfig,
    /// Execution limits
    pub limits: LimitConfig,
    /// Logging levels
    pub logging: LoggingConfig,
}

/// Configuration for the object model itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Display name of the root class
    pub root_name: String,
    /// Name substituted when a class is created without one
    pub unnamed_class_name: String,
}

/// Configuration for execution limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Maximum nesting of method and event invocations
    pub max_call_depth: usize,
}

/// Log level vocabulary, mapped onto `tracing` levels by the api crate
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

/// Per-component logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for every component
    pub global: LogLevel,
    /// Class registry level (None falls back to `global`)
    pub registry: Option<LogLevel>,
    pub dispatch: Option<LogLevel>,
    pub construct: Option<LogLevel>,
    pub access: Option<LogLevel>,
    pub cast: Option<LogLevel>,
}

/// Runtime component, used to pick per-component log levels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Component {
    Registry,
    Dispatch,
    Construct,
    Access,
    Cast,
}

impl Component {
    pub const ALL: [Component; 5] = [
        Component::Registry,
        Component::Dispatch,
        Component::Construct,
        Component::Access,
        Component::Cast,
    ];

    /// Get the string name of the component
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Registry => "registry",
            Component::Dispatch => "dispatch",
            Component::Construct => "construct",
            Component::Access => "access",
            Component::Cast => "cast",
        }
    }

    /// Get the log target (module path) events of this component are emitted under
    pub fn target(&self) -> &'static str {
        match self {
            Component::Registry => "strata_core::runtime::class",
            Component::Dispatch => "strata_core::runtime::class::dispatch",
            Component::Construct => "strata_core::runtime::instance",
            Component::Access => "strata_core::runtime::instance::access",
            Component::Cast => "strata_core::runtime::instance::cast",
        }
    }
}

impl LoggingConfig {
    /// Effective level for a component
    ///
    /// A component-specific level wins, otherwise the global level applies.
    pub fn level_for(&self, component: Component) -> LogLevel {
        let specific = match component {
            Component::Registry => self.registry,
            Component::Dispatch => self.dispatch,
            Component::Construct => self.construct,
            Component::Access => self.access,
            Component::Cast => self.cast,
        };
        specific.unwrap_or(self.global)
    }
}

impl StrataConfig {
    /// Parse a configuration from JSON; missing keys take their defaults
    pub fn from_json_str(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Serialize the configuration as pretty JSON
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            root_name: "Object".to_string(),
            unnamed_class_name: "Unnamed".to_string(),
        }
    }
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self { max_call_depth: 256 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            global: LogLevel::Info,
            registry: None,
            dispatch: None,
            construct: None,
            access: None,
            cast: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_runtime_config() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.root_name, "Object");
        assert_eq!(cfg.unnamed_class_name, "Unnamed");
    }

    #[test]
    fn test_default_limit_config() {
        let cfg = LimitConfig::default();
        assert_eq!(cfg.max_call_depth, 256);
    }

    #[test]
    fn test_level_for_falls_back_to_global() {
        let cfg = LoggingConfig {
            global: LogLevel::Warn,
            cast: Some(LogLevel::Trace),
            ..Default::default()
        };
        assert_eq!(cfg.level_for(Component::Cast), LogLevel::Trace);
        assert_eq!(cfg.level_for(Component::Registry), LogLevel::Warn);
    }

    #[test]
    fn test_component_target() {
        assert_eq!(Component::Dispatch.as_str(), "dispatch");
        assert_eq!(
            Component::Access.target(),
            "strata_core::runtime::instance::access"
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg = StrataConfig::from_json_str(r#"{ "limits": { "max_call_depth": 8 } }"#).unwrap();
        assert_eq!(cfg.limits.max_call_depth, 8);
        assert_eq!(cfg.runtime, RuntimeConfig::default());
        assert_eq!(cfg.logging.global, LogLevel::Info);
    }

    #[test]
    fn test_json_level_names() {
        let cfg = StrataConfig::from_json_str(
            r#"{ "logging": { "global": "off", "construct": "debug" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.logging.global, LogLevel::Off);
        assert_eq!(cfg.logging.construct, Some(LogLevel::Debug));
    }

    #[test]
    fn test_json_round_trip_keeps_names() {
        let mut cfg = StrataConfig::default();
        cfg.runtime.root_name = "Base".to_string();
        let text = cfg.to_json_string().unwrap();
        assert!(text.contains("\"root_name\": \"Base\""));
        assert_eq!(StrataConfig::from_json_str(&text).unwrap(), cfg);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(StrataConfig::from_json_str("{ not json").is_err());
    }
}
