//! Strata API - default runtime and unified interfaces
//!
//! Provides:
//! - A per-thread default `Runtime` and the free `class` constructor
//! - Configuration abstraction (RunConfig) and config file loading
//! - Logging initialization (tracing-subscriber)
//! - Unified error handling (StrataError)
//!
//! For library use, prefer an explicit `strata_core::Runtime::with_config`.

use std::cell::OnceCell;

pub mod config;
pub use config::{config as get_config, init as init_config, is_initialized, load_config, RunConfig};

pub mod error;
pub mod logging;
pub use error::{ErrorReport, StrataError};
pub use logging::LogFormat;

// Re-export config types from strata_config
pub use strata_config::{
    Component, LimitConfig, LogLevel, LoggingConfig, RuntimeConfig, StrataConfig,
};

// Re-export core types
pub use strata_core::{
    Class, Event, Forward, Instance, Method, Runtime, RuntimeError, RuntimeResult, Value,
};

thread_local! {
    static DEFAULT_RUNTIME: OnceCell<Runtime> = const { OnceCell::new() };
}

/// Create a runtime from the global configuration (or the defaults if none was set)
pub fn new_runtime() -> Runtime {
    match config::try_config() {
        Some(cfg) => Runtime::with_config(cfg.strata.clone()),
        None => Runtime::new(),
    }
}

/// Run `f` with this thread's default runtime, creating it on first use
pub fn with_runtime<R>(f: impl FnOnce(&Runtime) -> R) -> R {
    DEFAULT_RUNTIME.with(|cell| f(cell.get_or_init(new_runtime)))
}

/// Root class of this thread's default runtime
pub fn root() -> Class {
    with_runtime(Runtime::root)
}

/// Create a class in this thread's default runtime
///
/// `base` defaults to the root class; `name` defaults to the configured
/// unnamed-class name.
pub fn class(name: Option<&str>, base: Option<&Class>) -> Class {
    match base {
        Some(base) => base.subclass(name),
        None => with_runtime(|rt| rt.class(name, None)),
    }
}

/// Parse a JSON configuration and build a runtime from it
pub fn runtime_from_json(source: &str) -> Result<Runtime, StrataError> {
    let config = StrataConfig::from_json_str(source)?;
    Ok(Runtime::with_config(config))
}
