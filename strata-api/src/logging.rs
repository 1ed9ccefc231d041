//! 日志系统初始化
//!
//! 基于 `tracing-subscriber`，按组件（registry、dispatch、construct、access、cast）控制日志级别。

use std::io;

use strata_config::{Component, LogLevel, LoggingConfig};
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer,
};

use crate::error::StrataError;

/// 日志输出格式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// 彩色格式化（开发使用）
    Pretty,
    /// 紧凑格式
    Compact,
    /// JSON 格式（工具集成）
    Json,
}

/// Map a configured level onto a `tracing` filter
pub fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}

/// Per-component filter: the global level as default, one directive per component target
pub fn build_targets(logging: &LoggingConfig) -> Targets {
    Component::ALL.iter().fold(
        Targets::new().with_default(level_filter(logging.global)),
        |targets, component| {
            targets.with_target(component.target(), level_filter(logging.level_for(*component)))
        },
    )
}

/// Install the global subscriber writing to stderr
///
/// Fails if a global subscriber is already set.
pub fn init(logging: &LoggingConfig, format: LogFormat) -> Result<(), StrataError> {
    let layer = create_format_layer(format, io::stderr).with_filter(build_targets(logging));
    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| StrataError::Logging(e.to_string()))
}

/// Install the global subscriber described by the global `RunConfig`
pub fn init_from_config() -> Result<(), StrataError> {
    let cfg = crate::config::config();
    init(&cfg.strata.logging, cfg.log_format)
}

/// Create formatter layer based on format
fn create_format_layer<W, F>(
    format: LogFormat,
    make_writer: F,
) -> Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>
where
    W: io::Write + Send + Sync + 'static,
    F: Fn() -> W + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
    }
}
