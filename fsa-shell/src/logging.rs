//! Log subscriber setup.
//!
//! Stdout carries the prompt protocol, so every layer writes to stderr.

use std::io;

use clap::ValueEnum;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{Layer, filter::Targets, fmt, layer::SubscriberExt};

use crate::config::{CORE_TARGET, LogConfig, SHELL_TARGET};

/// Log output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Multi-line, coloured
    Pretty,
    /// One line per event
    Compact,
    /// JSON, for tooling
    Json,
}

/// Installs the global subscriber. Fails if one is already set.
pub fn init(log_config: &LogConfig, format: LogFormat) -> Result<(), TryInitError> {
    let targets = Targets::new()
        .with_default(log_config.global)
        .with_target(CORE_TARGET, log_config.level_for(CORE_TARGET))
        .with_target(SHELL_TARGET, log_config.level_for(SHELL_TARGET));

    let stderr_layer = create_format_layer(format, io::stderr).with_filter(targets);
    tracing_subscriber::registry().with(stderr_layer).try_init()
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
            .with_target(false)
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
