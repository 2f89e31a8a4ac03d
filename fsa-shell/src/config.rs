//! Command line options and the log configuration derived from them.

use clap::Parser;
use tracing::Level;

use crate::logging::LogFormat;

/// Target used by the automaton library's events.
pub const CORE_TARGET: &str = "fsa";

/// Target used by the shell's own events.
pub const SHELL_TARGET: &str = "fsa_shell";

#[derive(Parser, Debug)]
#[command(
    name = "fsa",
    about = "Define a deterministic finite state automaton A(\u{03A3},S,s\u{2080},\u{03B4},F) and test words against it",
    version
)]
pub struct Cli {
    /// Log level for everything (error, warn, info, debug, trace). Logs go to stderr.
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: Level,

    /// Log level override for the automaton library.
    #[arg(long, value_name = "LEVEL")]
    pub core_log_level: Option<Level>,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Skip the welcome banner.
    #[arg(long)]
    pub no_banner: bool,
}

impl Cli {
    /// Per-target levels taken from `--log-level` and `--core-log-level`.
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            global: self.log_level,
            core: self.core_log_level,
        }
    }
}

/// Per-target log levels.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level for every target without an override.
    pub global: Level,
    /// Override for [`CORE_TARGET`].
    pub core: Option<Level>,
}

impl LogConfig {
    /// Get log level for a specific target
    pub fn level_for(&self, target: &str) -> Level {
        match target {
            CORE_TARGET => self.core.unwrap_or(self.global),
            _ => self.global,
        }
    }
}
