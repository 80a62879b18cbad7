//! Application configuration

use std::io::IsTerminal;
use std::path::PathBuf;

/// Minimum level of log events to record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    #[default]
    Warn,
    /// Informational
    Info,
    /// Every operation and reset
    Debug,
    /// Input edits too
    Trace,
}

impl LogLevel {
    /// Directive accepted by `EnvFilter`
    #[must_use]
    pub const fn as_filter(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when stderr is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should stderr be colored
    #[must_use]
    pub fn should_color_stderr(self) -> bool {
        self.resolve(|| std::io::stderr().is_terminal())
    }

    fn resolve(self, is_terminal: impl FnOnce() -> bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::env::var_os("NO_COLOR").is_none() && is_terminal(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// Log destination; `None` means stderr in batch mode, nowhere in the TUI
    pub log_file: Option<PathBuf>,
    /// Color output choice
    pub color: ColorChoice,
    /// Print one JSON view per batch command
    pub json: bool,
}

impl AppConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set log level
    #[must_use]
    pub const fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Set log file
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set JSON batch output
    #[must_use]
    pub const fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}
