//! CLI command definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{AppConfig, ColorChoice, LogLevel};

/// Calc Widget: single-page arithmetic calculator
#[derive(Parser, Debug)]
#[command(name = "calc-widget")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log level used when RUST_LOG is unset
    #[arg(long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevelArg,

    /// Write logs to this file (the TUI logs nowhere without it)
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Color output (auto, always, never)
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run; defaults to `tui`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Folds the global flags and subcommand options into an [`AppConfig`]
    #[must_use]
    pub fn to_config(&self) -> AppConfig {
        let json = matches!(&self.command, Some(Commands::Batch(args)) if args.json);
        AppConfig::new()
            .with_log_level(self.log_level.into())
            .with_log_file(self.log_file.clone())
            .with_color(self.color.into())
            .with_json(json)
    }

    /// The subcommand, with the default applied
    #[must_use]
    pub fn subcommand(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Tui)
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the interactive terminal calculator
    Tui,

    /// Run a script of calculator directives
    Batch(BatchArgs),
}

/// Arguments for the batch command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct BatchArgs {
    /// Print one JSON record per directive
    #[arg(long)]
    pub json: bool,

    /// Script file; reads stdin when omitted
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Log level argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Errors only
    Error,
    /// Warnings and errors
    #[default]
    Warn,
    /// Informational
    Info,
    /// Operations and resets
    Debug,
    /// Everything, input edits included
    Trace,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
            LogLevelArg::Trace => Self::Trace,
        }
    }
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
