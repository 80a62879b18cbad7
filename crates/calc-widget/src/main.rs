//! Calc Widget CLI
//!
//! ## Usage
//!
//! ```bash
//! calc-widget                          # Interactive terminal calculator
//! calc-widget batch ops.txt            # Run a script
//! echo "input 5
//! add" | calc-widget batch --json      # Script from stdin, JSON records
//! ```

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Stdout};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use calc_widget::cli::{BatchArgs, Cli, Commands};
use calc_widget::script::BatchRunner;
use calc_widget::tui::{render, CalculatorApp, InputHandler};
use calc_widget::{AppConfig, CliError, CliResult};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = cli.to_config();

    match cli.subcommand() {
        Commands::Tui => {
            init_tracing(&config, false)?;
            run_tui()
        }
        Commands::Batch(args) => {
            init_tracing(&config, true)?;
            run_batch(&config, &args)
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `--log-level`.
///
/// The TUI owns the terminal, so without `--log-file` it logs nowhere.
fn init_tracing(config: &AppConfig, stderr_allowed: bool) -> CliResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.as_filter()))
        .map_err(|e| CliError::config(format!("invalid log filter: {e}")))?;

    if let Some(path) = &config.log_file {
        let file = open_log_file(path)?;
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();
        info!(path = %path.display(), "logging initialized");
    } else if stderr_allowed {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(config.color.should_color_stderr())
                    .with_writer(io::stderr),
            )
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry().with(env_filter).init();
    }
    Ok(())
}

fn open_log_file(path: &Path) -> CliResult<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CliError::config(format!("cannot open log file {}: {e}", path.display())))
}

fn run_batch(config: &AppConfig, args: &BatchArgs) -> CliResult<()> {
    let source = match &args.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            source
        }
    };

    let mut runner = BatchRunner::new(config.json);
    let mut out = BufWriter::new(io::stdout().lock());
    runner.run_source(&source, &mut out)?;
    Ok(())
}

/// Raw mode plus alternate screen, restored on drop
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> CliResult<Self> {
        enable_raw_mode().map_err(|e| CliError::terminal(format!("raw mode unavailable: {e}")))?;

        let mut out = io::stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(CliError::terminal(err.to_string()));
        }

        match Terminal::new(CrosstermBackend::new(out)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                Err(CliError::terminal(err.to_string()))
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn run_tui() -> CliResult<()> {
    let mut session = TerminalSession::new()?;
    let mut app = CalculatorApp::new();
    let input_handler = InputHandler::new();
    info!("terminal session started");

    while !app.should_quit() {
        if app.needs_redraw() {
            session.terminal.draw(|frame| render(&app, frame))?;
            app.mark_drawn();
        }

        match event::read()? {
            Event::Key(key) => {
                app.handle_action(input_handler.handle_key(key));
            }
            Event::Resize(..) => app.invalidate(),
            _ => {}
        }
    }

    info!(
        result = app.engine().result(),
        operations = app.engine().history().len(),
        "terminal session ended"
    );
    Ok(())
}
