//! Batch driver
//!
//! Runs a line-oriented script against a [`CalculatorEngine`]:
//!
//! ```text
//! # comments and blank lines are skipped
//! input 5
//! add
//! input 2.5
//! mul
//! show
//! ```
//!
//! The whole script is parsed before anything runs, so a typo on line 40
//! fails fast instead of after 39 lines of output.

use std::io::Write;

use serde::Serialize;
use tracing::info;

use crate::core::{CalcError, CalcResult, CalculatorEngine, CalculatorView, Command, Effect};
use crate::error::{CliError, CliResult};

/// One executable script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Replace the input text
    Input(String),
    /// Run a command
    Run(Command),
    /// Send a key press
    Key(String),
    /// Print the current view
    Show,
}

impl Directive {
    /// Short name used in JSON records
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Input(_) => "input",
            Self::Run(command) => command.name(),
            Self::Key(_) => "key",
            Self::Show => "show",
        }
    }
}

/// A directive with its 1-based source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based line number
    pub line: usize,
    /// Parsed directive
    pub directive: Directive,
}

/// Parses a whole script. Blank lines and `#` comments are dropped.
pub fn parse_script(source: &str) -> CliResult<Vec<ScriptLine>> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, text)| {
            let line = index + 1;
            parse_line(line, text)
                .transpose()
                .map(|directive| directive.map(|directive| ScriptLine { line, directive }))
        })
        .collect()
}

/// Parses one line; `Ok(None)` for blank lines and comments
pub fn parse_line(line: usize, text: &str) -> CliResult<Option<Directive>> {
    let body = text.trim_start();
    if body.trim_end().is_empty() || body.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match body.find(char::is_whitespace) {
        Some(at) => body.split_at(at),
        None => (body, ""),
    };

    if word.eq_ignore_ascii_case("input") {
        // Keep the argument verbatim apart from one separating space
        let arg = rest.strip_prefix(' ').unwrap_or(rest);
        return Ok(Some(Directive::Input(arg.to_string())));
    }

    if word.eq_ignore_ascii_case("key") {
        let key = rest.trim();
        if key.is_empty() {
            return Err(CliError::script(line, "`key` needs a key name"));
        }
        return Ok(Some(Directive::Key(key.to_string())));
    }

    let directive = if word.eq_ignore_ascii_case("show") {
        Directive::Show
    } else if let Some(command) = Command::from_name(word) {
        Directive::Run(command)
    } else {
        return Err(CliError::script(line, format!("unknown directive `{word}`")));
    };

    if !rest.trim().is_empty() {
        return Err(CliError::script(
            line,
            format!("`{word}` takes no argument"),
        ));
    }
    Ok(Some(directive))
}

/// Machine-readable record printed per directive with `--json`
#[derive(Debug, Clone, Serialize)]
pub struct BatchRecord {
    /// Source line
    pub line: usize,
    /// Directive name
    pub directive: &'static str,
    /// Error code if the directive was rejected
    pub error: Option<&'static str>,
    /// Error message if the directive was rejected
    pub message: Option<String>,
    /// State after the directive
    pub view: CalculatorView,
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Directives executed
    pub directives: usize,
    /// Commands that succeeded
    pub accepted: usize,
    /// Commands rejected with an alert
    pub rejected: usize,
}

/// Executes parsed scripts against one engine
#[derive(Debug, Default)]
pub struct BatchRunner {
    engine: CalculatorEngine,
    json: bool,
}

impl BatchRunner {
    /// Creates a runner; `json` selects one JSON record per directive
    #[must_use]
    pub fn new(json: bool) -> Self {
        Self {
            engine: CalculatorEngine::new(),
            json,
        }
    }

    /// Returns the engine
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    /// Parses and runs `source`, writing output to `out`
    pub fn run_source(&mut self, source: &str, out: &mut impl Write) -> CliResult<BatchSummary> {
        let script = parse_script(source)?;
        self.run(&script, out)
    }

    /// Runs a parsed script, writing output to `out`
    pub fn run(&mut self, script: &[ScriptLine], out: &mut impl Write) -> CliResult<BatchSummary> {
        let mut summary = BatchSummary::default();

        for ScriptLine { line, directive } in script {
            summary.directives += 1;
            let outcome = self.execute(directive);
            match outcome {
                Some(Ok(_)) => summary.accepted += 1,
                Some(Err(_)) => summary.rejected += 1,
                None => {}
            }

            if self.json {
                self.write_record(*line, directive, outcome, out)?;
            } else {
                self.write_text(directive, outcome, out)?;
            }
        }

        out.flush()?;
        info!(
            directives = summary.directives,
            accepted = summary.accepted,
            rejected = summary.rejected,
            "batch finished"
        );
        Ok(summary)
    }

    /// Runs one directive. `None` when it ran no command.
    fn execute(&mut self, directive: &Directive) -> Option<CalcResult<Effect>> {
        match directive {
            Directive::Input(text) => {
                self.engine.set_input(text.as_str());
                None
            }
            Directive::Run(command) => Some(self.engine.execute(*command)),
            Directive::Key(key) => self.engine.handle_key(key),
            Directive::Show => None,
        }
    }

    fn write_text(
        &self,
        directive: &Directive,
        outcome: Option<CalcResult<Effect>>,
        out: &mut impl Write,
    ) -> CliResult<()> {
        match outcome {
            Some(Ok(_)) => writeln!(out, "= {}", self.engine.view().result)?,
            Some(Err(err)) => writeln!(out, "! {err}")?,
            None if *directive == Directive::Show => {
                let view = self.engine.view();
                writeln!(out, "result: {}", view.result)?;
                writeln!(out, "input: {:?}", view.input_text)?;
                for row in &view.history {
                    writeln!(out, "  {}", row.display())?;
                }
            }
            None => {}
        }
        Ok(())
    }

    fn write_record(
        &self,
        line: usize,
        directive: &Directive,
        outcome: Option<CalcResult<Effect>>,
        out: &mut impl Write,
    ) -> CliResult<()> {
        let rejection: Option<CalcError> = outcome.and_then(Result::err);
        let record = BatchRecord {
            line,
            directive: directive.name(),
            error: rejection.map(|e| e.code()),
            message: rejection.map(|e| e.to_string()),
            view: self.engine.view(),
        };
        serde_json::to_writer(&mut *out, &record)?;
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_text(source: &str) -> (String, BatchSummary) {
        let mut runner = BatchRunner::new(false);
        let mut out = Vec::new();
        let summary = runner.run_source(source, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    // ===== Parsing =====

    #[test]
    fn test_parse_skips_blank_and_comments() {
        let script = parse_script("\n   \n# note\n  # indented note\nadd\n").unwrap();
        assert_eq!(script.len(), 1);
        assert_eq!(script[0].line, 5);
        assert_eq!(script[0].directive, Directive::Run(Command::Add));
    }

    #[test]
    fn test_parse_input_keeps_text_verbatim() {
        assert_eq!(
            parse_line(1, "input 1,234.5").unwrap(),
            Some(Directive::Input("1,234.5".into()))
        );
        assert_eq!(
            parse_line(1, "input   5 ").unwrap(),
            Some(Directive::Input("  5 ".into()))
        );
        assert_eq!(
            parse_line(1, "input").unwrap(),
            Some(Directive::Input(String::new()))
        );
    }

    #[test]
    fn test_parse_commands_and_aliases() {
        let cases = [
            ("add", Command::Add),
            ("sub", Command::Subtract),
            ("MUL", Command::Multiply),
            ("div", Command::Divide),
            ("reset-input", Command::ResetInput),
            ("reset-result", Command::ResetResult),
        ];
        for (text, command) in cases {
            assert_eq!(parse_line(1, text).unwrap(), Some(Directive::Run(command)));
        }
    }

    #[test]
    fn test_parse_key_and_show() {
        assert_eq!(
            parse_line(1, "key Enter").unwrap(),
            Some(Directive::Key("Enter".into()))
        );
        assert_eq!(parse_line(1, "show").unwrap(), Some(Directive::Show));
    }

    #[test]
    fn test_parse_unknown_directive_reports_line() {
        let err = parse_script("input 2\nadd\npow\n").unwrap_err();
        assert!(matches!(err, CliError::Script { line: 3, .. }));
        assert!(err.to_string().contains("unknown directive `pow`"));
    }

    #[test]
    fn test_parse_rejects_stray_argument() {
        let err = parse_line(7, "add 5").unwrap_err();
        assert!(matches!(err, CliError::Script { line: 7, .. }));
    }

    #[test]
    fn test_parse_key_requires_name() {
        assert!(parse_line(2, "key").is_err());
        assert!(parse_line(2, "key   ").is_err());
    }

    #[test]
    fn test_directive_names() {
        assert_eq!(Directive::Input(String::new()).name(), "input");
        assert_eq!(Directive::Run(Command::ResetInput).name(), "reset-input");
        assert_eq!(Directive::Key("Enter".into()).name(), "key");
        assert_eq!(Directive::Show.name(), "show");
    }

    // ===== Text output =====

    #[test]
    fn test_run_worked_example() {
        let (out, summary) = run_text("input 5\nadd\ninput 0\ndiv\ninput 2.5\nmul\n");
        assert_eq!(
            out,
            "= 5\n! Division by zero is not allowed\n= 12.5\n"
        );
        assert_eq!(
            summary,
            BatchSummary {
                directives: 6,
                accepted: 2,
                rejected: 1
            }
        );
    }

    #[test]
    fn test_run_invalid_input() {
        let (out, _) = run_text("input abc\nadd\n");
        assert_eq!(out, "! Please enter a valid number\n");
    }

    #[test]
    fn test_run_key_enter_adds() {
        let (out, summary) = run_text("input 3\nkey Enter\nkey Tab\n");
        assert_eq!(out, "= 3\n");
        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.directives, 3);
    }

    #[test]
    fn test_run_resets() {
        let (out, _) = run_text("input 4\nadd\nreset-result\nreset-input\nshow\n");
        assert_eq!(
            out,
            "= 4\n= 0\n= 0\nresult: 0\ninput: \"\"\n  0 + 4 = 4\n"
        );
    }

    #[test]
    fn test_script_error_runs_nothing() {
        let mut runner = BatchRunner::new(false);
        let mut out = Vec::new();
        assert!(runner.run_source("input 1\nadd\nbogus\n", &mut out).is_err());
        assert!(out.is_empty());
        assert_eq!(runner.engine().result(), 0.0);
    }

    // ===== JSON output =====

    #[test]
    fn test_json_records() {
        let mut runner = BatchRunner::new(true);
        let mut out = Vec::new();
        runner
            .run_source("input 0\ndivide\nadd\n", &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["directive"], "input");
        assert_eq!(lines[0]["view"]["input_text"], "0");
        assert!(lines[0]["error"].is_null());

        assert_eq!(lines[1]["line"], 2);
        assert_eq!(lines[1]["error"], "division_by_zero");
        assert_eq!(lines[1]["message"], "Division by zero is not allowed");

        assert_eq!(lines[2]["directive"], "add");
        assert_eq!(lines[2]["view"]["result"], "0");
        assert_eq!(lines[2]["view"]["history"][0]["operator"], "+");
    }
}
