//! Calculator engine: the single state record behind every front end
//!
//! The engine owns the current result, the raw input text and the bounded
//! history. Every mutation bumps [`CalculatorEngine::revision`] so a
//! presentation layer knows when to redraw.
//!
//! Rejected operations (`InvalidInput`, `DivisionByZero`) leave the state
//! untouched and are returned to the caller, who surfaces them to the user.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::history::History;
use crate::core::parser::parse_operand;
use crate::core::view::CalculatorView;
use crate::core::{CalcResult, Operation};

/// Key that triggers [`Command::Add`]
pub const SUBMIT_KEY: &str = "Enter";

/// Zero-argument commands exposed to presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    /// result + operand
    Add,
    /// result - operand
    Subtract,
    /// result * operand
    Multiply,
    /// result / operand
    Divide,
    /// Clear the input text
    ResetInput,
    /// Set the result back to zero
    ResetResult,
}

impl Command {
    /// All commands in display order
    pub const ALL: [Self; 6] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::ResetInput,
        Self::ResetResult,
    ];

    /// Returns the arithmetic operation behind this command, if any
    #[must_use]
    pub const fn operation(self) -> Option<Operation> {
        match self {
            Self::Add => Some(Operation::Add),
            Self::Subtract => Some(Operation::Subtract),
            Self::Multiply => Some(Operation::Multiply),
            Self::Divide => Some(Operation::Divide),
            Self::ResetInput | Self::ResetResult => None,
        }
    }

    /// Stable kebab-case name (`add`, `reset-input`, ...)
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::ResetInput => "reset-input",
            Self::ResetResult => "reset-result",
        }
    }

    /// Looks a command up by name. Accepts `sub`, `mul` and `div` as aliases.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "add" => Some(Self::Add),
            "subtract" | "sub" => Some(Self::Subtract),
            "multiply" | "mul" => Some(Self::Multiply),
            "divide" | "div" => Some(Self::Divide),
            "reset-input" => Some(Self::ResetInput),
            "reset-result" => Some(Self::ResetResult),
            _ => None,
        }
    }

    /// Maps a key name to a command. Only `Enter` is bound (to Add).
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        (key == SUBMIT_KEY).then_some(Self::Add)
    }
}

/// Side effect a presentation layer should apply after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Effect {
    /// Nothing beyond a redraw
    #[default]
    None,
    /// Move focus back to the input control
    FocusInput,
}

/// Calculator state and the operations over it
#[derive(Debug, Clone, Default)]
pub struct CalculatorEngine {
    result: f64,
    input_text: String,
    history: History,
    revision: u64,
}

impl CalculatorEngine {
    /// Creates an engine with `result = 0`, empty input and empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current result
    #[must_use]
    pub fn result(&self) -> f64 {
        self.result
    }

    /// Returns the raw input text
    #[must_use]
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Returns the history (newest first)
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns the mutation counter
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the input text verbatim. No validation happens here.
    pub fn set_input(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.input_text {
            return;
        }
        trace!(input = %text, "input changed");
        self.input_text = text;
        self.bump();
    }

    /// Parses the current input text
    pub fn parsed_input(&self) -> CalcResult<f64> {
        parse_operand(&self.input_text)
    }

    /// True if the input parses to a finite number
    #[must_use]
    pub fn input_valid(&self) -> bool {
        self.parsed_input().is_ok()
    }

    /// True if the input is valid and non-zero
    #[must_use]
    pub fn can_divide(&self) -> bool {
        self.parsed_input()
            .is_ok_and(|operand| Operation::Divide.accepts(operand))
    }

    /// Applies `op` to the current result and the parsed input.
    ///
    /// On success the result is replaced and a history entry prepended.
    /// On failure nothing changes.
    pub fn apply(&mut self, op: Operation) -> CalcResult<f64> {
        let operand = self.parsed_input()?;
        let previous = self.result;
        let next = op.apply(previous, operand)?;

        self.result = next;
        let entry = self.history.record(op, operand, previous, next);
        self.bump();

        debug!(
            operator = op.symbol(),
            operand,
            previous,
            result = next,
            key = entry.timestamp,
            "operation applied"
        );
        Ok(next)
    }

    /// result + operand
    pub fn add(&mut self) -> CalcResult<f64> {
        self.apply(Operation::Add)
    }

    /// result - operand
    pub fn subtract(&mut self) -> CalcResult<f64> {
        self.apply(Operation::Subtract)
    }

    /// result * operand
    pub fn multiply(&mut self) -> CalcResult<f64> {
        self.apply(Operation::Multiply)
    }

    /// result / operand
    pub fn divide(&mut self) -> CalcResult<f64> {
        self.apply(Operation::Divide)
    }

    /// Clears the input text. Result and history are untouched.
    pub fn reset_input(&mut self) -> Effect {
        self.input_text.clear();
        self.bump();
        debug!("input reset");
        Effect::FocusInput
    }

    /// Sets the result to zero. Input and history are untouched.
    pub fn reset_result(&mut self) {
        self.result = 0.0;
        self.bump();
        debug!("result reset");
    }

    /// Runs a command
    pub fn execute(&mut self, command: Command) -> CalcResult<Effect> {
        match command {
            Command::ResetInput => Ok(self.reset_input()),
            Command::ResetResult => {
                self.reset_result();
                Ok(Effect::None)
            }
            Command::Add | Command::Subtract | Command::Multiply | Command::Divide => {
                // operation() is Some for every arithmetic command
                if let Some(op) = command.operation() {
                    self.apply(op)?;
                }
                Ok(Effect::None)
            }
        }
    }

    /// Handles a key event. Returns `None` when the key is not bound.
    pub fn handle_key(&mut self, key: &str) -> Option<CalcResult<Effect>> {
        Command::from_key(key).map(|command| self.execute(command))
    }

    /// Takes a render-ready snapshot of the state
    #[must_use]
    pub fn view(&self) -> CalculatorView {
        CalculatorView::from_engine(self)
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CalcError;
    use proptest::prelude::*;

    const OPERATIONS: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    fn engine_with(input: &str) -> CalculatorEngine {
        let mut engine = CalculatorEngine::new();
        engine.set_input(input);
        engine
    }

    // ===== Initial state =====

    #[test]
    fn test_engine_new() {
        let engine = CalculatorEngine::new();
        assert_eq!(engine.result(), 0.0);
        assert!(engine.input_text().is_empty());
        assert!(engine.history().is_empty());
        assert_eq!(engine.revision(), 0);
        assert!(!engine.input_valid());
        assert!(!engine.can_divide());
    }

    // ===== Scenarios =====

    #[test]
    fn test_add_from_zero() {
        let mut engine = engine_with("5");
        assert_eq!(engine.add(), Ok(5.0));
        assert_eq!(engine.result(), 5.0);

        let entry = engine.history().iter().next().unwrap();
        assert_eq!(entry.operator, Operation::Add);
        assert_eq!(entry.operand, 5.0);
        assert_eq!(entry.previous_result, 0.0);
        assert_eq!(entry.new_result, 5.0);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_divide_by_zero_rejected() {
        let mut engine = engine_with("5");
        engine.add().unwrap();
        engine.set_input("0");

        assert!(!engine.can_divide());
        assert_eq!(engine.divide(), Err(CalcError::DivisionByZero));
        assert_eq!(engine.result(), 5.0);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_multiply_prepends_entry() {
        let mut engine = engine_with("5");
        engine.add().unwrap();
        engine.set_input("2.5");
        assert_eq!(engine.multiply(), Ok(12.5));

        let entry = engine.history().iter().next().unwrap();
        assert_eq!(entry.operator, Operation::Multiply);
        assert_eq!(entry.operand, 2.5);
        assert_eq!(entry.previous_result, 5.0);
        assert_eq!(entry.new_result, 12.5);
        assert_eq!(engine.history().iter().last().unwrap().operator, Operation::Add);
    }

    #[test]
    fn test_comma_input() {
        let mut engine = engine_with("1,234.5");
        assert_eq!(engine.parsed_input(), Ok(1234.5));
        assert_eq!(engine.add(), Ok(1234.5));
    }

    #[test]
    fn test_subtract() {
        let mut engine = engine_with("3");
        assert_eq!(engine.subtract(), Ok(-3.0));
    }

    #[test]
    fn test_zero_operand_allowed_for_other_operations() {
        let mut engine = engine_with("0");
        assert!(engine.input_valid());
        assert!(engine.add().is_ok());
        assert!(engine.subtract().is_ok());
        assert!(engine.multiply().is_ok());
        assert_eq!(engine.history().len(), 3);
    }

    // ===== Rejections =====

    #[test]
    fn test_invalid_input_rejected_without_mutation() {
        for text in ["", "   ", "abc", "1 + 2", ",", "inf"] {
            let mut engine = engine_with(text);
            let before = engine.revision();
            for op in OPERATIONS {
                assert_eq!(engine.apply(op), Err(CalcError::InvalidInput), "{text:?}");
            }
            assert_eq!(engine.result(), 0.0);
            assert!(engine.history().is_empty());
            assert_eq!(engine.revision(), before);
        }
    }

    #[test]
    fn test_operations_do_not_touch_input() {
        let mut engine = engine_with(" 7 ");
        engine.add().unwrap();
        engine.multiply().unwrap();
        assert_eq!(engine.input_text(), " 7 ");
    }

    // ===== Resets =====

    #[test]
    fn test_reset_input() {
        let mut engine = engine_with("5");
        engine.add().unwrap();
        assert_eq!(engine.reset_input(), Effect::FocusInput);
        assert!(engine.input_text().is_empty());
        assert_eq!(engine.result(), 5.0);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_reset_result() {
        let mut engine = engine_with("5");
        engine.add().unwrap();
        engine.reset_result();
        assert_eq!(engine.result(), 0.0);
        assert_eq!(engine.input_text(), "5");
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_resets_are_idempotent() {
        let mut engine = CalculatorEngine::new();
        engine.reset_result();
        engine.reset_result();
        assert_eq!(engine.result(), 0.0);
        engine.reset_input();
        engine.reset_input();
        assert!(engine.input_text().is_empty());
    }

    // ===== Commands and keys =====

    #[test]
    fn test_execute_commands() {
        let mut engine = engine_with("4");
        assert_eq!(engine.execute(Command::Add), Ok(Effect::None));
        assert_eq!(engine.execute(Command::Multiply), Ok(Effect::None));
        assert_eq!(engine.result(), 16.0);
        assert_eq!(engine.execute(Command::Divide), Ok(Effect::None));
        assert_eq!(engine.execute(Command::Subtract), Ok(Effect::None));
        assert_eq!(engine.result(), 0.0);
        assert_eq!(engine.execute(Command::ResetInput), Ok(Effect::FocusInput));
        assert_eq!(engine.execute(Command::ResetResult), Ok(Effect::None));
    }

    #[test]
    fn test_execute_propagates_rejection() {
        let mut engine = engine_with("0");
        assert_eq!(
            engine.execute(Command::Divide),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_enter_key_adds() {
        let mut engine = engine_with("2");
        assert_eq!(engine.handle_key("Enter"), Some(Ok(Effect::None)));
        assert_eq!(engine.result(), 2.0);
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut engine = engine_with("2");
        assert_eq!(engine.handle_key("Escape"), None);
        assert_eq!(engine.result(), 0.0);
    }

    #[test]
    fn test_command_names_round_trip() {
        for command in Command::ALL {
            assert_eq!(Command::from_name(command.name()), Some(command));
        }
        assert_eq!(Command::from_name("MUL"), Some(Command::Multiply));
        assert_eq!(Command::from_name("div"), Some(Command::Divide));
        assert_eq!(Command::from_name("sub"), Some(Command::Subtract));
        assert_eq!(Command::from_name("modulo"), None);
    }

    #[test]
    fn test_command_operation() {
        assert_eq!(Command::Divide.operation(), Some(Operation::Divide));
        assert_eq!(Command::ResetInput.operation(), None);
    }

    // ===== Revision =====

    #[test]
    fn test_revision_tracks_mutations() {
        let mut engine = CalculatorEngine::new();
        engine.set_input("1");
        assert_eq!(engine.revision(), 1);
        engine.set_input("1");
        assert_eq!(engine.revision(), 1);
        engine.add().unwrap();
        assert_eq!(engine.revision(), 2);
        engine.set_input("0");
        let _ = engine.divide();
        assert_eq!(engine.revision(), 3);
    }

    #[test]
    fn test_overflow_to_infinity_is_kept() {
        let mut engine = engine_with("1e308");
        engine.add().unwrap();
        engine.set_input("10");
        engine.multiply().unwrap();
        assert!(engine.result().is_infinite());
        assert_eq!(engine.view().result, "Infinity");
    }

    proptest! {
        #[test]
        fn prop_rejected_input_never_mutates(text in "[a-zA-Z ]{0,10}") {
            let mut engine = engine_with(&text);
            for op in OPERATIONS {
                prop_assert!(engine.apply(op).is_err());
            }
            prop_assert_eq!(engine.result(), 0.0);
            prop_assert!(engine.history().is_empty());
        }

        #[test]
        fn prop_result_tracks_latest_entry(values in proptest::collection::vec(-1e6f64..1e6f64, 1..20)) {
            let mut engine = CalculatorEngine::new();
            for v in &values {
                engine.set_input(v.to_string());
                engine.add().unwrap();
                prop_assert_eq!(engine.result(), engine.history().iter().next().unwrap().new_result);
            }
            prop_assert!(engine.history().len() <= History::MAX_ENTRIES);
        }

        #[test]
        fn prop_reset_result_always_zero(v in -1e9f64..1e9f64) {
            let mut engine = engine_with(&v.to_string());
            engine.add().unwrap();
            engine.reset_result();
            prop_assert_eq!(engine.result(), 0.0);
            prop_assert_eq!(engine.history().len(), 1);
        }
    }
}
