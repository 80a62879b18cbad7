//! Unified calculator driver
//!
//! Every front end implements [`CalculatorDriver`], and the `verify_*`
//! functions below exercise the calculator's observable behavior through it.
//! The same assertions therefore run against the terminal app and the DOM
//! widget.

use crate::core::{CalcError, CalcResult, Command, History, HistoryRow};

/// Abstract driver over a calculator front end
///
/// # Example
///
/// ```rust
/// use calc_widget::core::Command;
/// use calc_widget::driver::CalculatorDriver;
/// use calc_widget::wasm::WasmDriver;
///
/// let mut driver = WasmDriver::new();
/// driver.set_input("5");
/// driver.run(Command::Add).unwrap();
/// assert_eq!(driver.result_display(), "5");
/// ```
pub trait CalculatorDriver {
    /// Replaces the input text, as if the user typed it
    fn set_input(&mut self, text: &str);

    /// Invokes a command handler directly, regardless of control state
    fn run(&mut self, command: Command) -> CalcResult<()>;

    /// Sends a key press. Unbound keys are ignored and return `Ok`.
    fn press_key(&mut self, key: &str) -> CalcResult<()>;

    /// Returns the formatted result
    fn result_display(&self) -> String;

    /// Returns the raw input text
    fn input_text(&self) -> String;

    /// Returns the history rows, newest first
    fn history(&self) -> Vec<HistoryRow>;

    /// Whether the input currently parses to a finite number
    fn input_valid(&self) -> bool;

    /// Whether Divide is currently allowed
    fn can_divide(&self) -> bool;

    /// Returns the most recent alert raised by a rejected command
    fn last_alert(&self) -> Option<CalcError>;
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use super::{CalcError, CalcResult, CalculatorDriver, Command, HistoryRow};
    use crate::core::engine::SUBMIT_KEY;
    use crate::tui::{CalculatorApp, KeyAction};

    /// Driver wrapping the terminal [`CalculatorApp`]
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }

        fn outcome(&self) -> CalcResult<()> {
            match self.app.alert() {
                Some(err) => Err(*err),
                None => Ok(()),
            }
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn set_input(&mut self, text: &str) {
            self.app.dismiss_alert();
            self.app.set_input(text);
        }

        fn run(&mut self, command: Command) -> CalcResult<()> {
            self.app.dismiss_alert();
            self.app.run_command(command)
        }

        fn press_key(&mut self, key: &str) -> CalcResult<()> {
            self.app.dismiss_alert();
            if key == SUBMIT_KEY {
                self.app.focus_input();
                self.app.handle_action(KeyAction::Submit);
            }
            self.outcome()
        }

        fn result_display(&self) -> String {
            self.app.view().result
        }

        fn input_text(&self) -> String {
            self.app.input().to_string()
        }

        fn history(&self) -> Vec<HistoryRow> {
            self.app.view().history
        }

        fn input_valid(&self) -> bool {
            self.app.engine().input_valid()
        }

        fn can_divide(&self) -> bool {
            self.app.engine().can_divide()
        }

        fn last_alert(&self) -> Option<CalcError> {
            self.app.last_alert().copied()
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Shared verification =====
// These work with ANY CalculatorDriver implementation

/// Starts from a zero result with an empty input
fn reset_all<D: CalculatorDriver>(driver: &mut D) {
    assert_eq!(driver.run(Command::ResetResult), Ok(()));
    assert_eq!(driver.run(Command::ResetInput), Ok(()));
}

/// Verifies the worked scenarios: add, rejected divide, multiply, grouping
/// and float noise
pub fn verify_scenarios<D: CalculatorDriver>(driver: &mut D) {
    reset_all(driver);
    let before = driver.history().len();

    driver.set_input("5");
    assert_eq!(driver.run(Command::Add), Ok(()));
    assert_eq!(driver.result_display(), "5");
    let history = driver.history();
    assert_eq!(history.len(), (before + 1).min(History::MAX_ENTRIES));
    assert_eq!(history[0].display(), "0 + 5 = 5");

    driver.set_input("0");
    assert_eq!(driver.run(Command::Divide), Err(CalcError::DivisionByZero));
    assert_eq!(driver.last_alert(), Some(CalcError::DivisionByZero));
    assert_eq!(driver.result_display(), "5");
    assert_eq!(driver.history(), history);

    driver.set_input("2.5");
    assert_eq!(driver.run(Command::Multiply), Ok(()));
    assert_eq!(driver.result_display(), "12.5");
    assert_eq!(driver.history()[0].display(), "5 * 2.5 = 12.5");

    reset_all(driver);
    driver.set_input("1,234.5");
    assert!(driver.input_valid());
    assert_eq!(driver.run(Command::Add), Ok(()));
    assert_eq!(driver.result_display(), "1234.5");

    reset_all(driver);
    driver.set_input("0.1");
    assert_eq!(driver.run(Command::Add), Ok(()));
    driver.set_input("0.2");
    assert_eq!(driver.run(Command::Add), Ok(()));
    assert_eq!(driver.result_display(), "0.3");
}

/// Verifies that invalid input is rejected by every operation without
/// touching state
pub fn verify_rejections<D: CalculatorDriver>(driver: &mut D) {
    reset_all(driver);
    driver.set_input("7");
    assert_eq!(driver.run(Command::Add), Ok(()));

    for text in ["", "   ", "abc", ",", "1.2.3", "inf", "NaN"] {
        driver.set_input(text);
        assert!(!driver.input_valid(), "{text:?} should be invalid");
        assert!(!driver.can_divide());

        let result = driver.result_display();
        let history = driver.history();
        for command in [
            Command::Add,
            Command::Subtract,
            Command::Multiply,
            Command::Divide,
        ] {
            assert_eq!(driver.run(command), Err(CalcError::InvalidInput));
            assert_eq!(driver.last_alert(), Some(CalcError::InvalidInput));
            assert_eq!(driver.result_display(), result);
            assert_eq!(driver.history(), history);
        }
    }

    driver.set_input("0");
    assert!(driver.input_valid());
    assert!(!driver.can_divide());
    assert_eq!(driver.run(Command::Multiply), Ok(()));
    assert_eq!(driver.result_display(), "0");
}

/// Verifies that history keeps at most six entries, newest first
pub fn verify_history_bound<D: CalculatorDriver>(driver: &mut D) {
    reset_all(driver);
    driver.set_input("1");
    for _ in 0..7 {
        assert_eq!(driver.run(Command::Add), Ok(()));
        assert!(driver.history().len() <= History::MAX_ENTRIES);
    }

    let history = driver.history();
    assert_eq!(history.len(), History::MAX_ENTRIES);
    assert_eq!(history[0].display(), "6 + 1 = 7");
    assert_eq!(history[5].display(), "1 + 1 = 2");
    assert!(history.windows(2).all(|w| w[0].key > w[1].key));
}

/// Verifies that each reset touches only its own field
pub fn verify_resets<D: CalculatorDriver>(driver: &mut D) {
    reset_all(driver);
    driver.set_input("3");
    assert_eq!(driver.run(Command::Add), Ok(()));
    let history = driver.history();

    assert_eq!(driver.run(Command::ResetResult), Ok(()));
    assert_eq!(driver.result_display(), "0");
    assert_eq!(driver.input_text(), "3");
    assert_eq!(driver.history(), history);

    assert_eq!(driver.run(Command::ResetInput), Ok(()));
    assert_eq!(driver.input_text(), "");
    assert_eq!(driver.result_display(), "0");
    assert_eq!(driver.history(), history);
}

/// Verifies that Enter behaves exactly like Add and other keys do nothing
pub fn verify_enter_key<D: CalculatorDriver>(driver: &mut D) {
    reset_all(driver);
    driver.set_input("4");
    assert_eq!(driver.press_key("Enter"), Ok(()));
    assert_eq!(driver.result_display(), "4");
    assert_eq!(driver.history()[0].display(), "0 + 4 = 4");

    let history = driver.history();
    assert_eq!(driver.press_key("a"), Ok(()));
    assert_eq!(driver.press_key("Tab"), Ok(()));
    assert_eq!(driver.result_display(), "4");
    assert_eq!(driver.history(), history);

    driver.set_input("four");
    assert_eq!(driver.press_key("Enter"), Err(CalcError::InvalidInput));
    assert_eq!(driver.result_display(), "4");
}

/// Runs every verification
pub fn verify_all<D: CalculatorDriver>(driver: &mut D) {
    verify_scenarios(driver);
    verify_rejections(driver);
    verify_history_bound(driver);
    verify_resets(driver);
    verify_enter_key(driver);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "tui")]
    mod tui_tests {
        use super::*;
        use crate::tui::CalculatorApp;

        #[test]
        fn test_tui_driver_new() {
            let driver = TuiDriver::new();
            assert!(driver.input_text().is_empty());
            assert_eq!(driver.result_display(), "0");
            assert!(driver.last_alert().is_none());
        }

        #[test]
        fn test_tui_driver_with_app() {
            let mut app = CalculatorApp::new();
            app.set_input("9");
            let driver = TuiDriver::with_app(app);
            assert_eq!(driver.input_text(), "9");
            assert!(driver.input_valid());
        }

        #[test]
        fn test_tui_driver_app_access() {
            let mut driver = TuiDriver::new();
            driver.app_mut().set_input("12");
            assert_eq!(driver.app().input(), "12");
        }

        #[test]
        fn test_tui_driver_run_dismisses_previous_alert() {
            let mut driver = TuiDriver::new();
            driver.set_input("x");
            assert!(driver.run(Command::Add).is_err());
            assert!(driver.app().alert().is_some());

            driver.set_input("2");
            assert!(driver.app().alert().is_none());
            assert_eq!(driver.run(Command::Add), Ok(()));
            assert_eq!(driver.last_alert(), Some(CalcError::InvalidInput));
        }

        #[test]
        fn test_tui_press_enter_from_button_focus() {
            let mut driver = TuiDriver::new();
            driver.set_input("3");
            driver.app_mut().focus_next();
            driver.app_mut().focus_next();
            assert_eq!(driver.press_key("Enter"), Ok(()));
            assert_eq!(driver.result_display(), "3");
        }

        #[test]
        fn test_unified_scenarios() {
            verify_scenarios(&mut TuiDriver::new());
        }

        #[test]
        fn test_unified_rejections() {
            verify_rejections(&mut TuiDriver::new());
        }

        #[test]
        fn test_unified_history_bound() {
            verify_history_bound(&mut TuiDriver::new());
        }

        #[test]
        fn test_unified_resets() {
            verify_resets(&mut TuiDriver::new());
        }

        #[test]
        fn test_unified_enter_key() {
            verify_enter_key(&mut TuiDriver::new());
        }

        #[test]
        fn test_verify_all() {
            verify_all(&mut TuiDriver::new());
        }
    }
}
