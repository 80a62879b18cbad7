//! WASM driver
//!
//! Implements [`CalculatorDriver`] for the DOM widget so the shared
//! verifications run against it as well as against the terminal app.

use super::calculator::{button_id, WebCalculator};
use super::dom::{DomEvent, MockDom, INPUT_ID};
use crate::core::{CalcError, CalcResult, Command, HistoryRow};
use crate::driver::CalculatorDriver;

/// Driver wrapping a [`WebCalculator`]
#[derive(Debug, Default)]
pub struct WasmDriver {
    calculator: WebCalculator,
}

impl WasmDriver {
    /// Creates a new WASM driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver around an existing widget
    #[must_use]
    pub fn with_calculator(calculator: WebCalculator) -> Self {
        Self { calculator }
    }

    /// Returns the widget
    #[must_use]
    pub fn calculator(&self) -> &WebCalculator {
        &self.calculator
    }

    /// Returns the widget mutably
    pub fn calculator_mut(&mut self) -> &mut WebCalculator {
        &mut self.calculator
    }

    /// Returns the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        self.calculator.dom()
    }

    /// Simulates a user click on a command's button.
    ///
    /// Returns `None` if the button is disabled.
    pub fn click(&mut self, command: Command) -> Option<CalcResult<()>> {
        self.calculator
            .handle_event(DomEvent::click(button_id(command)))
    }

    /// Text of the result element
    #[must_use]
    pub fn result_element_text(&self) -> Option<&str> {
        self.dom().get_element_text(super::dom::RESULT_ID)
    }

    /// `value` attribute of the input element
    #[must_use]
    pub fn input_element_value(&self) -> Option<&str> {
        self.dom()
            .get_element(INPUT_ID)
            .and_then(|e| e.get_attr("value"))
    }
}

impl CalculatorDriver for WasmDriver {
    fn set_input(&mut self, text: &str) {
        self.calculator.handle_event(DomEvent::input(INPUT_ID, text));
    }

    fn run(&mut self, command: Command) -> CalcResult<()> {
        self.calculator.invoke(command)
    }

    fn press_key(&mut self, key: &str) -> CalcResult<()> {
        self.calculator.handle_event(DomEvent::focus(INPUT_ID));
        self.calculator
            .handle_event(DomEvent::key_press(key))
            .unwrap_or(Ok(()))
    }

    fn result_display(&self) -> String {
        self.result_element_text().unwrap_or_default().to_string()
    }

    fn input_text(&self) -> String {
        self.calculator.engine().input_text().to_string()
    }

    fn history(&self) -> Vec<HistoryRow> {
        self.calculator.view().history
    }

    fn input_valid(&self) -> bool {
        self.dom()
            .get_element(INPUT_ID)
            .and_then(|e| e.get_attr("aria-invalid"))
            == Some("false")
    }

    fn can_divide(&self) -> bool {
        self.dom()
            .get_element(button_id(Command::Divide))
            .is_some_and(|e| !e.is_disabled())
    }

    fn last_alert(&self) -> Option<CalcError> {
        self.calculator.last_alert()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{
        verify_all, verify_enter_key, verify_history_bound, verify_rejections,
        verify_resets, verify_scenarios,
    };

    #[test]
    fn test_wasm_driver_new() {
        let driver = WasmDriver::new();
        assert!(driver.input_text().is_empty());
        assert_eq!(driver.result_display(), "0");
        assert!(!driver.input_valid());
    }

    #[test]
    fn test_with_calculator() {
        let mut calc = WebCalculator::new();
        calc.handle_event(DomEvent::input(INPUT_ID, "3"));
        let driver = WasmDriver::with_calculator(calc);
        assert_eq!(driver.input_element_value(), Some("3"));
        assert!(driver.input_valid());
    }

    #[test]
    fn test_calculator_mut_access() {
        let mut driver = WasmDriver::new();
        driver.calculator_mut().invoke(Command::ResetResult).unwrap();
        assert_eq!(driver.calculator().engine().revision(), 1);
    }

    #[test]
    fn test_click_respects_disabled() {
        let mut driver = WasmDriver::new();
        driver.set_input("0");
        assert_eq!(driver.click(Command::Divide), None);
        assert!(driver.dom().alerts().is_empty());
        assert_eq!(driver.click(Command::Add), Some(Ok(())));
    }

    #[test]
    fn test_dom_and_engine_agree() {
        let mut driver = WasmDriver::new();
        driver.set_input("2,000");
        driver.run(Command::Add).unwrap();
        driver.set_input("3");
        driver.run(Command::Divide).unwrap();
        let view = driver.calculator().view();
        assert_eq!(driver.result_display(), view.result);
        assert_eq!(driver.result_display(), "666.6667");
        assert_eq!(driver.calculator().history_items().len(), view.history.len());
    }

    #[test]
    fn test_unified_scenarios() {
        verify_scenarios(&mut WasmDriver::new());
    }

    #[test]
    fn test_unified_rejections() {
        verify_rejections(&mut WasmDriver::new());
    }

    #[test]
    fn test_unified_history_bound() {
        verify_history_bound(&mut WasmDriver::new());
    }

    #[test]
    fn test_unified_resets() {
        verify_resets(&mut WasmDriver::new());
    }

    #[test]
    fn test_unified_enter_key() {
        verify_enter_key(&mut WasmDriver::new());
    }

    #[test]
    fn test_verify_all() {
        verify_all(&mut WasmDriver::new());
    }
}
