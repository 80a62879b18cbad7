//! Browser bindings via `wasm-bindgen`
//!
//! The page owns the markup and event listeners; it forwards input text and
//! button presses here and re-renders from [`BrowserCalculator::view_json`]
//! whenever [`BrowserCalculator::revision`] changes.

use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::core::{CalcError, CalculatorEngine, Command, Effect};

/// Calculator handle exported to JavaScript
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    engine: CalculatorEngine,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Create a new browser calculator
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self {
            engine: CalculatorEngine::new(),
        }
    }

    /// The raw input text
    #[wasm_bindgen(getter)]
    pub fn input(&self) -> String {
        self.engine.input_text().to_string()
    }

    /// Replaces the input text
    #[wasm_bindgen(setter)]
    pub fn set_input(&mut self, value: String) {
        self.engine.set_input(value);
    }

    /// The formatted result
    #[wasm_bindgen(getter)]
    pub fn result(&self) -> String {
        self.engine.view().result
    }

    /// Mutation counter; re-render when it changes
    #[wasm_bindgen(getter)]
    pub fn revision(&self) -> f64 {
        // JS numbers are exact up to 2^53
        self.engine.revision() as f64
    }

    /// Whether the input parses to a finite number
    #[wasm_bindgen(getter, js_name = inputValid)]
    pub fn input_valid(&self) -> bool {
        self.engine.input_valid()
    }

    /// Whether Divide is allowed
    #[wasm_bindgen(getter, js_name = canDivide)]
    pub fn can_divide(&self) -> bool {
        self.engine.can_divide()
    }

    /// Runs a command by name (`add`, `divide`, `reset-input`, ...).
    ///
    /// Returns true when focus should move back to the input. A rejection is
    /// shown with `window.alert`.
    pub fn run(&mut self, command: &str) -> bool {
        let Some(command) = Command::from_name(command) else {
            console::warn_1(&format!("unknown command: {command}").into());
            return false;
        };
        self.execute(command)
    }

    /// Handles a key press in the input; `Enter` adds
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str) -> bool {
        Command::from_key(key).is_some_and(|command| self.execute(command))
    }

    /// The full view as JSON
    #[wasm_bindgen(js_name = viewJson)]
    pub fn view_json(&self) -> String {
        self.engine
            .view()
            .to_json()
            .unwrap_or_else(|_| "{}".to_string())
    }

    fn execute(&mut self, command: Command) -> bool {
        match self.engine.execute(command) {
            Ok(effect) => effect == Effect::FocusInput,
            Err(err) => {
                alert(&err);
                false
            }
        }
    }
}

impl Default for BrowserCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Shows a blocking alert, falling back to the console without a window
fn alert(err: &CalcError) {
    let message = err.to_string();
    let shown = web_sys::window().is_some_and(|w| w.alert_with_message(&message).is_ok());
    if !shown {
        console::error_1(&message.into());
    }
}

/// Initialize the module in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"Calculator WASM initialized".into());
}
