//! Calc Widget - single-page arithmetic calculator
//!
//! One running result, one text input, four arithmetic commands, two resets
//! and a six-entry history. The state lives in
//! [`core::CalculatorEngine`]; three front ends drive it:
//!
//! - [`tui`]: a ratatui terminal app (feature `tui`, on by default)
//! - [`wasm`]: a DOM widget, plus `wasm-bindgen` exports with feature `wasm`
//! - [`script`]: a line-oriented batch driver
//!
//! # Example
//!
//! ```rust
//! use calc_widget::prelude::*;
//!
//! let mut engine = CalculatorEngine::new();
//! engine.set_input("1,234.5");
//! engine.add().unwrap();
//!
//! engine.set_input("0");
//! assert_eq!(engine.divide(), Err(CalcError::DivisionByZero));
//!
//! let view = engine.view();
//! assert_eq!(view.result, "1234.5");
//! assert_eq!(view.history[0].display(), "0 + 1234.5 = 1234.5");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod cli;
pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod script;

#[cfg(feature = "tui")]
pub mod tui;

/// Web front end; the mock DOM keeps it testable off the browser
pub mod wasm;

pub use config::{AppConfig, ColorChoice, LogLevel};
pub use error::{CliError, CliResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::{
        format_number, parse_operand, CalcError, CalcResult, CalculatorEngine, CalculatorView,
        Command, Effect, History, HistoryEntry, HistoryRow, Operation,
    };
    pub use crate::driver::CalculatorDriver;

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;

    pub use crate::script::{BatchRunner, Directive};
    pub use crate::wasm::{DomElement, DomEvent, MockDom, WasmDriver, WebCalculator};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_engine() {
        let mut engine = CalculatorEngine::new();
        engine.set_input("6");
        engine.add().unwrap();
        engine.set_input("7");
        assert_eq!(engine.multiply().unwrap(), 42.0);
    }

    #[test]
    fn test_prelude_helpers() {
        assert_eq!(parse_operand("1,000").unwrap(), 1000.0);
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(Command::Divide.operation(), Some(Operation::Divide));
    }

    #[test]
    fn test_front_ends_share_one_engine_contract() {
        let mut web = WasmDriver::new();
        web.set_input("9");
        web.run(Command::Subtract).unwrap();

        let mut engine = CalculatorEngine::new();
        engine.set_input("9");
        engine.subtract().unwrap();

        assert_eq!(web.result_display(), engine.view().result);
        assert_eq!(web.history()[0].display(), engine.view().history[0].display());
        assert_eq!(web.history()[0].display(), "0 - 9 = -9");
    }
}
