//! Web front end for the calculator
//!
//! The DOM widget and its driver are plain Rust and always built; the
//! `wasm-bindgen` export needs feature `wasm`.

#[cfg(feature = "wasm")]
mod browser;
mod calculator;
mod dom;
mod driver;

#[cfg(feature = "wasm")]
pub use browser::BrowserCalculator;
pub use calculator::{button_id, command_for_button, WebCalculator, BUTTONS};
pub use dom::{DomElement, DomEvent, MockDom, HISTORY_ID, INPUT_ID, LOG_CAPACITY, RESULT_ID};
pub use driver::WasmDriver;
