//! Terminal front end for the calculator

mod app;
mod buttons;
mod input;
mod ui;

pub use app::{CalculatorApp, Focus};
pub use buttons::{ActionBar, ActionBarWidget, ActionButton};
pub use input::{InputHandler, KeyAction};
pub use ui::{render, CalculatorUI, ALERT_HINT, APP_TITLE, HELP_SHORTCUTS};
