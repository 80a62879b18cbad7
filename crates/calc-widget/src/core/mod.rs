//! Calculator core: parsing, arithmetic, history and formatting
//!
//! Everything in here is pure or owns plain in-memory state. Presentation
//! layers (`tui`, `wasm`, `script`) only call into [`CalculatorEngine`] and
//! render [`CalculatorView`].

pub mod engine;
pub mod format;
pub mod history;
mod operations;
pub mod parser;
pub mod view;

pub use engine::{CalculatorEngine, Command, Effect};
pub use format::format_number;
pub use history::{History, HistoryEntry};
pub use operations::Operation;
pub use parser::parse_operand;
pub use view::{CalculatorView, HistoryRow};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Rejections raised by the arithmetic commands.
///
/// The `Display` text of each variant is the exact message shown to the user
/// in the blocking notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Input does not parse to a finite number (empty input included)
    #[error("Please enter a valid number")]
    InvalidInput,
    /// Divide was invoked with an operand of exactly zero
    #[error("Division by zero is not allowed")]
    DivisionByZero,
}

impl CalcError {
    /// Short machine-readable code, used by the JSON outputs
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::DivisionByZero => "division_by_zero",
        }
    }
}
