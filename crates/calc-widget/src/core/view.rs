//! Render-ready snapshot of the engine state

use serde::Serialize;

use crate::core::engine::CalculatorEngine;
use crate::core::format::format_number;
use crate::core::history::HistoryEntry;
use crate::core::Operation;

/// A history entry with every number already formatted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    /// Stable list-item key (the entry timestamp)
    pub key: u64,
    /// Operator applied
    pub operator: Operation,
    /// Formatted operand
    pub operand: String,
    /// Formatted result before the operation
    pub previous_result: String,
    /// Formatted result after the operation
    pub new_result: String,
}

impl HistoryRow {
    /// Formats a history entry
    #[must_use]
    pub fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            key: entry.timestamp,
            operator: entry.operator,
            operand: format_number(entry.operand),
            previous_result: format_number(entry.previous_result),
            new_result: format_number(entry.new_result),
        }
    }

    /// Returns `previous op operand = new`
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{} {} {} = {}",
            self.previous_result,
            self.operator,
            self.operand,
            self.new_result
        )
    }
}

/// Everything a presentation layer needs to draw the widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculatorView {
    /// Formatted current result
    pub result: String,
    /// Raw input text
    pub input_text: String,
    /// Whether the input parses to a finite number
    pub input_valid: bool,
    /// Whether Divide is currently allowed
    pub can_divide: bool,
    /// Engine mutation counter at snapshot time
    pub revision: u64,
    /// History rows, newest first
    pub history: Vec<HistoryRow>,
}

impl CalculatorView {
    /// Takes a snapshot of `engine`
    #[must_use]
    pub fn from_engine(engine: &CalculatorEngine) -> Self {
        Self {
            result: format_number(engine.result()),
            input_text: engine.input_text().to_string(),
            input_valid: engine.input_valid(),
            can_divide: engine.can_divide(),
            revision: engine.revision(),
            history: engine.history().iter().map(HistoryRow::from_entry).collect(),
        }
    }

    /// Whether the control for `op` should be enabled
    #[must_use]
    pub fn is_enabled(&self, op: Operation) -> bool {
        match op {
            Operation::Divide => self.can_divide,
            _ => self.input_valid,
        }
    }

    /// Serializes the view to a single JSON line
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
