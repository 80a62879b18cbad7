//! Action bar for the TUI calculator
//!
//! Six buttons, one per [`Command`]. Arithmetic buttons are disabled while the
//! input is invalid (Divide also while the operand is zero); disabled buttons
//! are rendered dimmed and skipped by focus traversal.
//!
//! ```text
//! [+ Add] [- Subtract] [× Multiply] [÷ Divide] [Reset input] [Reset result]
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::core::{CalculatorView, Command};

/// A single action button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionButton {
    /// Command run on activation
    pub command: Command,
    /// Text shown on the button
    pub label: &'static str,
}

impl ActionButton {
    /// Creates the button for `command`
    #[must_use]
    pub const fn for_command(command: Command) -> Self {
        let label = match command {
            Command::Add => "+ Add",
            Command::Subtract => "- Subtract",
            Command::Multiply => "× Multiply",
            Command::Divide => "÷ Divide",
            Command::ResetInput => "Reset input",
            Command::ResetResult => "Reset result",
        };
        Self { command, label }
    }

    /// Whether the button can be activated in the given state
    #[must_use]
    pub fn is_enabled(&self, view: &CalculatorView) -> bool {
        match self.command.operation() {
            Some(op) => view.is_enabled(op),
            None => true,
        }
    }

    /// Rendered text, e.g. `[+ Add]`
    #[must_use]
    pub fn caption(&self) -> String {
        format!("[{}]", self.label)
    }
}

/// The row of action buttons
#[derive(Debug, Clone)]
pub struct ActionBar {
    buttons: Vec<ActionButton>,
}

impl Default for ActionBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionBar {
    /// Creates the standard six-button bar
    #[must_use]
    pub fn new() -> Self {
        Self {
            buttons: Command::ALL
                .into_iter()
                .map(ActionButton::for_command)
                .collect(),
        }
    }

    /// Returns all buttons in order
    #[must_use]
    pub fn buttons(&self) -> &[ActionButton] {
        &self.buttons
    }

    /// Returns the button at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ActionButton> {
        self.buttons.get(index)
    }
}

/// Widget rendering an [`ActionBar`] against a state snapshot
#[derive(Debug)]
pub struct ActionBarWidget<'a> {
    bar: &'a ActionBar,
    view: &'a CalculatorView,
    focused: Option<usize>,
}

impl<'a> ActionBarWidget<'a> {
    /// Creates the widget; `focused` is the index of the focused button
    #[must_use]
    pub fn new(bar: &'a ActionBar, view: &'a CalculatorView, focused: Option<usize>) -> Self {
        Self { bar, view, focused }
    }

    fn button_style(&self, index: usize, button: &ActionButton) -> Style {
        if !button.is_enabled(self.view) {
            Style::default().fg(Color::DarkGray)
        } else if self.focused == Some(index) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if button.command.operation().is_some() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Magenta)
        }
    }
}

impl Widget for ActionBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::with_capacity(self.bar.buttons().len() * 2);
        for (index, button) in self.bar.buttons().iter().enumerate() {
            if index > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(button.caption(), self.button_style(index, button)));
        }

        Paragraph::new(Line::from(spans))
            .block(
                Block::default()
                    .title(" Actions ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .render(area, buf);
    }
}
