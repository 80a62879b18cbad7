//! TUI Application State
//!
//! Wraps a [`CalculatorEngine`] with what only the terminal front end needs:
//! a text cursor, keyboard focus, a modal alert and a redraw flag.

use tracing::trace;

use super::buttons::ActionBar;
use super::input::{InputHandler, KeyAction};
use crate::core::{CalcError, CalcResult, CalculatorEngine, CalculatorView, Command, Effect};

/// Which control currently owns the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The text input box
    #[default]
    Input,
    /// The action button at the given index
    Button(usize),
}

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    /// The calculator engine
    engine: CalculatorEngine,
    /// Cursor position in the input, as a byte offset on a char boundary
    cursor: usize,
    /// Focused control
    focus: Focus,
    /// Action buttons
    actions: ActionBar,
    /// Blocking alert waiting for acknowledgement
    alert: Option<CalcError>,
    /// Most recent alert, kept after acknowledgement
    last_alert: Option<CalcError>,
    /// Engine revision at the last draw
    drawn_revision: Option<u64>,
    /// Set when UI-only state (cursor, focus, alert) changed
    ui_dirty: bool,
    /// Whether the app should quit
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a new calculator app
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(CalculatorEngine::new())
    }

    /// Creates an app around an existing engine
    #[must_use]
    pub fn with_engine(engine: CalculatorEngine) -> Self {
        let cursor = engine.input_text().len();
        Self {
            engine,
            cursor,
            focus: Focus::Input,
            actions: ActionBar::new(),
            alert: None,
            last_alert: None,
            drawn_revision: None,
            ui_dirty: true,
            should_quit: false,
        }
    }

    /// Returns the engine
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    /// Returns a snapshot of the engine state
    #[must_use]
    pub fn view(&self) -> CalculatorView {
        self.engine.view()
    }

    /// Returns the current input string
    #[must_use]
    pub fn input(&self) -> &str {
        self.engine.input_text()
    }

    /// Returns the cursor position
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the focused control
    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Returns the action buttons
    #[must_use]
    pub fn actions(&self) -> &ActionBar {
        &self.actions
    }

    /// Returns the open alert, if any
    #[must_use]
    pub fn alert(&self) -> Option<&CalcError> {
        self.alert.as_ref()
    }

    /// Returns the most recent alert, open or acknowledged
    #[must_use]
    pub fn last_alert(&self) -> Option<&CalcError> {
        self.last_alert.as_ref()
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// True if something changed since the last [`Self::mark_drawn`]
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.ui_dirty || self.drawn_revision != Some(self.engine.revision())
    }

    /// Forces the next [`Self::needs_redraw`] to return true (e.g. on resize)
    pub fn invalidate(&mut self) {
        self.ui_dirty = true;
    }

    /// Records that the current state has been drawn
    pub fn mark_drawn(&mut self) {
        self.drawn_revision = Some(self.engine.revision());
        self.ui_dirty = false;
    }

    // ===== Input editing =====

    /// Sets the input string directly, cursor at the end
    pub fn set_input(&mut self, input: &str) {
        self.engine.set_input(input);
        self.cursor = input.len();
        self.ui_dirty = true;
    }

    /// Sets the cursor position, clamped and snapped to a char boundary
    pub fn set_cursor(&mut self, pos: usize) {
        let input = self.engine.input_text();
        let mut pos = pos.min(input.len());
        while !input.is_char_boundary(pos) {
            pos -= 1;
        }
        self.cursor = pos;
        self.ui_dirty = true;
    }

    /// Inserts a character at the cursor position
    pub fn insert_char(&mut self, c: char) {
        let mut text = self.engine.input_text().to_string();
        text.insert(self.cursor, c);
        self.engine.set_input(text);
        self.cursor += c.len_utf8();
    }

    /// Deletes the character before the cursor (backspace)
    pub fn delete_char(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            let mut text = self.engine.input_text().to_string();
            text.replace_range(prev..self.cursor, "");
            self.engine.set_input(text);
            self.cursor = prev;
        }
    }

    /// Deletes the character at the cursor (delete key)
    pub fn delete_char_forward(&mut self) {
        if let Some(next) = self.next_boundary() {
            let mut text = self.engine.input_text().to_string();
            text.replace_range(self.cursor..next, "");
            self.engine.set_input(text);
        }
    }

    /// Moves the cursor left
    pub fn move_cursor_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
            self.ui_dirty = true;
        }
    }

    /// Moves the cursor right
    pub fn move_cursor_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
            self.ui_dirty = true;
        }
    }

    /// Moves cursor to the beginning of input
    pub fn move_cursor_start(&mut self) {
        self.cursor = 0;
        self.ui_dirty = true;
    }

    /// Moves cursor to the end of input
    pub fn move_cursor_end(&mut self) {
        self.cursor = self.engine.input_text().len();
        self.ui_dirty = true;
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.engine.input_text()[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.engine.input_text()[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    // ===== Commands =====

    /// Runs a command, opening the alert if it is rejected
    pub fn run_command(&mut self, command: Command) -> CalcResult<()> {
        match self.engine.execute(command) {
            Ok(effect) => {
                self.apply_effect(effect);
                self.settle_focus();
                Ok(())
            }
            Err(err) => {
                self.raise_alert(err);
                Err(err)
            }
        }
    }

    /// Runs the command of the focused button, if it is enabled
    pub fn activate_focused(&mut self) -> Option<CalcResult<()>> {
        let Focus::Button(index) = self.focus else {
            return None;
        };
        let button = *self.actions.get(index)?;
        if !button.is_enabled(&self.engine.view()) {
            return None;
        }
        Some(self.run_command(button.command))
    }

    /// Acknowledges the open alert
    pub fn dismiss_alert(&mut self) {
        if self.alert.take().is_some() {
            self.ui_dirty = true;
        }
    }

    fn raise_alert(&mut self, err: CalcError) {
        trace!(alert = %err, "alert raised");
        self.alert = Some(err);
        self.last_alert = Some(err);
        self.ui_dirty = true;
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::FocusInput => {
                self.focus = Focus::Input;
                self.cursor = 0;
                self.ui_dirty = true;
            }
            Effect::None => {}
        }
    }

    /// Moves focus off a button that just became disabled
    fn settle_focus(&mut self) {
        if let Focus::Button(index) = self.focus {
            let view = self.engine.view();
            let enabled = self
                .actions
                .get(index)
                .is_some_and(|b| b.is_enabled(&view));
            if !enabled {
                self.focus = Focus::Input;
                self.ui_dirty = true;
            }
        }
    }

    // ===== Focus traversal =====

    /// Focus order: input, then every enabled button
    fn focus_ring(&self) -> Vec<Focus> {
        let view = self.engine.view();
        std::iter::once(Focus::Input)
            .chain(
                self.actions
                    .buttons()
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| b.is_enabled(&view))
                    .map(|(i, _)| Focus::Button(i)),
            )
            .collect()
    }

    /// Moves focus to the next enabled control
    pub fn focus_next(&mut self) {
        let ring = self.focus_ring();
        let pos = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = ring[(pos + 1) % ring.len()];
        self.ui_dirty = true;
    }

    /// Moves focus to the previous enabled control
    pub fn focus_prev(&mut self) {
        let ring = self.focus_ring();
        let pos = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = ring[(pos + ring.len() - 1) % ring.len()];
        self.ui_dirty = true;
    }

    /// Focuses the input box
    pub fn focus_input(&mut self) {
        self.focus = Focus::Input;
        self.ui_dirty = true;
    }

    // ===== Key dispatch =====

    /// Handles one key action. Returns true when the app should quit.
    pub fn handle_action(&mut self, action: KeyAction) -> bool {
        if action == KeyAction::Quit {
            self.quit();
            return true;
        }

        // The alert is modal: only acknowledgement keys get through
        if self.alert.is_some() {
            if matches!(
                action,
                KeyAction::Submit | KeyAction::ResetInput | KeyAction::InsertChar(' ')
            ) {
                self.dismiss_alert();
            }
            return false;
        }

        match (action, self.focus) {
            (KeyAction::Submit, Focus::Input) => {
                let _ = self.run_command(Command::Add);
            }
            (KeyAction::Submit | KeyAction::InsertChar(' '), Focus::Button(_)) => {
                let _ = self.activate_focused();
            }
            (KeyAction::InsertChar(c), Focus::Input) if InputHandler::is_insertable(c) => {
                self.insert_char(c);
            }
            (KeyAction::Backspace, Focus::Input) => self.delete_char(),
            (KeyAction::Delete, Focus::Input) => self.delete_char_forward(),
            (KeyAction::CursorLeft, Focus::Input) => self.move_cursor_left(),
            (KeyAction::CursorRight, Focus::Input) => self.move_cursor_right(),
            (KeyAction::CursorHome, Focus::Input) => self.move_cursor_start(),
            (KeyAction::CursorEnd, Focus::Input) => self.move_cursor_end(),
            (KeyAction::FocusNext, _) => self.focus_next(),
            (KeyAction::FocusPrev, _) => self.focus_prev(),
            (KeyAction::ResetInput, _) => {
                let _ = self.run_command(Command::ResetInput);
            }
            (KeyAction::ResetResult, _) => {
                let _ = self.run_command(Command::ResetResult);
            }
            _ => {}
        }
        false
    }
}
