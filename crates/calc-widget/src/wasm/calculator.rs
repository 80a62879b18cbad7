//! Web calculator widget
//!
//! Binds a [`CalculatorEngine`] to a [`MockDom`]: DOM events go in, the
//! engine runs, and the DOM is re-synced from a fresh [`CalculatorView`]
//! whenever the engine revision moves.

use super::dom::{DomElement, DomEvent, MockDom, HISTORY_ID, INPUT_ID, RESULT_ID};
use crate::core::{CalcError, CalcResult, CalculatorEngine, CalculatorView, Command, Effect};

/// Button ids and labels, in document order
pub const BUTTONS: [(Command, &str, &str); 6] = [
    (Command::Add, "btn-add", "+ Add"),
    (Command::Subtract, "btn-subtract", "- Subtract"),
    (Command::Multiply, "btn-multiply", "× Multiply"),
    (Command::Divide, "btn-divide", "÷ Divide"),
    (Command::ResetInput, "btn-reset-input", "Reset input"),
    (Command::ResetResult, "btn-reset-result", "Reset result"),
];

/// DOM id of the button running `command`
#[must_use]
pub fn button_id(command: Command) -> &'static str {
    BUTTONS
        .iter()
        .find(|(c, _, _)| *c == command)
        .map_or("", |(_, id, _)| *id)
}

/// Command bound to the button with DOM id `id`
#[must_use]
pub fn command_for_button(id: &str) -> Option<Command> {
    BUTTONS
        .iter()
        .find(|(_, button, _)| *button == id)
        .map(|(command, _, _)| *command)
}

/// Calculator widget rendered into a DOM
#[derive(Debug)]
pub struct WebCalculator {
    engine: CalculatorEngine,
    dom: MockDom,
    last_alert: Option<CalcError>,
    synced_revision: Option<u64>,
}

impl Default for WebCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl WebCalculator {
    /// Creates the widget and renders its initial state
    #[must_use]
    pub fn new() -> Self {
        let buttons: Vec<(&str, &str)> = BUTTONS
            .iter()
            .map(|(_, id, label)| (*id, *label))
            .collect();
        let mut widget = Self {
            engine: CalculatorEngine::new(),
            dom: MockDom::calculator(&buttons),
            last_alert: None,
            synced_revision: None,
        };
        widget.sync_dom();
        widget
    }

    /// Returns the engine
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    /// Returns the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Returns a snapshot of the engine state
    #[must_use]
    pub fn view(&self) -> CalculatorView {
        self.engine.view()
    }

    /// Returns the most recent rejection shown to the user
    #[must_use]
    pub fn last_alert(&self) -> Option<CalcError> {
        self.last_alert
    }

    /// Dispatches a DOM event and reacts to it.
    ///
    /// Returns `None` when the event did not reach a command handler
    /// (a click on a disabled button, an unbound key, focus changes).
    pub fn handle_event(&mut self, event: DomEvent) -> Option<CalcResult<()>> {
        self.dom.dispatch_event(event.clone());

        let outcome = match event {
            DomEvent::Input { element_id, value } if element_id == INPUT_ID => {
                self.engine.set_input(value);
                None
            }
            DomEvent::Click { element_id } => {
                let disabled = self
                    .dom
                    .get_element(&element_id)
                    .map_or(true, DomElement::is_disabled);
                match command_for_button(&element_id) {
                    Some(command) if !disabled => Some(self.invoke(command)),
                    _ => None,
                }
            }
            DomEvent::KeyPress { key } if self.dom.focused_element() == Some(INPUT_ID) => {
                Command::from_key(&key).map(|command| self.invoke(command))
            }
            _ => None,
        };

        self.sync_dom();
        outcome
    }

    /// Runs a command handler directly, as if called from script.
    ///
    /// A rejection is shown as a blocking alert and returned.
    pub fn invoke(&mut self, command: Command) -> CalcResult<()> {
        match self.engine.execute(command) {
            Ok(Effect::FocusInput) => {
                self.dom.focus(INPUT_ID);
                self.sync_dom();
                Ok(())
            }
            Ok(Effect::None) => {
                self.sync_dom();
                Ok(())
            }
            Err(err) => {
                self.last_alert = Some(err);
                self.dom.alert(&err.to_string());
                Err(err)
            }
        }
    }

    /// Brings the DOM in line with the engine if the revision moved
    pub fn sync_dom(&mut self) {
        if self.synced_revision == Some(self.engine.revision()) {
            return;
        }
        let view = self.engine.view();

        if let Some(input) = self.dom.get_element_mut(INPUT_ID) {
            input.set_attr("value", &view.input_text);
            let invalid = if view.input_valid { "false" } else { "true" };
            input.set_attr("aria-invalid", invalid);
        }
        self.dom.set_element_text(RESULT_ID, &view.result);

        for (command, id, _) in BUTTONS {
            let enabled = command
                .operation()
                .map_or(true, |op| view.is_enabled(op));
            if let Some(button) = self.dom.get_element_mut(id) {
                button.toggle_attr("disabled", !enabled);
            }
        }

        self.dom.clear_children(HISTORY_ID);
        for row in &view.history {
            let key = row.key.to_string();
            let item = DomElement::new("li")
                .with_id(&format!("history-{key}"))
                .with_attr("data-key", &key)
                .with_text(&row.display());
            self.dom.append_child(HISTORY_ID, item);
        }

        self.synced_revision = Some(view.revision);
    }

    /// Text of each history list item, top to bottom
    #[must_use]
    pub fn history_items(&self) -> Vec<String> {
        self.dom
            .children(HISTORY_ID)
            .iter()
            .map(|li| li.text_content.clone())
            .collect()
    }
}
