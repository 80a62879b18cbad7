//! Mock DOM for the web widget
//!
//! A small element tree with id lookup, focus tracking and bounded logs of
//! dispatched events and blocking alerts. It lets the widget logic run and be tested
//! without a browser.

use std::collections::{HashMap, VecDeque};

/// Id of the text input
pub const INPUT_ID: &str = "calc-input";
/// Id of the result display
pub const RESULT_ID: &str = "calc-result";
/// Id of the history list
pub const HISTORY_ID: &str = "calc-history";
/// Entries kept in each of the event and alert logs
pub const LOG_CAPACITY: usize = 32;

/// Represents a DOM element
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets the ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        if self.text_content != text {
            self.text_content = text.to_string();
        }
    }

    /// Sets an attribute
    pub fn set_attr(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    /// Removes an attribute
    pub fn remove_attr(&mut self, key: &str) {
        self.attributes.remove(key);
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Sets or clears a boolean attribute such as `disabled`
    pub fn toggle_attr(&mut self, key: &str, on: bool) {
        if on {
            self.set_attr(key, "");
        } else {
            self.remove_attr(key);
        }
    }

    /// True if the element carries the `disabled` attribute
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.attributes.contains_key("disabled")
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// DOM events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Input event with the element's new value
    Input {
        /// The ID of the input element
        element_id: String,
        /// The new value
        value: String,
    },
    /// Key press, delivered to the focused element
    KeyPress {
        /// Key name, as in `KeyboardEvent.key`
        key: String,
    },
    /// Element gained focus
    Focus {
        /// The ID of the focused element
        element_id: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates an input event
    #[must_use]
    pub fn input(element_id: &str, value: &str) -> Self {
        Self::Input {
            element_id: element_id.to_string(),
            value: value.to_string(),
        }
    }

    /// Creates a key press event
    #[must_use]
    pub fn key_press(key: &str) -> Self {
        Self::KeyPress {
            key: key.to_string(),
        }
    }

    /// Creates a focus event
    #[must_use]
    pub fn focus(element_id: &str) -> Self {
        Self::Focus {
            element_id: element_id.to_string(),
        }
    }
}

/// Mock DOM holding the calculator's elements
#[derive(Debug, Default)]
pub struct MockDom {
    /// Elements by ID
    elements: HashMap<String, DomElement>,
    /// Most recent dispatched events, oldest first
    event_history: VecDeque<DomEvent>,
    /// Focused element ID
    focused_element: Option<String>,
    /// Most recent messages passed to `alert()`, oldest first
    alerts: VecDeque<String>,
}

impl MockDom {
    /// Creates an empty mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the calculator's element tree.
    ///
    /// `buttons` lists `(id, label)` pairs in document order.
    #[must_use]
    pub fn calculator(buttons: &[(&str, &str)]) -> Self {
        let mut dom = Self::new();

        dom.register_element(
            DomElement::new("input")
                .with_id(INPUT_ID)
                .with_attr("type", "text")
                .with_attr("inputmode", "decimal")
                .with_attr("placeholder", "Enter a number")
                .with_attr("value", "")
                .with_attr("aria-invalid", "true"),
        );
        dom.register_element(
            DomElement::new("output")
                .with_id(RESULT_ID)
                .with_class("result-display")
                .with_text("0"),
        );
        for (id, label) in buttons {
            dom.register_element(
                DomElement::new("button")
                    .with_id(id)
                    .with_attr("type", "button")
                    .with_text(label),
            );
        }
        dom.register_element(
            DomElement::new("ul")
                .with_id(HISTORY_ID)
                .with_class("history-list"),
        );

        dom
    }

    /// Registers a top-level element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Records an event and applies its default DOM behavior
    pub fn dispatch_event(&mut self, event: DomEvent) {
        match &event {
            DomEvent::Focus { element_id } => {
                self.focused_element = Some(element_id.clone());
            }
            DomEvent::Input { element_id, value } => {
                if let Some(elem) = self.elements.get_mut(element_id) {
                    elem.set_attr("value", value);
                }
            }
            DomEvent::Click { .. } | DomEvent::KeyPress { .. } => {}
        }
        push_bounded(&mut self.event_history, event);
    }

    /// The last [`LOG_CAPACITY`] dispatched events, oldest first
    #[must_use]
    pub fn event_history(&self) -> &VecDeque<DomEvent> {
        &self.event_history
    }

    /// Gets the currently focused element ID
    #[must_use]
    pub fn focused_element(&self) -> Option<&str> {
        self.focused_element.as_deref()
    }

    /// Moves focus to an element, as `element.focus()` would
    pub fn focus(&mut self, id: &str) {
        if self.elements.contains_key(id) {
            self.focused_element = Some(id.to_string());
        }
    }

    /// Shows a blocking alert
    pub fn alert(&mut self, message: &str) {
        push_bounded(&mut self.alerts, message.to_string());
    }

    /// The last [`LOG_CAPACITY`] alerts, oldest first
    #[must_use]
    pub fn alerts(&self) -> &VecDeque<String> {
        &self.alerts
    }

    /// The most recent alert
    #[must_use]
    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.back().map(String::as_str)
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Appends a child to a registered element
    pub fn append_child(&mut self, parent_id: &str, child: DomElement) {
        if let Some(parent) = self.elements.get_mut(parent_id) {
            parent.children.push(child);
        }
    }

    /// Removes every child of an element
    pub fn clear_children(&mut self, id: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.children.clear();
        }
    }

    /// Children of a registered element
    #[must_use]
    pub fn children(&self, id: &str) -> &[DomElement] {
        self.elements
            .get(id)
            .map(|e| e.children.as_slice())
            .unwrap_or_default()
    }
}

fn push_bounded<T>(log: &mut VecDeque<T>, item: T) {
    if log.len() == LOG_CAPACITY {
        log.pop_front();
    }
    log.push_back(item);
}
