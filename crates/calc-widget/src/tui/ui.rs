//! TUI rendering
//!
//! Draws the calculator from a [`CalculatorView`] snapshot plus the app's
//! cursor, focus and alert state. Nothing here mutates the app.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Widget, Wrap},
    Frame,
};

use super::app::{CalculatorApp, Focus};
use super::buttons::ActionBarWidget;
use crate::core::{CalcError, CalculatorView};

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
    view: CalculatorView,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self {
            app,
            view: app.view(),
        }
    }

    /// Creates the main layout chunks
    fn create_layout(area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Input
                Constraint::Length(3), // Result
                Constraint::Length(3), // Actions
                Constraint::Min(3),    // History
                Constraint::Length(1), // Help
            ])
            .split(area)
            .to_vec()
    }

    /// Renders the input box with a text cursor when focused
    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        let input_text = self.app.input();
        let focused = self.app.focus() == Focus::Input;

        let line = if focused {
            let (before, after) = input_text.split_at(self.app.cursor().min(input_text.len()));
            let mut chars = after.chars();
            let cursor_char = chars.next().unwrap_or(' ');
            Line::from(vec![
                Span::raw(before),
                Span::styled(
                    cursor_char.to_string(),
                    Style::default().bg(Color::White).fg(Color::Black),
                ),
                Span::raw(chars.as_str()),
            ])
        } else {
            Line::from(Span::raw(input_text))
        };

        let (marker, border) = input_marker(&self.view, focused);
        let paragraph = Paragraph::new(line).block(
            Block::default()
                .title(format!(" Amount {marker} "))
                .borders(Borders::ALL)
                .border_style(border),
        );

        paragraph.render(area, buf);
    }

    /// Renders the result area
    fn render_result(&self, area: Rect, buf: &mut Buffer) {
        let paragraph = Paragraph::new(Span::styled(
            self.view.result.as_str(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
        .block(
            Block::default()
                .title(" Result ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );

        paragraph.render(area, buf);
    }

    /// Renders the action buttons
    fn render_actions(&self, area: Rect, buf: &mut Buffer) {
        let focused = match self.app.focus() {
            Focus::Button(index) => Some(index),
            Focus::Input => None,
        };
        ActionBarWidget::new(self.app.actions(), &self.view, focused).render(area, buf);
    }

    /// Renders the history area
    fn render_history(&self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = self
            .view
            .history
            .iter()
            .map(|row| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!(
                            "{} {} {}",
                            row.previous_result,
                            row.operator.symbol(),
                            row.operand
                        ),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::raw(" = "),
                    Span::styled(row.new_result.as_str(), Style::default().fg(Color::Cyan)),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title(" History (newest first) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );

        list.render(area, buf);
    }

    /// Renders the one-line key help
    fn render_help(area: Rect, buf: &mut Buffer) {
        let spans: Vec<Span> = HELP_SHORTCUTS
            .iter()
            .enumerate()
            .flat_map(|(i, (key, desc))| {
                let sep = if i == 0 { "" } else { "  " };
                [
                    Span::raw(sep),
                    Span::styled(*key, Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::DarkGray)),
                ]
            })
            .collect();

        Paragraph::new(Line::from(spans)).render(area, buf);
    }

    /// Renders the modal alert over the middle of `area`
    fn render_alert(err: &CalcError, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(area, 44, 5);
        Clear.render(popup, buf);

        Paragraph::new(vec![
            Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                ALERT_HINT,
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .render(popup, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(APP_TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let chunks = Self::create_layout(area);
        if chunks.len() >= 5 {
            self.render_input(chunks[0], buf);
            self.render_result(chunks[1], buf);
            self.render_actions(chunks[2], buf);
            self.render_history(chunks[3], buf);
            Self::render_help(chunks[4], buf);
        }

        if let Some(err) = self.app.alert() {
            Self::render_alert(err, area, buf);
        }
    }
}

/// Validity marker and border style for the input box
fn input_marker(view: &CalculatorView, focused: bool) -> (&'static str, Style) {
    let color = if focused { Color::Cyan } else { Color::DarkGray };
    if view.input_valid {
        ("✓", Style::default().fg(color))
    } else if view.input_text.is_empty() {
        ("", Style::default().fg(color))
    } else {
        ("✗", Style::default().fg(Color::Red))
    }
}

/// A `width` x `height` rectangle centered in `area`, clipped to fit
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Title drawn on the outer border
pub const APP_TITLE: &str = " Calculator ";

/// Key help shown on the bottom line
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("Enter", "Add"),
    ("Tab", "Next"),
    ("Esc", "Reset input"),
    ("Ctrl+R", "Reset result"),
    ("Ctrl+C", "Quit"),
];

/// Hint shown under an alert message
pub const ALERT_HINT: &str = "Press Enter to dismiss";
