//! Form pieces shared by the dialogs: a single-line text input and buttons

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Single-line text input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Apply an editing key. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.value.push(c);
                true
            }
            KeyCode::Backspace => {
                self.value.pop();
                true
            }
            _ => false,
        }
    }

    /// `label: value`, with a block cursor when focused
    pub fn render_line(&self, label: &str, focused: bool) -> Line<'static> {
        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let cursor = if focused { "_" } else { "" };

        Line::from(vec![
            Span::styled(format!("{}: ", label), label_style),
            Span::styled(
                format!("{}{}", self.value, cursor),
                Style::default()
                    .fg(Color::White)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    }
}

/// Move focus one step forward or back, wrapping around
pub fn cycle_focus(current: usize, count: usize, forward: bool) -> usize {
    if count == 0 {
        return 0;
    }
    if forward {
        (current + 1) % count
    } else {
        (current + count - 1) % count
    }
}

/// A row of buttons, `focused` highlighted
pub fn button_row(labels: &[&str], focused: Option<usize>) -> Line<'static> {
    let mut spans = Vec::with_capacity(labels.len() * 2);
    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if focused == Some(i) {
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", label), style));
    }
    Line::from(spans)
}

/// Help bar shared by the dialogs
pub fn dialog_help_line(extra: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = vec![
        Span::styled(" Tab ", Style::default().fg(Color::Cyan)),
        Span::raw("Next  "),
        Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
        Span::raw("Select  "),
    ];
    for (key, label) in extra {
        spans.push(Span::styled(format!(" {} ", key), Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(format!("{}  ", label)));
    }
    spans.push(Span::styled(" Esc ", Style::default().fg(Color::Yellow)));
    spans.push(Span::raw("Close"));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::new("ab");

        assert!(input.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(input.handle_key(KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT)));
        assert_eq!(input.value(), "abcD");

        assert!(input.handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)));
        assert_eq!(input.value(), "abc");

        assert!(!input.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)));
        assert!(!input.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)));
        assert_eq!(input.value(), "abc");
    }

    #[test]
    fn test_backspace_on_empty_input() {
        let mut input = TextInput::default();
        assert!(input.handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_cycle_focus_wraps() {
        assert_eq!(cycle_focus(0, 4, true), 1);
        assert_eq!(cycle_focus(3, 4, true), 0);
        assert_eq!(cycle_focus(0, 4, false), 3);
        assert_eq!(cycle_focus(0, 0, true), 0);
    }
}
