//! Save dialog component
//!
//! Saves the active transformation as a preset or a file, or prints it.

use crate::action::Action;
use crate::component::Component;
use crate::components::input::{button_row, cycle_focus, dialog_help_line, TextInput};
use crate::components::layout::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const NAME: usize = 0;
const SAVE_PRESET: usize = 1;
const SAVE_FILE: usize = 2;
const PRINT: usize = 3;
const CANCEL: usize = 4;
const FIELD_COUNT: usize = 5;

const BUTTONS: [&str; 4] = ["Save as preset", "Save as file", "Print to stdout", "Cancel"];

/// Save dialog
#[derive(Debug, Default)]
pub struct SaveDialog {
    /// Preset name or file path
    pub name: TextInput,
    pub focus: usize,
    pub error: Option<String>,
}

impl SaveDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the dialog, prefilling the active preset name
    pub fn open(&mut self, active_preset: Option<&str>) {
        self.name = TextInput::new(active_preset.unwrap_or_default());
        self.focus = NAME;
        self.error = None;
    }

    fn named(&mut self, make: fn(String) -> Action) -> Option<Action> {
        let name = self.name.value();
        if name.is_empty() {
            self.error = Some("Name is required".to_string());
            return None;
        }
        Some(make(name.to_string()))
    }
}

impl Component for SaveDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = cycle_focus(self.focus, FIELD_COUNT, true);
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = cycle_focus(self.focus, FIELD_COUNT, false);
                None
            }
            KeyCode::Enter => match self.focus {
                SAVE_PRESET => self.named(Action::SavePreset),
                SAVE_FILE => self.named(Action::SaveFile),
                PRINT => Some(Action::PrintTransformation),
                CANCEL => Some(Action::CloseModal),
                _ => {
                    self.focus = cycle_focus(self.focus, FIELD_COUNT, true);
                    None
                }
            },
            _ => {
                if self.focus == NAME && self.name.handle_key(key) {
                    self.error = None;
                }
                None
            }
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_width = 72u16.min(area.width.saturating_sub(4));
        let popup_height = 12u16.min(area.height);
        let popup_area = centered_popup(area, popup_width, popup_height);
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(popup_area);

        let mut lines = vec![
            Line::from(""),
            self.name.render_line("Name", self.focus == NAME),
            Line::from(""),
            button_row(&BUTTONS, self.focus.checked_sub(SAVE_PRESET)),
        ];

        if let Some(ref error) = self.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        let body = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Save Transformation ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(body, chunks[0]);

        let help = Paragraph::new(dialog_help_line(&[]))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[1]);

        Ok(())
    }
}
