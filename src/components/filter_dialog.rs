//! Filter dialog component
//!
//! Edits the include and exclude patterns of one column.

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
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const INCLUDE: usize = 0;
const EXCLUDE: usize = 1;
const DONE: usize = 2;
const CANCEL: usize = 3;
const FIELD_COUNT: usize = 4;

const BUTTONS: [&str; 2] = ["Done", "Cancel"];

/// Filter dialog
#[derive(Debug, Default)]
pub struct FilterDialog {
    /// Column being filtered
    pub column: String,
    pub include: TextInput,
    pub exclude: TextInput,
    /// Focused field or button
    pub focus: usize,
    /// Why the last attempt was rejected
    pub error: Option<String>,
}

impl FilterDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the dialog for `column` with its current patterns
    pub fn open(&mut self, column: &str, include: &str, exclude: &str) {
        self.column = column.to_string();
        self.include = TextInput::new(include);
        self.exclude = TextInput::new(exclude);
        self.focus = INCLUDE;
        self.error = None;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    fn apply_action(&self) -> Action {
        Action::ApplyFilter {
            column: self.column.clone(),
            include: self.include.value().to_string(),
            exclude: self.exclude.value().to_string(),
        }
    }
}

impl Component for FilterDialog {
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
                DONE => Some(self.apply_action()),
                CANCEL => Some(Action::CloseModal),
                _ => {
                    self.focus = cycle_focus(self.focus, FIELD_COUNT, true);
                    None
                }
            },
            _ => {
                let input = match self.focus {
                    INCLUDE => Some(&mut self.include),
                    EXCLUDE => Some(&mut self.exclude),
                    _ => None,
                };
                if input.is_some_and(|input| input.handle_key(key)) {
                    self.error = None;
                }
                None
            }
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_width = 64u16.min(area.width.saturating_sub(4));
        let popup_height = 14u16.min(area.height);
        let popup_area = centered_popup(area, popup_width, popup_height);
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(popup_area);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Column: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    self.column.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            self.include.render_line("Include Regex", self.focus == INCLUDE),
            Line::from(""),
            self.exclude.render_line("Exclude Regex", self.focus == EXCLUDE),
            Line::from(""),
            button_row(&BUTTONS, self.focus.checked_sub(DONE)),
        ];

        if let Some(ref error) = self.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Error: {}", error),
                Style::default().fg(Color::Red),
            )));
        }

        let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Filter Menu ")
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
