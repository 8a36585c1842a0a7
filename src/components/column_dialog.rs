//! Column dialog component
//!
//! Toggles table columns on and off. Configured columns that the table
//! does not have are listed last and can only be removed.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnState {
    Active,
    Inactive,
    Fake,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnEntry {
    pub name: String,
    pub state: ColumnState,
}

/// Column dialog
#[derive(Debug)]
pub struct ColumnDialog {
    pub columns: Vec<ColumnEntry>,
    /// Selected index (0 is the "quit" item)
    pub selected_index: usize,
    pub list_state: ListState,
}

impl Default for ColumnDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnDialog {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            columns: Vec::new(),
            selected_index: 0,
            list_state,
        }
    }

    /// Rebuild the entries from the table headers and the shown columns
    pub fn set_columns(&mut self, table_headers: &[String], shown: &[String]) {
        let mut columns: Vec<ColumnEntry> = table_headers
            .iter()
            .map(|name| ColumnEntry {
                name: name.clone(),
                state: if shown.contains(name) {
                    ColumnState::Active
                } else {
                    ColumnState::Inactive
                },
            })
            .collect();
        columns.extend(
            shown
                .iter()
                .filter(|name| !table_headers.contains(*name))
                .map(|name| ColumnEntry {
                    name: name.clone(),
                    state: ColumnState::Fake,
                }),
        );

        self.columns = columns;
        self.selected_index = self.selected_index.min(self.columns.len());
        self.list_state.select(Some(self.selected_index));
    }

    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.list_state.select(Some(0));
    }

    pub fn selected_column(&self) -> Option<&ColumnEntry> {
        self.selected_index
            .checked_sub(1)
            .and_then(|i| self.columns.get(i))
    }

    fn select_next(&mut self) {
        if self.selected_index < self.columns.len() {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }
}

impl Component for ColumnDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Enter => match self.selected_column() {
                Some(entry) => Some(Action::ToggleColumn(entry.name.clone())),
                None => Some(Action::CloseModal),
            },
            KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_width = 60u16.min(area.width.saturating_sub(4));
        let content_height = (self.columns.len() as u16 + 1) * 2 + 2;
        let popup_height = (content_height + 3)
            .min(area.height.saturating_sub(2))
            .max(10);
        let popup_area = centered_popup(area, popup_width, popup_height);
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(popup_area);

        let mut items = vec![ListItem::new(vec![
            Line::from(Span::styled("quit", Style::default().fg(Color::DarkGray))),
            Line::from(""),
        ])];
        for entry in &self.columns {
            let note = match entry.state {
                ColumnState::Active => Span::styled("active", Style::default().fg(Color::Green)),
                ColumnState::Inactive => {
                    Span::styled("inactive", Style::default().fg(Color::Red))
                }
                ColumnState::Fake => {
                    Span::styled("Fake column", Style::default().fg(Color::LightRed))
                }
            };
            items.push(ListItem::new(vec![
                Line::from(Span::styled(
                    entry.name.clone(),
                    Style::default().fg(Color::White),
                )),
                Line::from(vec![Span::raw("  "), note]),
            ]));
        }

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Column Menu ")
                    .title_style(
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[0], &mut self.list_state);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Toggle  "),
            Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
            Span::raw("Navigate  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Close"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[1]);

        Ok(())
    }
}
