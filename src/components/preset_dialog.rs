//! Preset dialog component
//!
//! Lists the saved presets. Enter makes a preset active, `x` deletes it.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::centered_popup;
use crate::model::LAST_PRESET_NAME;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Preset dialog
#[derive(Debug)]
pub struct PresetDialog {
    /// Preset names, sorted
    pub presets: Vec<String>,
    /// Name of the active preset
    pub active: Option<String>,
    /// Selected index (0 is the "quit" item)
    pub selected_index: usize,
    pub list_state: ListState,
}

impl Default for PresetDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetDialog {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            presets: Vec::new(),
            active: None,
            selected_index: 0,
            list_state,
        }
    }

    /// Set the listed presets, keeping the selection in range
    pub fn set_presets(&mut self, presets: Vec<String>, active: Option<&str>) {
        self.presets = presets;
        self.active = active.map(str::to_string);
        self.selected_index = self.selected_index.min(self.presets.len());
        self.list_state.select(Some(self.selected_index));
    }

    /// Select the active preset, or the "quit" item
    pub fn select_active(&mut self) {
        self.selected_index = self
            .active
            .as_ref()
            .and_then(|active| self.presets.iter().position(|p| p == active))
            .map_or(0, |i| i + 1);
        self.list_state.select(Some(self.selected_index));
    }

    pub fn selected_preset(&self) -> Option<&str> {
        self.selected_index
            .checked_sub(1)
            .and_then(|i| self.presets.get(i))
            .map(String::as_str)
    }

    fn select_next(&mut self) {
        if self.selected_index < self.presets.len() {
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

    fn preset_item(&self, name: &str) -> ListItem<'static> {
        let note = if name == LAST_PRESET_NAME {
            Span::styled("Special Preset", Style::default().fg(Color::LightRed))
        } else if self.active.as_deref() == Some(name) {
            Span::styled(
                "Active. Press x to remove",
                Style::default().fg(Color::Green),
            )
        } else {
            Span::styled("Press x to remove", Style::default().fg(Color::Red))
        };

        ListItem::new(vec![
            Line::from(Span::styled(
                name.to_string(),
                Style::default().fg(Color::White),
            )),
            Line::from(vec![Span::raw("  "), note]),
        ])
    }
}

impl Component for PresetDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Enter => match self.selected_preset() {
                Some(name) => Some(Action::UsePreset(name.to_string())),
                None => Some(Action::CloseModal),
            },
            KeyCode::Char('x') => match self.selected_preset() {
                None => Some(Action::CloseModal),
                Some(LAST_PRESET_NAME) => None,
                Some(name) => Some(Action::DeletePreset(name.to_string())),
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
        let content_height = (self.presets.len() as u16 + 1) * 2 + 2;
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
        items.extend(self.presets.iter().map(|name| self.preset_item(name)));

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Preset Menu ")
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
            Span::raw("Use  "),
            Span::styled(" x ", Style::default().fg(Color::Cyan)),
            Span::raw("Remove  "),
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
