//! Control panel component
//!
//! Shows the key instructions of whatever has focus and a short info block.

use crate::component::Component;
use crate::modes::HelpTopic;
use anyhow::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Instruction lines for `topics`, one header per topic
pub fn instruction_lines(topics: &[HelpTopic]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (i, topic) in topics.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            topic.header(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for (keys, description) in topic.instructions() {
            lines.push(Line::from(vec![
                Span::styled(*keys, Style::default().fg(Color::Cyan)),
                Span::raw(" "),
                Span::raw(*description),
            ]));
        }
    }

    lines
}

pub fn info_text(entries: usize) -> String {
    format!("Num entries (after filter): {}", entries)
}

/// Control panel
#[derive(Debug, Default)]
pub struct ControlPanel;

impl ControlPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn draw_panel(&self, frame: &mut Frame, area: Rect, topics: &[HelpTopic], entries: usize) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Table Wrangler ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(4)])
            .split(inner);

        let instructions = Paragraph::new(instruction_lines(topics)).wrap(Wrap { trim: false });
        frame.render_widget(instructions, chunks[0]);

        let info = Paragraph::new(vec![
            Line::from(Span::styled(
                "Info",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(info_text(entries)),
        ])
        .wrap(Wrap { trim: false });
        frame.render_widget(info, chunks[1]);
    }
}

impl Component for ControlPanel {
    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_panel which takes full context
        Ok(())
    }
}
