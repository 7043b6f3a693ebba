//! # Summary Component
//!
//! Banner shown above the menu picker once a session is complete.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::workout::SessionState;
use crate::tui::component::Component;

pub struct SessionSummary {
    pub title: String,
    pub total_volume: f64,
    pub exercises: usize,
}

impl SessionSummary {
    pub fn from_session(session: &SessionState) -> Self {
        Self {
            title: session.menu.title(),
            total_volume: session.total_volume,
            exercises: session.menu.exercises.len(),
        }
    }
}

impl Component for SessionSummary {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "Workout complete!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "{}: {} exercises, {:.0} kg total volume",
                self.title, self.exercises, self.total_volume
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
