//! # TitleBar Component
//!
//! Single-line status bar: who is training, what the app is doing and the
//! running volume of the current session.
//!
//! Stateless: every field is a prop copied from `App` each frame.
//!
//! ```text
//! Liftlog (user: alice) | Resting | 1250 kg | saving...
//! ```

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub user_id: String,
    pub status_message: String,
    /// Session volume in kg; `None` when no session is loaded.
    pub total_volume: Option<f64>,
    /// A set or an edit is waiting on the server.
    pub busy: bool,
}

impl TitleBar {
    pub fn new(user_id: String, status_message: String, total_volume: Option<f64>, busy: bool) -> Self {
        Self {
            user_id,
            status_message,
            total_volume,
            busy,
        }
    }

    fn text(&self) -> String {
        let mut text = format!("Liftlog (user: {})", self.user_id);
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        if let Some(volume) = self.total_volume {
            text.push_str(&format!(" | {volume:.0} kg"));
        }
        if self.busy {
            text.push_str(" | saving...");
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
