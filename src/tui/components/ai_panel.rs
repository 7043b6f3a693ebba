//! # AI Panel Component
//!
//! Overlay showing the latest AI response verbatim. The text is never
//! interpreted, only wrapped.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::core::state::AiOutput;
use crate::tui::component::Component;
use crate::tui::components::history_list::centered_rect;

pub struct AiPanel<'a> {
    pub loading: bool,
    pub output: Option<&'a AiOutput>,
    pub scroll: u16,
}

impl AiPanel<'_> {
    fn title(&self) -> String {
        match self.output {
            Some(output) => format!(" {} ", output.call.title()),
            None => " AI ".to_string(),
        }
    }

    fn body(&self) -> (String, Style) {
        if self.loading {
            return ("Thinking...".to_string(), Style::default().fg(Color::DarkGray));
        }
        match self.output.map(|o| &o.body) {
            Some(Ok(text)) => (text.clone(), Style::default()),
            Some(Err(e)) => (format!("Request failed: {e}"), Style::default().fg(Color::Red)),
            None => (
                "a Recommendation  g Growth analysis  i Service info".to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        }
    }
}

impl Component for AiPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(80, 80, area);
        frame.render_widget(Clear, overlay);
        let (text, style) = self.body();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(self.title())
            .title_bottom(Line::from(" ↑/↓ Scroll  a/g/i Ask  Esc Back ").centered())
            .padding(Padding::horizontal(1));
        let paragraph = Paragraph::new(text)
            .style(style)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, overlay);
    }
}
