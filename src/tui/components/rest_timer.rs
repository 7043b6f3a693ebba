//! # Rest Timer Component
//!
//! Countdown gauge shown while resting. The numbers come from the pure
//! timer in `core::timer`; this component only draws them.

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Gauge};

use crate::core::timer::RestTimer;
use crate::tui::component::Component;

pub struct RestTimerView {
    pub remaining_secs: u32,
    pub fraction_left: f64,
}

impl RestTimerView {
    pub fn new(timer: &RestTimer, now: DateTime<Utc>) -> Self {
        Self {
            remaining_secs: timer.remaining(now),
            fraction_left: timer.fraction_left(now),
        }
    }

    pub fn label(&self) -> String {
        format!("{}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }
}

impl Component for RestTimerView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let color = if self.remaining_secs <= 10 {
            Color::Red
        } else {
            Color::Green
        };
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Rest "),
            )
            .gauge_style(Style::default().fg(color))
            .ratio(self.fraction_left.clamp(0.0, 1.0))
            .label(self.label());
        frame.render_widget(gauge, area);
    }
}
