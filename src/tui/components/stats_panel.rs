//! # Stats Panel Component
//!
//! Volume bars and estimated 1RM trend for the last training days.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{BarChart, Block, Borders, Paragraph};

use crate::api::WorkoutSet;
use crate::core::stats::{DayPoint, TREND_DAYS, brzycki_1rm, daily_volume, one_rm_trend};
use crate::tui::component::Component;

pub struct StatsPanel {
    pub volume: Vec<DayPoint>,
    pub one_rm: Vec<DayPoint>,
    /// Brzycki estimate of the heaviest recent set, with its exercise.
    pub best_recent: Option<(String, f64)>,
}

impl StatsPanel {
    pub fn from_history(history: &[WorkoutSet]) -> Self {
        let best_recent = history
            .iter()
            .rev()
            .take(20)
            .map(|s| (s.exercise_id.clone(), brzycki_1rm(f64::from(s.weight), s.reps)))
            .max_by(|a, b| a.1.total_cmp(&b.1));
        Self {
            volume: daily_volume(history, TREND_DAYS),
            one_rm: one_rm_trend(history, TREND_DAYS),
            best_recent,
        }
    }
}

fn day_label(point: &DayPoint) -> String {
    point.date.format("%m-%d").to_string()
}

impl Component for StatsPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [chart_area, trend_area] =
            Layout::vertical([Constraint::Min(6), Constraint::Length(4)]).areas(area);

        let labels: Vec<String> = self.volume.iter().map(day_label).collect();
        let data: Vec<(&str, u64)> = labels
            .iter()
            .zip(&self.volume)
            .map(|(label, p)| (label.as_str(), p.value.round() as u64))
            .collect();
        let chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Volume (kg) "),
            )
            .bar_width(5)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
            .data(data.as_slice());
        frame.render_widget(chart, chart_area);

        let trend = if self.one_rm.is_empty() {
            "no sets yet".to_string()
        } else {
            self.one_rm
                .iter()
                .map(|p| format!("{:.1}", p.value))
                .collect::<Vec<_>>()
                .join(" → ")
        };
        let mut lines = vec![Line::from(vec![
            Span::styled("Best 1RM/day  ", Style::default().fg(Color::DarkGray)),
            Span::raw(trend),
        ])];
        if let Some((exercise, estimate)) = &self.best_recent {
            lines.push(Line::from(vec![
                Span::styled("Top recent    ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{exercise} ~{estimate:.1} kg")),
            ]));
        }
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::TOP)),
            trend_area,
        );
    }
}
