//! # Exercise Card Component
//!
//! What to do next: exercise name, set counter, working weight, target reps
//! and the last logged set of the same exercise for reference.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::api::WorkoutSet;
use crate::core::menu::MenuExercise;
use crate::core::workout::SessionState;
use crate::tui::component::Component;

pub struct ExerciseCard<'a> {
    pub exercise: &'a MenuExercise,
    pub position: usize,
    pub exercise_count: usize,
    pub current_set: u32,
    pub target_sets: u32,
    pub weight: f32,
    /// Sets finished across the whole menu, and the menu's total.
    pub progress: (u32, u32),
    pub last_set: Option<&'a WorkoutSet>,
}

impl<'a> ExerciseCard<'a> {
    /// `None` once the session has no current exercise.
    pub fn from_session(session: &'a SessionState, last_set: Option<&'a WorkoutSet>) -> Option<Self> {
        let exercise = session.current_exercise()?;
        Some(Self {
            exercise,
            position: session.exercise_index + 1,
            exercise_count: session.menu.exercises.len(),
            current_set: session.current_set,
            target_sets: session.target_sets(),
            weight: session.weight,
            progress: (session.sets_done(), session.menu.total_sets()),
            last_set,
        })
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(Span::styled(
                self.exercise.exercise_name.clone(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("Set     ", label),
                Span::styled(format!("{} / {}", self.current_set, self.target_sets), value),
            ]),
            Line::from(vec![
                Span::styled("Weight  ", label),
                Span::styled(format!("{:.1} kg", self.weight), value),
            ]),
            Line::from(vec![
                Span::styled("Target  ", label),
                Span::styled(format!("{} reps", self.exercise.reps), value),
            ]),
        ];
        lines.push(Line::from(vec![
            Span::styled("Done    ", label),
            Span::styled(
                format!("{} / {} sets", self.progress.0, self.progress.1),
                Style::default().fg(Color::Gray),
            ),
        ]));
        if let Some(last) = self.last_set {
            lines.push(Line::from(vec![
                Span::styled("Last    ", label),
                Span::styled(
                    format!("{:.1} kg × {} ({})", last.weight, last.reps, last.rpe.label()),
                    Style::default().fg(Color::Gray),
                ),
            ]));
        }
        if !self.exercise.notes.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                self.exercise.notes.clone(),
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            )));
        }
        lines
    }
}

impl Component for ExerciseCard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Exercise {}/{} ", self.position, self.exercise_count))
            .padding(Padding::horizontal(1));
        let paragraph = Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::workout::start_menu;
    use crate::test_support::{menu_with_sets, sample_set};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_card_shows_progress_and_last_set() {
        let session = start_menu(menu_with_sets(&[3, 2])).unwrap();
        let last = sample_set("2026-01-20T10:00:00.000Z", 17.5, 9);
        let mut card = ExerciseCard::from_session(&session, Some(&last)).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|f| card.render(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();

        assert!(text.contains("Exercise 1/2"));
        assert!(text.contains("1 / 3"));
        assert!(text.contains("20.0 kg"));
        assert!(text.contains("17.5 kg"));
        assert!(text.contains("0 / 5 sets"));
    }

    #[test]
    fn test_no_card_after_completion() {
        let mut session = start_menu(menu_with_sets(&[1])).unwrap();
        session.complete = true;
        assert!(ExerciseCard::from_session(&session, None).is_none());
    }
}
