//! # Log Panel Component
//!
//! Controls for the set in progress: reps stepper, weight stepper, RPE
//! buttons. While resting the same panel only offers skipping the rest.
//!
//! ```text
//! ←/→ reps   +/- weight (2 kg)   1 Easy  2 Just  3 Limit   n Skip  f Finish
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::api::RpeLevel;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Weight stepper increment on the live card, in kg.
pub const WEIGHT_STEP: f32 = 2.0;

pub struct LogPanelState {
    pub reps: u32,
    pub rpe: RpeLevel,
    /// Mirrors the session flag so key handling knows which controls are live.
    pub resting: bool,
    exercise_index: Option<usize>,
}

impl Default for LogPanelState {
    fn default() -> Self {
        Self {
            reps: 10,
            rpe: RpeLevel::Just,
            resting: false,
            exercise_index: None,
        }
    }
}

impl LogPanelState {
    /// Resets the reps stepper to the target whenever the exercise changes.
    pub fn sync(&mut self, exercise_index: usize, target_reps: u32, resting: bool) {
        self.resting = resting;
        if self.exercise_index != Some(exercise_index) {
            self.exercise_index = Some(exercise_index);
            self.reps = target_reps.max(1);
            self.rpe = RpeLevel::Just;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, PartialEq)]
pub enum LogPanelEvent {
    Log { reps: u32, rpe: RpeLevel },
    AdjustWeight(f32),
    FinishRest,
    SkipExercise,
    FinishSession,
}

impl EventHandler for LogPanelState {
    type Event = LogPanelEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<LogPanelEvent> {
        match event {
            TuiEvent::InputChar('n') => return Some(LogPanelEvent::SkipExercise),
            TuiEvent::InputChar('f') => return Some(LogPanelEvent::FinishSession),
            _ => {}
        }

        if self.resting {
            return match event {
                TuiEvent::Submit | TuiEvent::InputChar('s') | TuiEvent::InputChar(' ') => {
                    Some(LogPanelEvent::FinishRest)
                }
                _ => None,
            };
        }

        match event {
            TuiEvent::CursorLeft => {
                self.reps = self.reps.saturating_sub(1).max(1);
                None
            }
            TuiEvent::CursorRight => {
                self.reps += 1;
                None
            }
            TuiEvent::InputChar('+') | TuiEvent::InputChar('=') | TuiEvent::CursorUp => {
                Some(LogPanelEvent::AdjustWeight(WEIGHT_STEP))
            }
            TuiEvent::InputChar('-') | TuiEvent::CursorDown => {
                Some(LogPanelEvent::AdjustWeight(-WEIGHT_STEP))
            }
            TuiEvent::Tab => {
                let i = RpeLevel::ALL.iter().position(|r| *r == self.rpe).unwrap_or(0);
                self.rpe = RpeLevel::ALL[(i + 1) % RpeLevel::ALL.len()];
                None
            }
            TuiEvent::InputChar(c @ '1'..='3') => {
                let index = (*c as usize) - ('1' as usize);
                self.rpe = RpeLevel::ALL[index];
                Some(LogPanelEvent::Log {
                    reps: self.reps,
                    rpe: self.rpe,
                })
            }
            TuiEvent::Submit => Some(LogPanelEvent::Log {
                reps: self.reps,
                rpe: self.rpe,
            }),
            _ => None,
        }
    }
}

/// Transient render wrapper.
pub struct LogPanel<'a> {
    state: &'a LogPanelState,
    submitting: bool,
}

impl<'a> LogPanel<'a> {
    pub fn new(state: &'a LogPanelState, submitting: bool) -> Self {
        Self { state, submitting }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let help = if self.state.resting {
            " s Skip rest  n Next exercise  f Finish "
        } else {
            " ←/→ Reps  +/- Weight  Tab RPE  Enter Log  n Next  f Finish "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Log ")
            .title_bottom(Line::from(help).centered())
            .padding(Padding::horizontal(1));

        let dim = self.state.resting || self.submitting;
        let base = if dim {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };

        let mut rpe_spans = vec![Span::styled("RPE  ", base)];
        for (i, level) in RpeLevel::ALL.iter().enumerate() {
            let style = if *level == self.state.rpe {
                base.add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                base
            };
            rpe_spans.push(Span::styled(format!(" {} {} ", i + 1, level.label()), style));
            rpe_spans.push(Span::raw(" "));
        }

        let lines = vec![
            Line::from(vec![
                Span::styled("Reps ", base),
                Span::styled(format!("‹ {} ›", self.state.reps), base.add_modifier(Modifier::BOLD)),
            ]),
            Line::from(rpe_spans),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
