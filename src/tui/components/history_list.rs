//! # History Component
//!
//! Full-screen overlay listing logged sets newest first, with an edit modal
//! for retroactive corrections. Opened with `h`, dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `HistoryListState` lives in `TuiState`
//! - `HistoryList` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::api::{RpeLevel, WorkoutSet};
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Weight stepper increment in the edit modal, in kg.
pub const EDIT_WEIGHT_STEP: f32 = 2.5;

/// A set being edited. Keeps the original timestamp as the record key.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub original: WorkoutSet,
    pub weight: f32,
    pub reps: u32,
    pub rpe: RpeLevel,
}

impl EditDraft {
    fn new(original: WorkoutSet) -> Self {
        Self {
            weight: original.weight,
            reps: original.reps,
            rpe: original.rpe,
            original,
        }
    }

    pub fn to_set(&self) -> WorkoutSet {
        WorkoutSet {
            weight: self.weight,
            reps: self.reps,
            rpe: self.rpe,
            ..self.original.clone()
        }
    }
}

pub struct HistoryListState {
    /// Newest first.
    pub rows: Vec<WorkoutSet>,
    pub selected: usize,
    pub confirm_delete: bool,
    pub draft: Option<EditDraft>,
    pub list_state: ListState,
}

impl HistoryListState {
    pub fn new(history: &[WorkoutSet]) -> Self {
        let mut state = Self {
            rows: Vec::new(),
            selected: 0,
            confirm_delete: false,
            draft: None,
            list_state: ListState::default(),
        };
        state.sync(history);
        state
    }

    /// Refresh the rows from `App::history`, keeping the selection in range.
    pub fn sync(&mut self, history: &[WorkoutSet]) {
        if self.rows.len() == history.len() && self.rows.iter().rev().eq(history.iter()) {
            return;
        }
        self.rows = history.iter().rev().cloned().collect();
        if self.rows.is_empty() {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(self.rows.len() - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    fn handle_draft_event(&mut self, event: &TuiEvent) -> Option<HistoryEvent> {
        let draft = self.draft.as_mut()?;
        match event {
            TuiEvent::Escape => self.draft = None,
            TuiEvent::CursorLeft | TuiEvent::InputChar('-') => {
                draft.weight = (draft.weight - EDIT_WEIGHT_STEP).max(0.0);
            }
            TuiEvent::CursorRight | TuiEvent::InputChar('+') => draft.weight += EDIT_WEIGHT_STEP,
            TuiEvent::CursorUp => draft.reps += 1,
            TuiEvent::CursorDown => draft.reps = draft.reps.saturating_sub(1).max(1),
            TuiEvent::Tab => {
                let i = RpeLevel::ALL.iter().position(|r| *r == draft.rpe).unwrap_or(0);
                draft.rpe = RpeLevel::ALL[(i + 1) % RpeLevel::ALL.len()];
            }
            TuiEvent::Submit => {
                let set = draft.to_set();
                self.draft = None;
                return Some(HistoryEvent::Update(set));
            }
            _ => {}
        }
        None
    }
}

#[derive(Debug, PartialEq)]
pub enum HistoryEvent {
    Update(WorkoutSet),
    Delete(WorkoutSet),
    Refresh,
    Dismiss,
}

impl EventHandler for HistoryListState {
    type Event = HistoryEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<HistoryEvent> {
        if self.draft.is_some() {
            return self.handle_draft_event(event);
        }

        let is_delete_key = matches!(event, TuiEvent::InputChar('d'));
        if !is_delete_key {
            self.confirm_delete = false;
        }

        match event {
            TuiEvent::Escape => Some(HistoryEvent::Dismiss),
            TuiEvent::CursorUp => {
                if !self.rows.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.rows.is_empty() {
                    self.selected = (self.selected + 1).min(self.rows.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => {
                self.draft = self.rows.get(self.selected).cloned().map(EditDraft::new);
                None
            }
            TuiEvent::InputChar('r') => Some(HistoryEvent::Refresh),
            TuiEvent::InputChar('d') => {
                let set = self.rows.get(self.selected)?.clone();
                if self.confirm_delete {
                    self.confirm_delete = false;
                    Some(HistoryEvent::Delete(set))
                } else {
                    self.confirm_delete = true;
                    None
                }
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the history overlay.
pub struct HistoryList<'a> {
    state: &'a mut HistoryListState,
    editing: bool,
}

impl<'a> HistoryList<'a> {
    pub fn new(state: &'a mut HistoryListState, editing: bool) -> Self {
        Self { state, editing }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(80, 80, area);
        frame.render_widget(Clear, overlay);

        let help_text = if self.editing {
            " Saving... "
        } else if self.state.confirm_delete {
            " Press d again to confirm delete | Esc Cancel "
        } else {
            " Enter Edit  d Delete  r Refresh  Esc Back "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" History ({}) ", self.state.rows.len()))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.state.rows.is_empty() {
            let empty = Paragraph::new("No sets logged yet.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .rows
            .iter()
            .enumerate()
            .map(|(i, set)| {
                let style = if i == self.state.selected {
                    let fg = if self.state.confirm_delete {
                        Color::Red
                    } else {
                        Color::White
                    };
                    Style::default()
                        .fg(fg)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format_when(set), style),
                    Span::styled("  ", style),
                    Span::styled(format!("{:<24}", truncate_str(&set.exercise_id, 24)), style),
                    Span::styled(
                        format!("{:>6.1} kg × {:<3} {}", set.weight, set.reps, set.rpe.label()),
                        style,
                    ),
                ]))
            })
            .collect();

        frame.render_stateful_widget(List::new(items).block(block), overlay, &mut self.state.list_state);

        if let Some(draft) = &self.state.draft {
            render_edit_modal(frame, overlay, draft);
        }
    }
}

fn render_edit_modal(frame: &mut Frame, area: Rect, draft: &EditDraft) {
    let modal = centered_rect(60, 40, area);
    frame.render_widget(Clear, modal);
    let value = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled(
            draft.original.exercise_id.clone(),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(vec![Span::raw("Weight  "), Span::styled(format!("‹ {:.1} kg ›", draft.weight), value)]),
        Line::from(vec![Span::raw("Reps    "), Span::styled(format!("{}", draft.reps), value)]),
        Line::from(vec![Span::raw("RPE     "), Span::styled(draft.rpe.label(), value)]),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Edit set ")
        .title_bottom(Line::from(" ←/→ Weight  ↑/↓ Reps  Tab RPE  Enter Save  Esc Cancel ").centered())
        .padding(Padding::horizontal(1));
    frame.render_widget(Paragraph::new(lines).block(block), modal);
}

/// "Jan 23 09:15" in local time; the raw key if it does not parse.
fn format_when(set: &WorkoutSet) -> String {
    match set.logged_at() {
        Some(at) => at.with_timezone(&chrono::Local).format("%b %d %H:%M").to_string(),
        None => set.timestamp.clone(),
    }
}

/// Truncate a string to fit within `max_width` chars, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        ".".repeat(max_width)
    } else {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{kept}...")
    }
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
