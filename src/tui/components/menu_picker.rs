//! # Menu Picker Component
//!
//! The idle screen: choose a workout by duration or by body part.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `MenuPickerState` lives in `TuiState`
//! - `MenuPicker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};

use crate::api::MenuRequest;
use crate::core::menu::{BodyPart, DURATION_CHOICES};
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Every choice the picker offers, durations first.
pub fn choices() -> Vec<MenuRequest> {
    DURATION_CHOICES
        .iter()
        .map(|&m| MenuRequest::Duration(m))
        .chain(BodyPart::ALL.iter().map(|&p| MenuRequest::BodyPart(p)))
        .collect()
}

fn describe(request: MenuRequest) -> (String, &'static str) {
    match request {
        MenuRequest::Duration(minutes) => (format!("{minutes} min"), "full body"),
        MenuRequest::BodyPart(part) => (part.label().to_string(), part.description()),
    }
}

pub struct MenuPickerState {
    pub choices: Vec<MenuRequest>,
    pub selected: usize,
    pub list_state: ListState,
}

impl Default for MenuPickerState {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuPickerState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            choices: choices(),
            selected: 0,
            list_state,
        }
    }
}

pub enum MenuPickerEvent {
    Select(MenuRequest),
}

impl EventHandler for MenuPickerState {
    type Event = MenuPickerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<MenuPickerEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(self.choices.len().saturating_sub(1));
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Submit => self
                .choices
                .get(self.selected)
                .map(|&request| MenuPickerEvent::Select(request)),
            _ => None,
        }
    }
}

/// Transient render wrapper for the picker.
pub struct MenuPicker<'a> {
    state: &'a mut MenuPickerState,
    loading: bool,
}

impl<'a> MenuPicker<'a> {
    pub fn new(state: &'a mut MenuPickerState, loading: bool) -> Self {
        Self { state, loading }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let help_text = if self.loading {
            " Loading menu... "
        } else {
            " Enter Start  h History  a Advice  q Quit "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Pick a workout ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = self
            .state
            .choices
            .iter()
            .enumerate()
            .map(|(i, &request)| {
                let (label, detail) = describe(request);
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{label:<8}"), style),
                    Span::styled("  ", style),
                    Span::styled(detail, style.add_modifier(Modifier::DIM)),
                ]))
            })
            .collect();

        frame.render_stateful_widget(List::new(items).block(block), area, &mut self.state.list_state);
    }
}
