use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Props live in struct fields; `render` draws into the given area and may
/// update presentation caches, which is why it takes `&mut self`.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns terminal events into its own higher-level events.
pub trait EventHandler {
    type Event;

    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
