//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive everything as struct fields and draw it:
//! - `TitleBar`: status line with user, status and session volume
//! - `ExerciseCard`: the exercise in progress
//! - `RestTimerView`: rest countdown gauge
//! - `StatsPanel`: volume bars and 1RM trend
//! - `SessionSummary`: completion banner
//! - `AiPanel`: verbatim AI output overlay
//!
//! ### Stateful Components (Event-Driven)
//!
//! Keep local presentation state in `TuiState` and emit high-level events:
//! - `MenuPickerState`: choose a workout
//! - `LogPanelState`: reps / weight / RPE controls
//! - `HistoryListState`: history overlay with the edit modal
//!
//! Components receive data as props, never by reaching into `App`:
//!
//! ```rust,ignore
//! TitleBar::new(app.user_id.clone(), app.status_message.clone(), None, false)
//!     .render(frame, area);
//! ```

pub mod ai_panel;
pub mod exercise_card;
pub mod history_list;
pub mod log_panel;
pub mod menu_picker;
pub mod rest_timer;
pub mod stats_panel;
pub mod summary;
mod title_bar;

pub use ai_panel::AiPanel;
pub use exercise_card::ExerciseCard;
pub use history_list::{HistoryEvent, HistoryList, HistoryListState};
pub use log_panel::{LogPanel, LogPanelEvent, LogPanelState};
pub use menu_picker::{MenuPicker, MenuPickerEvent, MenuPickerState};
pub use rest_timer::RestTimerView;
pub use stats_panel::StatsPanel;
pub use summary::SessionSummary;
pub use title_bar::TitleBar;
