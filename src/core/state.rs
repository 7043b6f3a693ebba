//! # Application State
//!
//! Core business state for liftlog. Domain logic only; presentation state
//! lives in the `tui` module.
//!
//! ```text
//! App
//! ├── user_id: String                  // owner of logged sets
//! ├── session: Option<SessionState>    // None = idle, no menu started
//! ├── history: Vec<WorkoutSet>         // every logged set, oldest first
//! ├── submitting: bool                 // a set is on its way to the server
//! ├── editing: bool                    // a PATCH/DELETE is in flight
//! ├── toast: Option<Toast>             // transient feedback
//! ├── status_message: String           // status bar text
//! ├── ai_output: Option<AiOutput>      // last AI response, shown verbatim
//! └── ai_loading: bool
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::api::{AiCall, WorkoutSet};
use crate::core::workout::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Short-lived feedback shown over the workout view.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiOutput {
    pub call: AiCall,
    pub body: Result<String, String>,
}

pub struct App {
    pub user_id: String,
    pub session: Option<SessionState>,
    pub history: Vec<WorkoutSet>,
    pub submitting: bool,
    pub editing: bool,
    pub toast: Option<Toast>,
    pub status_message: String,
    pub ai_output: Option<AiOutput>,
    pub ai_loading: bool,
}

impl App {
    pub fn new(user_id: String) -> Self {
        Self {
            user_id,
            session: None,
            history: Vec::new(),
            submitting: false,
            editing: false,
            toast: None,
            status_message: String::from("Pick a workout"),
            ai_output: None,
            ai_loading: false,
        }
    }

    pub fn is_resting(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.resting)
    }

    pub fn is_session_complete(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.complete)
    }

    pub fn total_volume(&self) -> f64 {
        self.session.as_ref().map_or(0.0, |s| s.total_volume)
    }
}
