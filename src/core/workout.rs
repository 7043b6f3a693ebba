//! # Workout Session
//!
//! The cursor through one menu and the transitions that move it.
//!
//! ```text
//!   Idle ──start_menu──▶ InProgress{resting: false}
//!                            │  ▲
//!            apply_log_set   │  │  apply_finish_rest (more sets / exercises)
//!                            ▼  │
//!                       InProgress{resting: true}
//!                            │
//!   apply_finish_rest (last set of last exercise),
//!   apply_skip_exercise (past the end), apply_finish_session
//!                            ▼
//!                        Complete
//! ```
//!
//! Every transition takes the current state by reference and returns the
//! next one. A transition that doesn't apply returns an unchanged copy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::WorkoutSet;
use crate::core::menu::{DEFAULT_WEIGHT, Menu, MenuExercise};
use crate::core::timer::RestTimer;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub menu: Menu,
    pub exercise_index: usize,
    pub current_set: u32,
    pub resting: bool,
    pub weight: f32,
    pub total_volume: f64,
    pub complete: bool,
    /// Persisted separately as `restStartTime` / `restDurationSecs`.
    #[serde(skip)]
    pub rest: Option<RestTimer>,
}

impl SessionState {
    pub fn current_exercise(&self) -> Option<&MenuExercise> {
        if self.complete {
            return None;
        }
        self.menu.exercises.get(self.exercise_index)
    }

    pub fn target_sets(&self) -> u32 {
        self.current_exercise()
            .map(MenuExercise::target_sets)
            .unwrap_or(0)
    }

    /// Sets finished so far across the whole menu, for the progress bar.
    pub fn sets_done(&self) -> u32 {
        if self.complete {
            return self.menu.total_sets();
        }
        let before: u32 = self.menu.exercises[..self.exercise_index.min(self.menu.exercises.len())]
            .iter()
            .map(MenuExercise::target_sets)
            .sum();
        let in_current = if self.resting {
            self.current_set
        } else {
            self.current_set.saturating_sub(1)
        };
        before + in_current
    }

    /// Whether the cursor points somewhere real: a non-empty menu and,
    /// unless complete, an existing exercise with `1 <= current_set <= target`.
    pub fn is_consistent(&self) -> bool {
        if self.menu.exercises.is_empty() {
            return false;
        }
        if self.complete {
            return true;
        }
        let Some(exercise) = self.menu.exercises.get(self.exercise_index) else {
            return false;
        };
        (1..=exercise.target_sets()).contains(&self.current_set)
    }

    fn advance_exercise(&mut self) {
        self.resting = false;
        self.rest = None;
        let next = self.exercise_index + 1;
        match self.menu.exercises.get(next) {
            Some(exercise) => {
                self.exercise_index = next;
                self.current_set = 1;
                self.weight = exercise.recommended_weight;
            }
            None => self.complete = true,
        }
    }
}

/// Opens a session on `menu`. Returns `None` for a menu with no exercises.
pub fn start_menu(menu: Menu) -> Option<SessionState> {
    let first = menu.exercises.first()?;
    let weight = if first.recommended_weight > 0.0 {
        first.recommended_weight
    } else {
        DEFAULT_WEIGHT
    };
    Some(SessionState {
        menu,
        exercise_index: 0,
        current_set: 1,
        resting: false,
        weight,
        total_volume: 0.0,
        complete: false,
        rest: None,
    })
}

/// Records a logged set: volume grows and the rest for the current
/// exercise begins at `rest_started_at`.
pub fn apply_log_set(
    state: &SessionState,
    set: &WorkoutSet,
    rest_started_at: DateTime<Utc>,
) -> SessionState {
    let mut next = state.clone();
    let Some(exercise) = state.current_exercise() else {
        return next;
    };
    if state.resting {
        return next;
    }
    next.total_volume += set.volume();
    next.resting = true;
    next.rest = Some(RestTimer::start(exercise.rest_secs(), rest_started_at));
    next
}

/// Resolves the current rest. The only transition that advances the set
/// cursor. No-op unless resting.
pub fn apply_finish_rest(state: &SessionState) -> SessionState {
    let mut next = state.clone();
    if !state.resting || state.complete {
        return next;
    }
    if state.current_set < state.target_sets() {
        next.resting = false;
        next.rest = None;
        next.current_set += 1;
    } else {
        next.advance_exercise();
    }
    next
}

/// Moves to the next exercise (or completes) regardless of sets left.
pub fn apply_skip_exercise(state: &SessionState) -> SessionState {
    let mut next = state.clone();
    if state.complete {
        return next;
    }
    next.advance_exercise();
    next
}

/// Ends the session where it stands.
pub fn apply_finish_session(state: &SessionState) -> SessionState {
    let mut next = state.clone();
    next.complete = true;
    next.resting = false;
    next.rest = None;
    next
}

/// Sets the working weight, clamped at zero.
pub fn apply_set_weight(state: &SessionState, weight: f32) -> SessionState {
    let mut next = state.clone();
    if !state.complete {
        next.weight = weight.max(0.0);
    }
    next
}
