//! # Actions
//!
//! Everything that can happen in liftlog becomes an `Action`.
//! User logs a set? That's `Action::LogSet`.
//! Server answers? That's `Action::SetSynced { outcome, .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an `Effect` telling the adapter what I/O to do
//! next. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::api::types::format_timestamp;
use crate::api::{AiCall, ApiError, RpeLevel, WorkoutSet};
use crate::core::menu::Menu;
use crate::core::state::{AiOutput, App, Toast};
use crate::core::workout::{
    apply_finish_rest, apply_finish_session, apply_log_set, apply_set_weight, apply_skip_exercise,
    start_menu,
};

/// Why a remote write of a freshly logged set did not land.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncFailure {
    /// The client gave up waiting.
    TimedOut { after_secs: u64 },
    /// The server or network refused it.
    Remote(ApiError),
}

impl fmt::Display for SyncFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncFailure::TimedOut { after_secs } => write!(f, "no response after {after_secs}s"),
            SyncFailure::Remote(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SyncFailure {}

/// Why a `LogSet` was turned away before anything was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRejection {
    NoSession,
    SessionComplete,
    Resting,
    Submitting,
    ZeroReps,
}

impl fmt::Display for LogRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            LogRejection::NoSession => "no workout in progress",
            LogRejection::SessionComplete => "workout already complete",
            LogRejection::Resting => "finish resting first",
            LogRejection::Submitting => "previous set still saving",
            LogRejection::ZeroReps => "reps must be at least 1",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for LogRejection {}

/// A retroactive change to history.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEdit {
    Update(WorkoutSet),
    Delete(WorkoutSet),
}

impl LogEdit {
    pub fn set(&self) -> &WorkoutSet {
        match self {
            LogEdit::Update(set) | LogEdit::Delete(set) => set,
        }
    }
}

#[derive(Debug)]
pub enum Action {
    StartMenu(Menu),
    SetWeight(f32),
    AdjustWeight(f32),
    LogSet {
        reps: u32,
        rpe: RpeLevel,
        at: DateTime<Utc>,
    },
    /// The remote write for `set` finished (either way) at `at`.
    SetSynced {
        set: WorkoutSet,
        outcome: Result<(), SyncFailure>,
        at: DateTime<Utc>,
    },
    FinishRest,
    /// Scheduler heartbeat; resolves the rest once its timer runs out.
    Tick(DateTime<Utc>),
    SkipExercise,
    FinishSession,
    UpdateLog(WorkoutSet),
    DeleteLog(WorkoutSet),
    EditResolved {
        edit: LogEdit,
        result: Result<(), ApiError>,
    },
    HistoryLoaded(Vec<WorkoutSet>),
    RequestAi(AiCall),
    AiResponse {
        call: AiCall,
        body: Result<String, String>,
    },
    DismissToast,
    Quit,
}

/// Side effects the adapter must carry out after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Mirror state to the local snapshot.
    Persist,
    /// Send this set to `POST /log`, then report back with `SetSynced`.
    SyncSet(WorkoutSet),
    /// A set landed in history; pulse short if synced, long if not. Persist.
    SetRecorded { synced: bool },
    /// The rest timer ran out: notify, persist.
    RestExpired,
    /// The session just reached `Complete`. Persist, prime the next menus.
    SessionComplete,
    PatchLog(WorkoutSet),
    RemoveLog(WorkoutSet),
    FetchAi(AiCall),
    Quit,
}

/// Checks `logSet` preconditions without touching state.
pub fn check_log_set(app: &App, reps: u32) -> Result<(), LogRejection> {
    let session = app.session.as_ref().ok_or(LogRejection::NoSession)?;
    if session.complete {
        return Err(LogRejection::SessionComplete);
    }
    if app.submitting {
        return Err(LogRejection::Submitting);
    }
    if session.resting {
        return Err(LogRejection::Resting);
    }
    if reps == 0 {
        return Err(LogRejection::ZeroReps);
    }
    Ok(())
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::StartMenu(menu) => {
            if app.submitting {
                app.status_message = "Wait for the last set to save".to_string();
                return Effect::None;
            }
            match start_menu(menu) {
                Some(session) => {
                    info!(
                        "Starting menu '{}' ({} exercises, generated={})",
                        session.menu.title(),
                        session.menu.exercises.len(),
                        session.menu.is_generated()
                    );
                    app.status_message = format!("{} started", session.menu.title());
                    app.session = Some(session);
                    app.toast = None;
                    Effect::Persist
                }
                None => {
                    warn!("Refusing to start a menu with no exercises");
                    Effect::None
                }
            }
        }
        Action::SetWeight(weight) => {
            if let Some(session) = &app.session {
                app.session = Some(apply_set_weight(session, weight));
            }
            Effect::None
        }
        Action::AdjustWeight(delta) => {
            if let Some(session) = &app.session {
                let weight = session.weight + delta;
                app.session = Some(apply_set_weight(session, weight));
            }
            Effect::None
        }
        Action::LogSet { reps, rpe, at } => {
            if let Err(rejection) = check_log_set(app, reps) {
                debug!("LogSet rejected: {}", rejection);
                app.status_message = rejection.to_string();
                return Effect::None;
            }
            let Some(session) = &app.session else {
                return Effect::None;
            };
            let Some(exercise) = session.current_exercise() else {
                return Effect::None;
            };
            let set = WorkoutSet {
                user_id: app.user_id.clone(),
                timestamp: format_timestamp(at),
                exercise_id: exercise.exercise_name.clone(),
                weight: session.weight,
                reps,
                rpe,
            };
            app.submitting = true;
            app.status_message = "Saving...".to_string();
            Effect::SyncSet(set)
        }
        Action::SetSynced { set, outcome, at } => record_set(app, set, outcome, at),
        Action::FinishRest => resolve_rest(app),
        Action::Tick(now) => {
            let expired = app
                .session
                .as_ref()
                .and_then(|s| if s.resting { s.rest } else { None })
                .is_some_and(|rest| rest.is_expired(now));
            if !expired {
                return Effect::None;
            }
            info!("Rest timer expired");
            resolve_rest(app);
            app.toast = Some(Toast::success(if app.is_session_complete() {
                "Rest complete! Workout finished."
            } else {
                "Rest complete! Ready for the next set?"
            }));
            Effect::RestExpired
        }
        Action::SkipExercise => {
            if app.submitting {
                return Effect::None;
            }
            let Some(session) = &app.session else {
                return Effect::None;
            };
            if session.complete {
                return Effect::None;
            }
            let next = apply_skip_exercise(session);
            let complete = next.complete;
            app.session = Some(next);
            if complete {
                app.status_message = "Session complete".to_string();
                Effect::SessionComplete
            } else {
                app.status_message = "Exercise skipped".to_string();
                Effect::Persist
            }
        }
        Action::FinishSession => {
            if app.submitting {
                return Effect::None;
            }
            match &app.session {
                Some(session) if !session.complete => {
                    app.session = Some(apply_finish_session(session));
                    app.status_message = "Session complete".to_string();
                    Effect::SessionComplete
                }
                _ => Effect::None,
            }
        }
        Action::UpdateLog(set) => {
            if app.editing {
                return Effect::None;
            }
            app.editing = true;
            Effect::PatchLog(set)
        }
        Action::DeleteLog(set) => {
            if app.editing {
                return Effect::None;
            }
            app.editing = true;
            Effect::RemoveLog(set)
        }
        Action::EditResolved { edit, result } => {
            app.editing = false;
            match result {
                Ok(()) => {
                    apply_edit(app, &edit);
                    app.toast = Some(Toast::success(match edit {
                        LogEdit::Update(_) => "Log updated",
                        LogEdit::Delete(_) => "Log deleted",
                    }));
                    Effect::Persist
                }
                Err(e) => {
                    warn!("Edit of {} failed: {}", edit.set().timestamp, e);
                    app.toast = Some(Toast::error(format!("Edit failed: {e}")));
                    Effect::None
                }
            }
        }
        Action::HistoryLoaded(remote) => {
            let remote_count = remote.len();
            app.history = merge_history(remote, std::mem::take(&mut app.history));
            info!(
                "History loaded: {} remote sets, {} total after merge",
                remote_count,
                app.history.len()
            );
            Effect::Persist
        }
        Action::RequestAi(call) => {
            if app.ai_loading {
                return Effect::None;
            }
            app.ai_loading = true;
            app.ai_output = None;
            Effect::FetchAi(call)
        }
        Action::AiResponse { call, body } => {
            app.ai_loading = false;
            app.ai_output = Some(AiOutput { call, body });
            Effect::None
        }
        Action::DismissToast => {
            app.toast = None;
            Effect::None
        }
        Action::Quit => {
            if app.submitting {
                app.status_message = "Saving the last set, quit again once it lands".to_string();
                return Effect::None;
            }
            Effect::Quit
        }
    }
}

/// Remote wins for every timestamp it knows; local sets it lacks (not yet
/// synced, or logged after the request went out) are kept. Ordered by key.
fn merge_history(remote: Vec<WorkoutSet>, local: Vec<WorkoutSet>) -> Vec<WorkoutSet> {
    let mut merged = remote;
    let missing: Vec<WorkoutSet> = local
        .into_iter()
        .filter(|l| !merged.iter().any(|r| r.timestamp == l.timestamp))
        .collect();
    if !missing.is_empty() {
        debug!("Keeping {} local sets the server does not have", missing.len());
        merged.extend(missing);
        merged.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    }
    merged
}

/// The single continuation for a logged set. Success and failure record
/// the set identically; only the feedback differs.
fn record_set(
    app: &mut App,
    set: WorkoutSet,
    outcome: Result<(), SyncFailure>,
    at: DateTime<Utc>,
) -> Effect {
    app.submitting = false;
    if let Some(session) = &app.session {
        app.session = Some(apply_log_set(session, &set, at));
    }
    info!(
        "Recorded set: {} {}kg x {} ({})",
        set.exercise_id,
        set.weight,
        set.reps,
        set.rpe.label()
    );
    app.history.push(set);

    let synced = match outcome {
        Ok(()) => {
            app.toast = Some(Toast::success("Log saved"));
            true
        }
        Err(e) => {
            warn!("Set sync failed, kept locally: {}", e);
            app.toast = Some(Toast::error("Sync failed - saved locally"));
            false
        }
    };
    app.status_message = "Resting".to_string();
    Effect::SetRecorded { synced }
}

fn resolve_rest(app: &mut App) -> Effect {
    let Some(session) = &app.session else {
        return Effect::None;
    };
    if !session.resting {
        debug!("Rest already resolved, ignoring");
        return Effect::None;
    }
    let next = apply_finish_rest(session);
    let complete = next.complete;
    app.session = Some(next);
    if complete {
        app.status_message = "Session complete".to_string();
        Effect::SessionComplete
    } else {
        app.status_message = "Next set".to_string();
        Effect::Persist
    }
}

fn apply_edit(app: &mut App, edit: &LogEdit) {
    match edit {
        LogEdit::Update(updated) => {
            if let Some(existing) = app
                .history
                .iter_mut()
                .find(|s| s.timestamp == updated.timestamp)
            {
                *existing = updated.clone();
            }
        }
        LogEdit::Delete(removed) => {
            app.history.retain(|s| s.timestamp != removed.timestamp);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::menu::{Menu, MenuExercise};
    use crate::test_support::{menu_with_sets, sample_set, t0, test_app};
    use chrono::Duration;

    fn press_menu() -> Menu {
        Menu {
            name: String::new(),
            body_part: "push".into(),
            duration_minutes: None,
            exercises: vec![MenuExercise {
                exercise_name: "Press".into(),
                sets: 1,
                reps: 10,
                recommended_weight: 20.0,
                rest_seconds: 60,
                notes: String::new(),
            }],
            generated_at: String::new(),
        }
    }

    /// Dispatches LogSet and feeds back the given sync outcome.
    fn log_and_sync(app: &mut App, reps: u32, rpe: RpeLevel, outcome: Result<(), SyncFailure>) -> Effect {
        let effect = update(app, Action::LogSet { reps, rpe, at: t0() });
        let Effect::SyncSet(set) = effect else {
            panic!("expected SyncSet, got {effect:?}");
        };
        assert!(app.submitting);
        update(app, Action::SetSynced { set, outcome, at: t0() })
    }

    #[test]
    fn test_press_scenario_completes_after_single_set() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::StartMenu(press_menu())), Effect::Persist);

        let effect = log_and_sync(&mut app, 10, RpeLevel::Just, Ok(()));
        assert_eq!(effect, Effect::SetRecorded { synced: true });
        assert_eq!(app.total_volume(), 200.0);
        assert!(app.is_resting());
        assert_eq!(app.history.len(), 1);
        assert_eq!(app.history[0].exercise_id, "Press");
        assert_eq!(app.history[0].timestamp, "2026-01-23T09:00:00.000Z");

        assert_eq!(update(&mut app, Action::FinishRest), Effect::SessionComplete);
        assert!(app.is_session_complete());
    }

    #[test]
    fn test_sync_failure_still_records_locally() {
        let mut app = test_app();
        update(&mut app, Action::StartMenu(press_menu()));

        let effect = log_and_sync(
            &mut app,
            8,
            RpeLevel::Limit,
            Err(SyncFailure::TimedOut { after_secs: 10 }),
        );
        assert_eq!(effect, Effect::SetRecorded { synced: false });
        assert_eq!(app.history.len(), 1);
        assert_eq!(app.total_volume(), 160.0);
        assert!(app.is_resting());
        assert!(!app.submitting);
        assert_eq!(app.toast, Some(Toast::error("Sync failed - saved locally")));
    }

    #[test]
    fn test_log_set_preconditions() {
        let mut app = test_app();
        assert_eq!(check_log_set(&app, 10), Err(LogRejection::NoSession));

        update(&mut app, Action::StartMenu(menu_with_sets(&[2])));
        assert_eq!(check_log_set(&app, 0), Err(LogRejection::ZeroReps));
        assert_eq!(
            update(&mut app, Action::LogSet { reps: 0, rpe: RpeLevel::Easy, at: t0() }),
            Effect::None
        );

        let effect = update(&mut app, Action::LogSet { reps: 5, rpe: RpeLevel::Easy, at: t0() });
        assert!(matches!(effect, Effect::SyncSet(_)));
        assert_eq!(check_log_set(&app, 5), Err(LogRejection::Submitting));
        assert_eq!(
            update(&mut app, Action::LogSet { reps: 5, rpe: RpeLevel::Easy, at: t0() }),
            Effect::None
        );
    }

    #[test]
    fn test_log_set_rejected_while_resting() {
        let mut app = test_app();
        update(&mut app, Action::StartMenu(menu_with_sets(&[2])));
        log_and_sync(&mut app, 5, RpeLevel::Easy, Ok(()));
        assert_eq!(check_log_set(&app, 5), Err(LogRejection::Resting));
    }

    #[test]
    fn test_finish_rest_twice_is_noop_second_time() {
        let mut app = test_app();
        update(&mut app, Action::StartMenu(menu_with_sets(&[3])));
        log_and_sync(&mut app, 10, RpeLevel::Just, Ok(()));

        assert_eq!(update(&mut app, Action::FinishRest), Effect::Persist);
        let after_first = app.session.clone();
        assert_eq!(update(&mut app, Action::FinishRest), Effect::None);
        assert_eq!(app.session, after_first);
        assert_eq!(app.session.as_ref().map(|s| s.current_set), Some(2));
    }

    #[test]
    fn test_timer_expiry_and_skip_resolve_rest_once() {
        let mut app = test_app();
        update(&mut app, Action::StartMenu(menu_with_sets(&[3])));
        log_and_sync(&mut app, 10, RpeLevel::Just, Ok(()));

        assert_eq!(update(&mut app, Action::Tick(t0() + Duration::seconds(59))), Effect::None);
        assert!(app.is_resting());

        assert_eq!(
            update(&mut app, Action::Tick(t0() + Duration::seconds(60))),
            Effect::RestExpired
        );
        assert_eq!(update(&mut app, Action::FinishRest), Effect::None);
        assert_eq!(update(&mut app, Action::Tick(t0() + Duration::seconds(61))), Effect::None);
        assert_eq!(app.session.as_ref().map(|s| s.current_set), Some(2));
    }

    #[test]
    fn test_skip_before_expiry_makes_later_tick_noop() {
        let mut app = test_app();
        update(&mut app, Action::StartMenu(menu_with_sets(&[3])));
        log_and_sync(&mut app, 10, RpeLevel::Just, Ok(()));

        assert_eq!(update(&mut app, Action::FinishRest), Effect::Persist);
        assert_eq!(update(&mut app, Action::Tick(t0() + Duration::seconds(120))), Effect::None);
        assert_eq!(app.session.as_ref().map(|s| s.current_set), Some(2));
    }

    #[test]
    fn test_sixth_cycle_after_completion_is_noop() {
        let mut app = test_app();
        update(&mut app, Action::StartMenu(menu_with_sets(&[3, 2])));
        for _ in 0..5 {
            log_and_sync(&mut app, 10, RpeLevel::Just, Ok(()));
            update(&mut app, Action::FinishRest);
        }
        assert!(app.is_session_complete());
        let before = app.session.clone();

        assert_eq!(
            update(&mut app, Action::LogSet { reps: 10, rpe: RpeLevel::Just, at: t0() }),
            Effect::None
        );
        assert_eq!(update(&mut app, Action::FinishRest), Effect::None);
        assert_eq!(app.session, before);
        assert_eq!(app.history.len(), 5);
    }

    #[test]
    fn test_transitions_wait_for_pending_set() {
        let mut app = test_app();
        update(&mut app, Action::StartMenu(menu_with_sets(&[1, 1])));
        update(&mut app, Action::LogSet { reps: 5, rpe: RpeLevel::Just, at: t0() });

        assert_eq!(update(&mut app, Action::SkipExercise), Effect::None);
        assert_eq!(update(&mut app, Action::FinishSession), Effect::None);
        assert_eq!(update(&mut app, Action::StartMenu(press_menu())), Effect::None);
        assert_eq!(app.session.as_ref().map(|s| s.exercise_index), Some(0));
    }

    #[test]
    fn test_skip_exercise_to_completion() {
        let mut app = test_app();
        update(&mut app, Action::StartMenu(menu_with_sets(&[3, 3])));
        assert_eq!(update(&mut app, Action::SkipExercise), Effect::Persist);
        assert_eq!(update(&mut app, Action::SkipExercise), Effect::SessionComplete);
        assert_eq!(update(&mut app, Action::SkipExercise), Effect::None);
    }

    #[test]
    fn test_finish_session_early() {
        let mut app = test_app();
        update(&mut app, Action::StartMenu(menu_with_sets(&[3])));
        assert_eq!(update(&mut app, Action::FinishSession), Effect::SessionComplete);
        assert!(app.is_session_complete());
        assert_eq!(update(&mut app, Action::FinishSession), Effect::None);
    }

    #[test]
    fn test_adjust_weight() {
        let mut app = test_app();
        update(&mut app, Action::StartMenu(menu_with_sets(&[1])));
        update(&mut app, Action::AdjustWeight(2.0));
        assert_eq!(app.session.as_ref().map(|s| s.weight), Some(22.0));
        update(&mut app, Action::AdjustWeight(-30.0));
        assert_eq!(app.session.as_ref().map(|s| s.weight), Some(0.0));
        update(&mut app, Action::SetWeight(17.5));
        assert_eq!(app.session.as_ref().map(|s| s.weight), Some(17.5));
    }

    #[test]
    fn test_update_log_applies_only_after_confirmation() {
        let mut app = test_app();
        app.history = vec![sample_set("2026-01-20T10:00:00.000Z", 20.0, 10)];
        let mut changed = app.history[0].clone();
        changed.reps = 12;

        assert_eq!(
            update(&mut app, Action::UpdateLog(changed.clone())),
            Effect::PatchLog(changed.clone())
        );
        assert_eq!(app.history[0].reps, 10);

        update(
            &mut app,
            Action::EditResolved {
                edit: LogEdit::Update(changed.clone()),
                result: Ok(()),
            },
        );
        assert_eq!(app.history[0].reps, 12);
        assert!(!app.editing);
    }

    #[test]
    fn test_failed_edit_leaves_history_untouched() {
        let mut app = test_app();
        let original = sample_set("2026-01-20T10:00:00.000Z", 20.0, 10);
        app.history = vec![original.clone()];

        update(&mut app, Action::DeleteLog(original.clone()));
        let effect = update(
            &mut app,
            Action::EditResolved {
                edit: LogEdit::Delete(original.clone()),
                result: Err(ApiError::Api {
                    status: 500,
                    message: "boom".into(),
                }),
            },
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(app.history, vec![original]);
        assert!(matches!(app.toast, Some(Toast { kind: crate::core::state::ToastKind::Error, .. })));
    }

    #[test]
    fn test_delete_removes_by_timestamp() {
        let mut app = test_app();
        let keep = sample_set("2026-01-20T10:00:00.000Z", 20.0, 10);
        let gone = sample_set("2026-01-20T10:05:00.000Z", 20.0, 8);
        app.history = vec![keep.clone(), gone.clone()];

        update(&mut app, Action::DeleteLog(gone.clone()));
        update(
            &mut app,
            Action::EditResolved {
                edit: LogEdit::Delete(gone),
                result: Ok(()),
            },
        );
        assert_eq!(app.history, vec![keep]);
    }

    #[test]
    fn test_only_one_edit_in_flight() {
        let mut app = test_app();
        let set = sample_set("2026-01-20T10:00:00.000Z", 20.0, 10);
        assert!(matches!(update(&mut app, Action::DeleteLog(set.clone())), Effect::RemoveLog(_)));
        assert_eq!(update(&mut app, Action::UpdateLog(set)), Effect::None);
    }

    #[test]
    fn test_ai_request_and_response() {
        let mut app = test_app();
        assert_eq!(
            update(&mut app, Action::RequestAi(AiCall::Recommend)),
            Effect::FetchAi(AiCall::Recommend)
        );
        assert_eq!(update(&mut app, Action::RequestAi(AiCall::Recommend)), Effect::None);
        update(
            &mut app,
            Action::AiResponse {
                call: AiCall::Recommend,
                body: Ok("add 2.5kg".into()),
            },
        );
        assert!(!app.ai_loading);
        assert_eq!(
            app.ai_output.as_ref().map(|o| o.body.clone()),
            Some(Ok("add 2.5kg".to_string()))
        );
    }

    #[test]
    fn test_start_menu_ignores_empty_menu() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::StartMenu(menu_with_sets(&[]))), Effect::None);
        assert!(app.session.is_none());
    }

    #[test]
    fn test_late_history_load_keeps_unsynced_set() {
        let mut app = test_app();
        update(&mut app, Action::StartMenu(menu_with_sets(&[3])));
        log_and_sync(
            &mut app,
            8,
            RpeLevel::Limit,
            Err(SyncFailure::TimedOut { after_secs: 10 }),
        );

        update(&mut app, Action::HistoryLoaded(vec![]));
        assert_eq!(app.history.len(), 1);
        assert_eq!(app.history[0].reps, 8);
        assert_eq!(app.total_volume(), 160.0);
    }

    #[test]
    fn test_history_load_prefers_remote_and_orders_by_timestamp() {
        let mut app = test_app();
        app.history = vec![
            sample_set("2026-01-22T10:00:00.000Z", 20.0, 10),
            sample_set("2026-01-23T10:00:00.000Z", 20.0, 10),
        ];
        let remote = vec![
            sample_set("2026-01-21T10:00:00.000Z", 30.0, 5),
            sample_set("2026-01-22T10:00:00.000Z", 25.0, 6),
        ];
        update(&mut app, Action::HistoryLoaded(remote));

        let keys: Vec<&str> = app.history.iter().map(|s| s.timestamp.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "2026-01-21T10:00:00.000Z",
                "2026-01-22T10:00:00.000Z",
                "2026-01-23T10:00:00.000Z"
            ]
        );
        assert_eq!(app.history[1].weight, 25.0);
    }

    #[test]
    fn test_quit_waits_for_pending_set() {
        let mut app = test_app();
        update(&mut app, Action::StartMenu(menu_with_sets(&[3])));
        let Effect::SyncSet(set) = update(
            &mut app,
            Action::LogSet {
                reps: 10,
                rpe: RpeLevel::Just,
                at: t0(),
            },
        ) else {
            panic!("expected SyncSet");
        };
        assert_eq!(update(&mut app, Action::Quit), Effect::None);

        update(
            &mut app,
            Action::SetSynced {
                set,
                outcome: Ok(()),
                at: t0(),
            },
        );
        assert_eq!(app.history.len(), 1);
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }

    #[test]
    fn test_expiry_on_last_set_announces_finish() {
        let mut app = test_app();
        update(&mut app, Action::StartMenu(press_menu()));
        log_and_sync(&mut app, 10, RpeLevel::Just, Ok(()));

        assert_eq!(
            update(&mut app, Action::Tick(t0() + Duration::seconds(61))),
            Effect::RestExpired
        );
        assert!(app.is_session_complete());
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some("Rest complete! Workout finished.")
        );
    }
}
