//! # Session Engine
//!
//! Runs the core reducer against a live backend without a UI. The TUI
//! drives the same async helpers from spawned tasks; this module also
//! offers a sequential driver (`SessionEngine`) for headless use and tests.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::api::{AiCall, ApiError, MenuRequest, RpeLevel, WorkoutBackend, WorkoutSet};
use crate::core::action::{Action, Effect, LogEdit, LogRejection, SyncFailure, check_log_set, update};
use crate::core::menu::{Menu, fallback_for_body_part, fallback_for_duration};
use crate::core::snapshot;
use crate::core::state::App;

/// Sends one set to the log, giving up after `timeout`.
pub async fn sync_set(
    backend: &dyn WorkoutBackend,
    set: &WorkoutSet,
    timeout: Duration,
) -> Result<(), SyncFailure> {
    match tokio::time::timeout(timeout, backend.post_log(set)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(SyncFailure::Remote(e)),
        Err(_) => {
            warn!(
                "POST /log for {} timed out after {}s",
                set.timestamp,
                timeout.as_secs()
            );
            Err(SyncFailure::TimedOut {
                after_secs: timeout.as_secs(),
            })
        }
    }
}

pub fn fallback_menu(request: MenuRequest) -> Menu {
    match request {
        MenuRequest::Duration(minutes) => fallback_for_duration(minutes),
        MenuRequest::BodyPart(part) => fallback_for_body_part(part),
    }
}

/// Gives exercises without a rest of their own the configured default.
pub fn fill_default_rest(mut menu: Menu, rest_secs: u32) -> Menu {
    for exercise in menu.exercises.iter_mut().filter(|e| e.rest_seconds == 0) {
        exercise.rest_seconds = rest_secs;
    }
    menu
}

/// First usable generated menu, or the static fallback. Never fails.
pub async fn load_menu(backend: &dyn WorkoutBackend, user_id: &str, request: MenuRequest) -> Menu {
    match backend.fetch_menus(user_id, request).await {
        Ok(menus) => match menus.into_iter().find(|m| !m.exercises.is_empty()) {
            Some(menu) => menu,
            None => {
                debug!("No generated menus for {:?}, using fallback", request);
                fallback_menu(request)
            }
        },
        Err(e) => {
            debug!("Menu fetch for {:?} failed ({}), using fallback", request, e);
            fallback_menu(request)
        }
    }
}

/// Carries out a history edit remotely.
pub async fn send_edit(backend: &dyn WorkoutBackend, edit: &LogEdit) -> Result<(), ApiError> {
    match edit {
        LogEdit::Update(set) => backend.patch_log(set).await,
        LogEdit::Delete(set) => backend.delete_log(set).await,
    }
}

/// Asks the service to prepare the next round of menus. Failure is harmless.
pub async fn prime_menus(backend: &dyn WorkoutBackend, user_id: &str) {
    if let Err(e) = backend.ai(AiCall::GenerateMenus, user_id).await {
        warn!("Menu generation trigger failed (non-critical): {}", e);
    }
}

/// What happened to a set handed to [`SessionEngine::log_set`].
#[derive(Debug, Clone, PartialEq)]
pub struct LogOutcome {
    pub set: WorkoutSet,
    pub sync: Result<(), SyncFailure>,
}

/// Sequential driver: every call runs to completion before returning.
pub struct SessionEngine {
    app: App,
    backend: Arc<dyn WorkoutBackend>,
    sync_timeout: Duration,
    snapshot_path: Option<PathBuf>,
}

impl SessionEngine {
    pub fn new(app: App, backend: Arc<dyn WorkoutBackend>, sync_timeout: Duration) -> Self {
        Self {
            app,
            backend,
            sync_timeout,
            snapshot_path: None,
        }
    }

    /// Mirror state to `path` after every state-changing step.
    pub fn with_snapshot(mut self, path: PathBuf) -> Self {
        self.snapshot_path = Some(path);
        self
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    fn dispatch(&mut self, action: Action) -> Effect {
        let effect = update(&mut self.app, action);
        match &effect {
            Effect::Persist | Effect::SetRecorded { .. } | Effect::RestExpired => self.persist(),
            Effect::SessionComplete => {
                self.persist();
                self.spawn_prime_menus();
            }
            _ => {}
        }
        if matches!(effect, Effect::RestExpired) && self.app.is_session_complete() {
            self.spawn_prime_menus();
        }
        effect
    }

    fn persist(&self) {
        if let Some(path) = &self.snapshot_path {
            snapshot::persist(&self.app, path);
        }
    }

    fn spawn_prime_menus(&self) {
        // Only when a runtime is around; sync callers just skip it.
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let backend = self.backend.clone();
        let user_id = self.app.user_id.clone();
        handle.spawn(async move {
            prime_menus(backend.as_ref(), &user_id).await;
        });
    }

    /// Returns false if the menu had no exercises or a set is still saving.
    pub fn start_menu(&mut self, menu: Menu) -> bool {
        matches!(self.dispatch(Action::StartMenu(menu)), Effect::Persist)
    }

    /// Fetches a generated menu (or falls back) and starts it.
    pub async fn select_menu(&mut self, request: MenuRequest) -> bool {
        let menu = load_menu(self.backend.as_ref(), &self.app.user_id, request).await;
        self.start_menu(menu)
    }

    pub fn adjust_weight(&mut self, delta: f32) {
        self.dispatch(Action::AdjustWeight(delta));
    }

    /// Logs a set. Sync failure still records locally and returns `Ok`;
    /// only a broken precondition is an `Err`.
    pub async fn log_set(&mut self, reps: u32, rpe: RpeLevel) -> Result<LogOutcome, LogRejection> {
        check_log_set(&self.app, reps)?;
        let Effect::SyncSet(set) = self.dispatch(Action::LogSet {
            reps,
            rpe,
            at: Utc::now(),
        }) else {
            return Err(LogRejection::NoSession);
        };

        let sync = sync_set(self.backend.as_ref(), &set, self.sync_timeout).await;
        self.dispatch(Action::SetSynced {
            set: set.clone(),
            outcome: sync.clone(),
            at: Utc::now(),
        });
        Ok(LogOutcome { set, sync })
    }

    /// Returns true if a rest was resolved.
    pub fn finish_rest(&mut self) -> bool {
        !matches!(self.dispatch(Action::FinishRest), Effect::None)
    }

    /// Returns true if the rest timer ran out at `now`.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        matches!(self.dispatch(Action::Tick(now)), Effect::RestExpired)
    }

    pub fn skip_exercise(&mut self) {
        self.dispatch(Action::SkipExercise);
    }

    pub fn finish_session(&mut self) {
        self.dispatch(Action::FinishSession);
    }

    async fn edit(&mut self, edit: LogEdit) -> Result<(), ApiError> {
        let requested = match &edit {
            LogEdit::Update(set) => self.dispatch(Action::UpdateLog(set.clone())),
            LogEdit::Delete(set) => self.dispatch(Action::DeleteLog(set.clone())),
        };
        if requested == Effect::None {
            return Err(ApiError::Config("another edit is in flight".to_string()));
        }
        let result = send_edit(self.backend.as_ref(), &edit).await;
        self.dispatch(Action::EditResolved {
            edit,
            result: result.clone(),
        });
        result
    }

    /// `PATCH /log`; history changes only if the server accepts.
    pub async fn update_log(&mut self, set: WorkoutSet) -> Result<(), ApiError> {
        self.edit(LogEdit::Update(set)).await
    }

    /// `DELETE /log`; history changes only if the server accepts.
    pub async fn delete_log(&mut self, set: WorkoutSet) -> Result<(), ApiError> {
        self.edit(LogEdit::Delete(set)).await
    }

    /// Replaces local history with the server's. Keeps local on failure.
    pub async fn refresh_history(&mut self) -> Result<usize, ApiError> {
        match self.backend.fetch_history(&self.app.user_id).await {
            Ok(history) => {
                let count = history.len();
                self.dispatch(Action::HistoryLoaded(history));
                Ok(count)
            }
            Err(e) => {
                warn!("History refresh failed, keeping {} local sets: {}", self.app.history.len(), e);
                Err(e)
            }
        }
    }

    /// Runs one AI call; the response lands in `app().ai_output`.
    pub async fn ask_ai(&mut self, call: AiCall) {
        if !matches!(self.dispatch(Action::RequestAi(call)), Effect::FetchAi(_)) {
            return;
        }
        info!("Requesting {}", call.title());
        let body = self
            .backend
            .ai(call, &self.app.user_id)
            .await
            .map_err(|e| e.to_string());
        self.dispatch(Action::AiResponse { call, body });
    }
}
