//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Loop
//!
//! Every pass draws, polls input for up to 250ms, then feeds the reducer a
//! `Tick` with the wall clock. That tick is the rest timer's scheduler: the
//! reducer compares it against the current rest and resolves it once.
//! Network work runs on tokio tasks that report back through an mpsc
//! channel, so `App` is only ever touched from this loop.

mod component;
mod components;
mod event;
mod notify;
mod ui;

use std::io::stdout;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use log::{debug, info, warn};

use crate::api::{AiCall, HttpBackend, MenuRequest, WorkoutBackend, WorkoutSet};
use crate::core::action::{Action, Effect, LogEdit, update};
use crate::core::config::ResolvedConfig;
use crate::core::snapshot;
use crate::core::state::App;
use crate::engine;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    HistoryEvent, HistoryListState, LogPanelEvent, LogPanelState, MenuPickerEvent, MenuPickerState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::notify::{Notifier, Pulse};

/// Upper bound between two ticks of the rest scheduler.
const TICK_INTERVAL: Duration = Duration::from_millis(250);
/// How long a toast stays up before it is dismissed.
const TOAST_TTL: Duration = Duration::from_secs(3);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub menu_picker: MenuPickerState,
    pub log_panel: LogPanelState,
    /// History overlay (None = hidden)
    pub history: Option<HistoryListState>,
    pub ai_open: bool,
    pub ai_scroll: u16,
    /// A menu fetch is in flight
    pub menu_loading: bool,
    /// When the toast currently on screen first appeared
    pub toast_since: Option<Instant>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            menu_picker: MenuPickerState::new(),
            log_panel: LogPanelState::default(),
            history: None,
            ai_open: false,
            ai_scroll: 0,
            menu_loading: false,
            toast_since: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Release events let us drop key-up noise on terminals that send it
        execute!(
            stdout(),
            Hide,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (hidden cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, Show);
    }
}

/// Everything background work and effect handling needs besides `App`.
struct Runtime {
    backend: Arc<dyn WorkoutBackend>,
    tx: mpsc::Sender<Action>,
    notifier: Notifier,
    snapshot_path: Option<PathBuf>,
    sync_timeout: Duration,
    default_rest_secs: u32,
}

impl Runtime {
    fn persist(&self, app: &App) {
        if let Some(path) = &self.snapshot_path {
            snapshot::persist(app, path);
        }
    }

    fn send(tx: &mpsc::Sender<Action>, action: Action) {
        if tx.send(action).is_err() {
            warn!("Failed to deliver background result: receiver dropped");
        }
    }

    fn spawn_sync(&self, set: WorkoutSet) {
        info!("Syncing set {} ({})", set.timestamp, set.exercise_id);
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        let timeout = self.sync_timeout;
        tokio::spawn(async move {
            let outcome = engine::sync_set(backend.as_ref(), &set, timeout).await;
            Self::send(&tx, Action::SetSynced {
                set,
                outcome,
                at: Utc::now(),
            });
        });
    }

    fn spawn_menu_load(&self, user_id: String, request: MenuRequest) {
        info!("Loading menu for {:?}", request);
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        let rest_secs = self.default_rest_secs;
        tokio::spawn(async move {
            let menu = engine::load_menu(backend.as_ref(), &user_id, request).await;
            Self::send(&tx, Action::StartMenu(engine::fill_default_rest(menu, rest_secs)));
        });
    }

    fn spawn_edit(&self, edit: LogEdit) {
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = engine::send_edit(backend.as_ref(), &edit).await;
            Self::send(&tx, Action::EditResolved { edit, result });
        });
    }

    fn spawn_history_load(&self, user_id: String) {
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            match backend.fetch_history(&user_id).await {
                Ok(history) => Self::send(&tx, Action::HistoryLoaded(history)),
                Err(e) => warn!("History load failed, keeping local copy: {}", e),
            }
        });
    }

    fn spawn_ai(&self, user_id: String, call: AiCall) {
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let body = backend.ai(call, &user_id).await.map_err(|e| e.to_string());
            Self::send(&tx, Action::AiResponse { call, body });
        });
    }

    fn spawn_prime_menus(&self, user_id: String) {
        let backend = self.backend.clone();
        tokio::spawn(async move {
            engine::prime_menus(backend.as_ref(), &user_id).await;
        });
    }

    /// Carries out an effect. Returns true when the app should quit.
    fn handle_effect(&self, app: &App, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::Persist => self.persist(app),
            Effect::SyncSet(set) => self.spawn_sync(set),
            Effect::SetRecorded { synced } => {
                self.persist(app);
                self.notifier
                    .pulse(if synced { Pulse::Short } else { Pulse::Long });
            }
            Effect::RestExpired => {
                self.persist(app);
                self.notifier.rest_complete(app.is_session_complete());
                if app.is_session_complete() {
                    self.spawn_prime_menus(app.user_id.clone());
                }
            }
            Effect::SessionComplete => {
                self.persist(app);
                self.spawn_prime_menus(app.user_id.clone());
            }
            Effect::PatchLog(set) => self.spawn_edit(LogEdit::Update(set)),
            Effect::RemoveLog(set) => self.spawn_edit(LogEdit::Delete(set)),
            Effect::FetchAi(call) => self.spawn_ai(app.user_id.clone(), call),
            Effect::Quit => return true,
        }
        false
    }

    fn dispatch(&self, app: &mut App, action: Action) -> bool {
        let effect = update(app, action);
        self.handle_effect(app, effect)
    }
}

/// Restores the local snapshot into a fresh `App`.
fn restore_app(user_id: String, path: Option<&PathBuf>) -> App {
    let mut app = App::new(user_id);
    let Some(path) = path else {
        return app;
    };
    match snapshot::load_snapshot(path) {
        Ok(snap) => {
            snap.restore(&mut app, Utc::now());
            info!(
                "Restored {} local sets (active session: {})",
                app.history.len(),
                app.session.is_some()
            );
        }
        Err(e) => warn!("Ignoring unreadable snapshot {}: {}", path.display(), e),
    }
    app
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend: Arc<dyn WorkoutBackend> = Arc::new(HttpBackend::new(
        &config.api_base_url,
        config.api_token.clone(),
    ));
    let snapshot_path = match snapshot::snapshot_path() {
        Ok(path) => Some(path),
        Err(e) => {
            warn!("No snapshot location, running without local persistence: {}", e);
            None
        }
    };

    let mut app = restore_app(config.user_id.clone(), snapshot_path.as_ref());
    let mut tui = TuiState::new();

    let (tx, rx) = mpsc::channel();
    let runtime = Runtime {
        backend,
        tx,
        notifier: Notifier::from_config(&config),
        snapshot_path,
        sync_timeout: config.sync_timeout,
        default_rest_secs: config.default_rest_secs,
    };
    runtime.spawn_history_load(app.user_id.clone());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut should_quit = false;
    while !should_quit {
        if let Some(session) = &app.session
            && let Some(exercise) = session.current_exercise()
        {
            tui.log_panel
                .sync(session.exercise_index, exercise.reps, session.resting);
        } else {
            tui.log_panel.reset();
        }
        expire_toast(&mut app, &mut tui);

        let now = Utc::now();
        terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, now))?;

        let first_event = poll_event_timeout(TICK_INTERVAL);
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(event, &mut app, &mut tui, &runtime) {
                should_quit = true;
                break;
            }
        }

        // Background results
        while let Ok(action) = rx.try_recv() {
            debug!("Event loop received: {:?}", action);
            note_background_action(&mut tui, &action);
            if runtime.dispatch(&mut app, action) {
                should_quit = true;
            }
        }

        runtime.dispatch(&mut app, Action::Tick(Utc::now()));
    }

    runtime.persist(&app);
    ratatui::restore();
    Ok(())
}

/// A freshly loaded menu starts from a clean log panel, even when it lands on
/// the same exercise index as the previous session.
fn note_background_action(tui: &mut TuiState, action: &Action) {
    if matches!(action, Action::StartMenu(_)) {
        tui.menu_loading = false;
        tui.log_panel.reset();
    }
}

fn expire_toast(app: &mut App, tui: &mut TuiState) {
    match (app.toast.is_some(), tui.toast_since) {
        (false, _) => tui.toast_since = None,
        (true, None) => tui.toast_since = Some(Instant::now()),
        (true, Some(since)) if since.elapsed() >= TOAST_TTL => {
            update(app, Action::DismissToast);
            tui.toast_since = None;
        }
        _ => {}
    }
}

/// Routes one terminal event. Returns true when the app should quit.
fn handle_event(event: TuiEvent, app: &mut App, tui: &mut TuiState, runtime: &Runtime) -> bool {
    match event {
        TuiEvent::ForceQuit => return true,
        TuiEvent::Resize => return false,
        _ => {}
    }

    // Overlays take every key while open
    if let Some(history) = tui.history.as_mut() {
        match history.handle_event(&event) {
            Some(HistoryEvent::Dismiss) => tui.history = None,
            Some(HistoryEvent::Refresh) => runtime.spawn_history_load(app.user_id.clone()),
            Some(HistoryEvent::Update(set)) => return runtime.dispatch(app, Action::UpdateLog(set)),
            Some(HistoryEvent::Delete(set)) => return runtime.dispatch(app, Action::DeleteLog(set)),
            None => {}
        }
        return false;
    }
    if tui.ai_open {
        match event {
            TuiEvent::Escape => tui.ai_open = false,
            TuiEvent::CursorUp => tui.ai_scroll = tui.ai_scroll.saturating_sub(1),
            TuiEvent::CursorDown => tui.ai_scroll = tui.ai_scroll.saturating_add(1),
            TuiEvent::InputChar(c) => {
                if let Some(call) = ai_call_for_key(c) {
                    tui.ai_scroll = 0;
                    return runtime.dispatch(app, Action::RequestAi(call));
                }
            }
            _ => {}
        }
        return false;
    }

    // Global keys
    match event {
        TuiEvent::InputChar('q') => return runtime.dispatch(app, Action::Quit),
        TuiEvent::InputChar('h') => {
            tui.history = Some(HistoryListState::new(&app.history));
            return false;
        }
        TuiEvent::InputChar('a') => {
            tui.ai_open = true;
            return false;
        }
        TuiEvent::Escape => return runtime.dispatch(app, Action::DismissToast),
        _ => {}
    }

    let in_workout = app.session.as_ref().is_some_and(|s| !s.complete);
    if in_workout {
        let Some(panel_event) = tui.log_panel.handle_event(&event) else {
            return false;
        };
        let action = match panel_event {
            LogPanelEvent::Log { reps, rpe } => Action::LogSet {
                reps,
                rpe,
                at: Utc::now(),
            },
            LogPanelEvent::AdjustWeight(delta) => Action::AdjustWeight(delta),
            LogPanelEvent::FinishRest => Action::FinishRest,
            LogPanelEvent::SkipExercise => Action::SkipExercise,
            LogPanelEvent::FinishSession => Action::FinishSession,
        };
        return runtime.dispatch(app, action);
    }

    if !tui.menu_loading
        && let Some(MenuPickerEvent::Select(request)) = tui.menu_picker.handle_event(&event)
    {
        tui.menu_loading = true;
        app.status_message = "Loading menu...".to_string();
        runtime.spawn_menu_load(app.user_id.clone(), request);
    }
    false
}

fn ai_call_for_key(c: char) -> Option<AiCall> {
    match c {
        'a' => Some(AiCall::Recommend),
        'g' => Some(AiCall::AnalyzeGrowth),
        'i' => Some(AiCall::Info),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{menu_with_sets, t0};

    #[test]
    fn test_ai_keys() {
        assert_eq!(ai_call_for_key('a'), Some(AiCall::Recommend));
        assert_eq!(ai_call_for_key('g'), Some(AiCall::AnalyzeGrowth));
        assert_eq!(ai_call_for_key('x'), None);
    }

    #[test]
    fn test_new_menu_resets_carried_reps() {
        let mut tui = TuiState::default();
        tui.menu_loading = true;
        tui.log_panel.sync(0, 8, false);
        tui.log_panel.reps = 3;

        note_background_action(&mut tui, &Action::StartMenu(menu_with_sets(&[3])));
        tui.log_panel.sync(0, 12, false);

        assert!(!tui.menu_loading);
        assert_eq!(tui.log_panel.reps, 12);
    }

    #[test]
    fn test_other_background_actions_keep_panel() {
        let mut tui = TuiState::default();
        tui.log_panel.sync(0, 8, false);
        tui.log_panel.reps = 5;

        note_background_action(&mut tui, &Action::Tick(t0()));
        tui.log_panel.sync(0, 8, false);

        assert_eq!(tui.log_panel.reps, 5);
    }

    #[test]
    fn test_restore_without_path_is_fresh() {
        let app = restore_app("alice".into(), None);
        assert_eq!(app.user_id, "alice");
        assert!(app.history.is_empty());
    }
}
