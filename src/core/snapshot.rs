//! # Local Snapshot
//!
//! Mirror of the in-memory state at `~/.liftlog/state.json`: history plus
//! the rest timer and session cursor, so a crashed or suspended client can
//! pick up mid-workout. The remote log stays the source of truth; this is a
//! resume hint.
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`) for crash safety.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::api::WorkoutSet;
use crate::api::types::format_timestamp;
use crate::core::menu::DEFAULT_REST_SECS;
use crate::core::state::App;
use crate::core::timer::RestTimer;
use crate::core::workout::SessionState;

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalSnapshot {
    #[serde(default)]
    pub history: Vec<WorkoutSet>,
    #[serde(default)]
    pub rest_start_time: Option<String>,
    #[serde(default)]
    pub is_resting: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_duration_secs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_session: Option<SessionState>,
}

impl LocalSnapshot {
    pub fn capture(app: &App) -> Self {
        let rest = app
            .session
            .as_ref()
            .and_then(|s| if s.resting { s.rest } else { None });
        Self {
            history: app.history.clone(),
            rest_start_time: rest.map(|r| format_timestamp(r.started_at)),
            is_resting: rest.is_some(),
            rest_duration_secs: rest.map(|r| r.duration_secs),
            active_session: app.session.clone(),
        }
    }

    /// Loads history and the session cursor into `app`. A rest in progress
    /// keeps its original start time, so the countdown reflects the time
    /// spent away; a rest without a readable start time restarts at `now`.
    pub fn restore(self, app: &mut App, now: DateTime<Utc>) {
        app.history = self.history;
        let Some(mut session) = self.active_session else {
            return;
        };
        if !session.is_consistent() {
            warn!(
                "Discarding saved session with an invalid cursor (exercise {}, set {}, {} exercises)",
                session.exercise_index,
                session.current_set,
                session.menu.exercises.len()
            );
            return;
        }
        if self.is_resting && !session.complete {
            let started_at = self
                .rest_start_time
                .as_deref()
                .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or(now);
            let duration = self.rest_duration_secs.unwrap_or(DEFAULT_REST_SECS);
            session.resting = true;
            session.rest = Some(RestTimer::start(duration, started_at));
        } else {
            session.resting = false;
            session.rest = None;
        }
        info!(
            "Resumed session '{}' at exercise {} set {} (resting={})",
            session.menu.title(),
            session.exercise_index + 1,
            session.current_set,
            session.resting
        );
        app.session = Some(session);
    }
}

/// Returns `~/.liftlog/`, creating it if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
    let dir = home.join(".liftlog");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn snapshot_path() -> io::Result<PathBuf> {
    Ok(data_dir()?.join("state.json"))
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

pub fn save_snapshot(path: &Path, snapshot: &LocalSnapshot) -> io::Result<()> {
    atomic_write_json(path, snapshot)
}

/// Missing file = empty snapshot.
pub fn load_snapshot(path: &Path) -> io::Result<LocalSnapshot> {
    if !path.exists() {
        return Ok(LocalSnapshot::default());
    }
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Fire-and-forget mirror of `app`. Failures are logged, never surfaced.
pub fn persist(app: &App, path: &Path) {
    match save_snapshot(path, &LocalSnapshot::capture(app)) {
        Ok(()) => debug!("Snapshot saved: {} sets", app.history.len()),
        Err(e) => warn!("Failed to save snapshot to {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::workout::{apply_log_set, start_menu};
    use crate::test_support::{menu_with_sets, sample_set, t0, test_app};
    use chrono::Duration;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("liftlog-test-{}-{}", std::process::id(), name));
        fs::create_dir_all(&dir).unwrap();
        dir.join("state.json")
    }

    fn resting_app() -> App {
        let mut app = test_app();
        let session = start_menu(menu_with_sets(&[3])).unwrap();
        let set = sample_set("2026-01-23T09:00:00.000Z", 20.0, 10);
        app.session = Some(apply_log_set(&session, &set, t0()));
        app.history.push(set);
        app
    }

    #[test]
    fn test_capture_records_rest_timer() {
        let snapshot = LocalSnapshot::capture(&resting_app());
        assert!(snapshot.is_resting);
        assert_eq!(snapshot.rest_start_time.as_deref(), Some("2026-01-23T09:00:00.000Z"));
        assert_eq!(snapshot.rest_duration_secs, Some(60));
        assert_eq!(snapshot.history.len(), 1);
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let json = serde_json::to_value(LocalSnapshot::capture(&resting_app())).unwrap();
        assert!(json.get("restStartTime").is_some());
        assert!(json.get("isResting").is_some());
        assert!(json.get("activeSession").is_some());
    }

    #[test]
    fn test_restore_recomputes_rest_from_wall_clock() {
        let snapshot = LocalSnapshot::capture(&resting_app());
        let mut app = test_app();
        let resumed_at = t0() + Duration::seconds(45);
        snapshot.restore(&mut app, resumed_at);

        let rest = app.session.as_ref().and_then(|s| s.rest).unwrap();
        assert_eq!(rest.remaining(resumed_at), 15);
        assert!(app.is_resting());
        assert_eq!(app.history.len(), 1);
    }

    #[test]
    fn test_restore_without_start_time_restarts_rest() {
        let mut snapshot = LocalSnapshot::capture(&resting_app());
        snapshot.rest_start_time = Some("garbage".into());
        let mut app = test_app();
        let now = t0() + Duration::seconds(500);
        snapshot.restore(&mut app, now);
        let rest = app.session.as_ref().and_then(|s| s.rest).unwrap();
        assert_eq!(rest.remaining(now), 60);
    }

    #[test]
    fn test_old_snapshot_without_session_restores_history_only() {
        let json = r#"{"history": [], "restStartTime": null, "isResting": false}"#;
        let snapshot: LocalSnapshot = serde_json::from_str(json).unwrap();
        let mut app = test_app();
        snapshot.restore(&mut app, t0());
        assert!(app.session.is_none());
    }

    #[test]
    fn test_restore_drops_out_of_range_cursor() {
        for (exercise_index, current_set) in [(0, 0), (0, 4), (5, 1)] {
            let mut snapshot = LocalSnapshot::capture(&resting_app());
            if let Some(session) = snapshot.active_session.as_mut() {
                session.exercise_index = exercise_index;
                session.current_set = current_set;
            }
            let mut app = test_app();
            snapshot.restore(&mut app, t0());
            assert!(app.session.is_none(), "cursor ({exercise_index}, {current_set}) kept");
            assert_eq!(app.history.len(), 1);
        }
    }

    #[test]
    fn test_restore_drops_empty_menu() {
        let mut snapshot = LocalSnapshot::capture(&resting_app());
        if let Some(session) = snapshot.active_session.as_mut() {
            session.menu.exercises.clear();
        }
        let mut app = test_app();
        snapshot.restore(&mut app, t0());
        assert!(app.session.is_none());
    }

    #[test]
    fn test_save_and_load_file() {
        let path = temp_path("save-load");
        let app = resting_app();
        persist(&app, &path);

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.history, app.history);
        assert_eq!(loaded.rest_start_time.as_deref(), Some("2026-01-23T09:00:00.000Z"));
        let session = loaded.active_session.unwrap();
        assert_eq!(session.total_volume, 200.0);
        assert!(session.rest.is_none());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let path = temp_path("missing").with_file_name("nope.json");
        assert_eq!(load_snapshot(&path).unwrap(), LocalSnapshot::default());
    }

    #[test]
    fn test_load_corrupt_file_is_invalid_data() {
        let path = temp_path("corrupt");
        fs::write(&path, "{not json").unwrap();
        let err = load_snapshot(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
