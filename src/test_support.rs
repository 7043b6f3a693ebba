//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::api::{AiCall, ApiError, MenuRequest, RpeLevel, WorkoutBackend, WorkoutSet};
use crate::core::menu::{Menu, MenuExercise};
use crate::core::state::App;

/// Creates a test App for user "tester".
pub fn test_app() -> App {
    App::new("tester".to_string())
}

/// Fixed instant all timer tests count from.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 23, 9, 0, 0).unwrap()
}

/// A menu whose exercise `i` has `sets[i]` sets, 20kg, 60s rest.
pub fn menu_with_sets(sets: &[u32]) -> Menu {
    Menu {
        name: String::new(),
        body_part: "push".into(),
        duration_minutes: None,
        exercises: sets
            .iter()
            .enumerate()
            .map(|(i, &sets)| MenuExercise {
                exercise_name: format!("Exercise {}", i + 1),
                sets,
                reps: 10,
                recommended_weight: 20.0,
                rest_seconds: 60,
                notes: String::new(),
            })
            .collect(),
        generated_at: String::new(),
    }
}

pub fn sample_set(timestamp: &str, weight: f32, reps: u32) -> WorkoutSet {
    WorkoutSet {
        user_id: "tester".into(),
        timestamp: timestamp.into(),
        exercise_id: "Incline Press".into(),
        weight,
        reps,
        rpe: RpeLevel::Just,
    }
}

/// In-memory backend. `fail` makes every call return a 503.
#[derive(Default)]
pub struct FakeBackend {
    pub fail: bool,
    pub menus: Vec<Menu>,
    pub posted: Mutex<Vec<WorkoutSet>>,
    pub history: Mutex<Vec<WorkoutSet>>,
}

impl FakeBackend {
    fn check(&self) -> Result<(), ApiError> {
        if self.fail {
            Err(ApiError::Api {
                status: 503,
                message: "unavailable".into(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl WorkoutBackend for FakeBackend {
    async fn post_log(&self, set: &WorkoutSet) -> Result<(), ApiError> {
        self.check()?;
        self.posted.lock().unwrap().push(set.clone());
        self.history.lock().unwrap().push(set.clone());
        Ok(())
    }

    async fn patch_log(&self, set: &WorkoutSet) -> Result<(), ApiError> {
        self.check()?;
        let mut history = self.history.lock().unwrap();
        for existing in history.iter_mut().filter(|s| s.timestamp == set.timestamp) {
            *existing = set.clone();
        }
        Ok(())
    }

    async fn delete_log(&self, set: &WorkoutSet) -> Result<(), ApiError> {
        self.check()?;
        self.history
            .lock()
            .unwrap()
            .retain(|s| s.timestamp != set.timestamp);
        Ok(())
    }

    async fn fetch_history(&self, _user_id: &str) -> Result<Vec<WorkoutSet>, ApiError> {
        self.check()?;
        Ok(self.history.lock().unwrap().clone())
    }

    async fn fetch_menus(
        &self,
        _user_id: &str,
        _request: MenuRequest,
    ) -> Result<Vec<Menu>, ApiError> {
        self.check()?;
        Ok(self.menus.clone())
    }

    async fn ai(&self, call: AiCall, _user_id: &str) -> Result<String, ApiError> {
        self.check()?;
        Ok(format!("{} ok", call.title()))
    }
}
