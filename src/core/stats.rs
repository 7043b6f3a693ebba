//! # Stats
//!
//! Trend numbers derived from history: training volume per day and the
//! best estimated one-rep max per day. Days are UTC calendar days.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::api::WorkoutSet;

/// How many training days the trend views show.
pub const TREND_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct DayPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Brzycki estimate: `w × 36 / (37 − reps)`. Most accurate at ten reps or fewer.
pub fn brzycki_1rm(weight: f64, reps: u32) -> f64 {
    match reps {
        0 => 0.0,
        1 => weight,
        // the formula blows up at 37 reps; anything that high is endurance work
        r if r >= 37 => weight,
        r => weight * (36.0 / (37.0 - f64::from(r))),
    }
}

/// Epley estimate: `w × (1 + reps / 30)`.
pub fn epley_1rm(weight: f64, reps: u32) -> f64 {
    weight * (1.0 + f64::from(reps) / 30.0)
}

fn by_day<F>(history: &[WorkoutSet], mut fold: F) -> BTreeMap<NaiveDate, f64>
where
    F: FnMut(&mut f64, &WorkoutSet),
{
    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for set in history {
        let Some(at) = set.logged_at() else {
            continue;
        };
        fold(days.entry(at.date_naive()).or_insert(0.0), set);
    }
    days
}

fn last_days(days: BTreeMap<NaiveDate, f64>, count: usize) -> Vec<DayPoint> {
    let skip = days.len().saturating_sub(count);
    days.into_iter()
        .skip(skip)
        .map(|(date, value)| DayPoint { date, value })
        .collect()
}

/// Σ weight × reps per day, for the last `count` days that have sets.
pub fn daily_volume(history: &[WorkoutSet], count: usize) -> Vec<DayPoint> {
    last_days(by_day(history, |total, set| *total += set.volume()), count)
}

/// Best Epley 1RM per day (one decimal), for the last `count` days that have sets.
pub fn one_rm_trend(history: &[WorkoutSet], count: usize) -> Vec<DayPoint> {
    let days = by_day(history, |best, set| {
        let estimate = (epley_1rm(f64::from(set.weight), set.reps) * 10.0).round() / 10.0;
        if estimate > *best {
            *best = estimate;
        }
    });
    last_days(days, count)
}

/// Most recent set logged for `exercise`, e.g. for a "last time" hint.
pub fn last_set_for<'a>(history: &'a [WorkoutSet], exercise: &str) -> Option<&'a WorkoutSet> {
    history.iter().rev().find(|s| s.exercise_id == exercise)
}
