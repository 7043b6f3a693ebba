//! # Menus
//!
//! A menu is the ordered list of exercises one session walks through.
//! Menus come from the generation service; when it is unreachable or has
//! nothing for us, a static fallback table stands in.

use serde::{Deserialize, Serialize};

/// Sets per exercise when a menu leaves it at zero.
pub const DEFAULT_SETS: u32 = 3;
/// Rest between sets when a menu leaves it at zero.
pub const DEFAULT_REST_SECS: u32 = 90;
/// Starting weight when the first exercise has no recommendation.
pub const DEFAULT_WEIGHT: f32 = 20.0;

/// Session lengths offered by the duration picker, in minutes.
pub const DURATION_CHOICES: [u32; 4] = [15, 30, 45, 60];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BodyPart {
    Push,
    Pull,
    Legs,
}

impl BodyPart {
    pub const ALL: [BodyPart; 3] = [BodyPart::Push, BodyPart::Pull, BodyPart::Legs];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyPart::Push => "push",
            BodyPart::Pull => "pull",
            BodyPart::Legs => "legs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BodyPart::Push => "Push",
            BodyPart::Pull => "Pull",
            BodyPart::Legs => "Legs",
        }
    }

    /// Muscles the day targets, shown under the picker entry.
    pub fn description(&self) -> &'static str {
        match self {
            BodyPart::Push => "chest / shoulders / triceps",
            BodyPart::Pull => "back / biceps",
            BodyPart::Legs => "legs / core / shoulders",
        }
    }
}

/// One exercise slot inside a menu.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuExercise {
    pub exercise_name: String,
    #[serde(default)]
    pub sets: u32,
    #[serde(default)]
    pub reps: u32,
    #[serde(default)]
    pub recommended_weight: f32,
    #[serde(default)]
    pub rest_seconds: u32,
    /// Free-text form cue.
    #[serde(default)]
    pub notes: String,
}

impl MenuExercise {
    pub fn target_sets(&self) -> u32 {
        if self.sets == 0 { DEFAULT_SETS } else { self.sets }
    }

    pub fn rest_secs(&self) -> u32 {
        if self.rest_seconds == 0 {
            DEFAULT_REST_SECS
        } else {
            self.rest_seconds
        }
    }
}

/// An ordered exercise menu. Timed menus carry `duration_minutes`; endless
/// ones don't.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    #[serde(default)]
    pub name: String,
    pub body_part: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    pub exercises: Vec<MenuExercise>,
    /// Empty for the static fallback tables.
    #[serde(default)]
    pub generated_at: String,
}

impl Menu {
    pub fn is_generated(&self) -> bool {
        !self.generated_at.is_empty()
    }

    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(MenuExercise::target_sets).sum()
    }

    /// Heading for the workout screen.
    pub fn title(&self) -> String {
        if !self.name.is_empty() {
            return self.name.clone();
        }
        match self.duration_minutes {
            Some(minutes) => format!("{} {} min", capitalize(&self.body_part), minutes),
            None => format!("{} Day", capitalize(&self.body_part)),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ── Fallback tables ─────────────────────────────────────────────────────────

struct Slot {
    name: &'static str,
    notes: &'static str,
    sets: u32,
    weight: f32,
}

static PUSH: [Slot; 4] = [
    Slot { name: "Incline Press", notes: "30 degrees / pin the shoulder blades", sets: 3, weight: 24.0 },
    Slot { name: "Shoulder Press", notes: "upright bench / lower to the ears", sets: 3, weight: 16.0 },
    Slot { name: "Triceps Extension", notes: "lock the elbows / feel the stretch", sets: 3, weight: 12.0 },
    Slot { name: "Side Raise", notes: "pinky side up / no swinging", sets: 3, weight: 8.0 },
];

static PULL: [Slot; 4] = [
    Slot { name: "One-Arm Row", notes: "drive with the lats / full squeeze", sets: 3, weight: 20.0 },
    Slot { name: "Deadlift", notes: "long spine / stretch the hamstrings", sets: 3, weight: 32.0 },
    Slot { name: "Hammer Curl", notes: "still forearm / slow negative", sets: 3, weight: 12.0 },
    Slot { name: "Face Pull", notes: "pull to face height / retract", sets: 3, weight: 10.0 },
];

static LEGS: [Slot; 4] = [
    Slot { name: "Goblet Squat", notes: "sit deep / brace the core", sets: 4, weight: 24.0 },
    Slot { name: "Lunge", notes: "straight down / weight on the front foot", sets: 3, weight: 18.0 },
    Slot { name: "Calf Raise", notes: "pause on the toes / full stretch", sets: 3, weight: 20.0 },
    Slot { name: "Upright Row", notes: "elbows high / pull to the chin", sets: 3, weight: 14.0 },
];

fn slots(part: BodyPart) -> &'static [Slot; 4] {
    match part {
        BodyPart::Push => &PUSH,
        BodyPart::Pull => &PULL,
        BodyPart::Legs => &LEGS,
    }
}

fn to_exercise(slot: &Slot) -> MenuExercise {
    MenuExercise {
        exercise_name: slot.name.to_string(),
        sets: slot.sets,
        reps: 10,
        recommended_weight: slot.weight,
        rest_seconds: DEFAULT_REST_SECS,
        notes: slot.notes.to_string(),
    }
}

/// Static menu for a body part.
pub fn fallback_for_body_part(part: BodyPart) -> Menu {
    Menu {
        name: format!("{} Day", part.label()),
        body_part: part.as_str().to_string(),
        duration_minutes: None,
        exercises: slots(part).iter().map(to_exercise).collect(),
        generated_at: String::new(),
    }
}

/// Static full-body menu sized to a session length: one exercise per ten
/// minutes, at least two and at most six, alternating push / pull / legs.
pub fn fallback_for_duration(minutes: u32) -> Menu {
    let count = (minutes / 10).clamp(2, 6) as usize;
    let exercises = (0..count)
        .map(|i| {
            let part = BodyPart::ALL[i % BodyPart::ALL.len()];
            to_exercise(&slots(part)[i / BodyPart::ALL.len()])
        })
        .collect();
    Menu {
        name: format!("Full Body {} min", minutes),
        body_part: "full".to_string(),
        duration_minutes: Some(minutes),
        exercises,
        generated_at: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_body_part_menus_are_static() {
        for part in BodyPart::ALL {
            let menu = fallback_for_body_part(part);
            assert_eq!(menu.body_part, part.as_str());
            assert_eq!(menu.exercises.len(), 4);
            assert!(!menu.is_generated());
        }
    }

    #[test]
    fn test_fallback_legs_starts_with_four_sets() {
        let menu = fallback_for_body_part(BodyPart::Legs);
        assert_eq!(menu.exercises[0].target_sets(), 4);
        assert_eq!(menu.total_sets(), 13);
    }

    #[test]
    fn test_fallback_duration_scales_exercise_count() {
        assert_eq!(fallback_for_duration(15).exercises.len(), 2);
        assert_eq!(fallback_for_duration(30).exercises.len(), 3);
        assert_eq!(fallback_for_duration(45).exercises.len(), 4);
        assert_eq!(fallback_for_duration(60).exercises.len(), 6);
        assert_eq!(fallback_for_duration(200).exercises.len(), 6);
    }

    #[test]
    fn test_fallback_duration_alternates_body_parts() {
        let menu = fallback_for_duration(60);
        let names: Vec<&str> = menu.exercises.iter().map(|e| e.exercise_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Incline Press", "One-Arm Row", "Goblet Squat", "Shoulder Press", "Deadlift", "Lunge"]
        );
        assert_eq!(menu.duration_minutes, Some(60));
    }

    #[test]
    fn test_zero_sets_and_rest_fall_back_to_defaults() {
        let exercise = MenuExercise {
            exercise_name: "Plank".into(),
            sets: 0,
            reps: 0,
            recommended_weight: 0.0,
            rest_seconds: 0,
            notes: String::new(),
        };
        assert_eq!(exercise.target_sets(), DEFAULT_SETS);
        assert_eq!(exercise.rest_secs(), DEFAULT_REST_SECS);
    }

    #[test]
    fn test_generated_menu_parses_sparse_json() {
        let json = r#"{
            "bodyPart": "push",
            "durationMinutes": 30,
            "exercises": [{"exerciseName": "Press", "sets": 3, "reps": 8, "recommendedWeight": 22.5, "restSeconds": 60}],
            "generatedAt": "2026-01-23T08:00:00Z"
        }"#;
        let menu: Menu = serde_json::from_str(json).unwrap();
        assert!(menu.is_generated());
        assert_eq!(menu.exercises[0].recommended_weight, 22.5);
        assert_eq!(menu.exercises[0].notes, "");
        assert_eq!(menu.title(), "Push 30 min");
    }
}
