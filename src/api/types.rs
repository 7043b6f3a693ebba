use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Perceived exertion for a single set.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RpeLevel {
    /// Plenty left in the tank
    Easy,
    /// Just right
    Just,
    /// Nothing left
    Limit,
}

impl RpeLevel {
    pub const ALL: [RpeLevel; 3] = [RpeLevel::Easy, RpeLevel::Just, RpeLevel::Limit];

    pub fn label(&self) -> &'static str {
        match self {
            RpeLevel::Easy => "easy",
            RpeLevel::Just => "just",
            RpeLevel::Limit => "limit",
        }
    }
}

/// One logged set. `timestamp` doubles as the record key on the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutSet {
    pub user_id: String,
    pub timestamp: String,
    pub exercise_id: String,
    pub weight: f32,
    pub reps: u32,
    pub rpe: RpeLevel,
}

impl WorkoutSet {
    /// weight × reps, the unit of training volume.
    pub fn volume(&self) -> f64 {
        f64::from(self.weight) * f64::from(self.reps)
    }

    /// Parsed `timestamp`, or `None` if the server handed back something odd.
    pub fn logged_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Formats a timestamp the way the logging API keys records:
/// `2026-01-23T09:15:00.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Body shared by the AI and history endpoints.
#[derive(Serialize, Debug)]
pub struct UserRequest<'a> {
    pub user_id: &'a str,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DurationMenuRequest<'a> {
    pub user_id: &'a str,
    pub duration_minutes: u32,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BodyPartMenuRequest<'a> {
    pub user_id: &'a str,
    pub body_part: &'a str,
}

/// The delegated AI calls. Their responses are shown verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiCall {
    Recommend,
    GenerateMenus,
    AnalyzeGrowth,
    Info,
}

impl AiCall {
    pub fn path(&self) -> &'static str {
        match self {
            AiCall::Recommend => "/ai/recommend",
            AiCall::GenerateMenus => "/ai/generate-menus",
            AiCall::AnalyzeGrowth => "/ai/analyze-growth",
            AiCall::Info => "/ai/info",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AiCall::Recommend => "AI Recommendation",
            AiCall::GenerateMenus => "Menu Generation",
            AiCall::AnalyzeGrowth => "Growth Analysis",
            AiCall::Info => "AI Service",
        }
    }
}
