use std::fmt;

use async_trait::async_trait;

use super::types::{AiCall, WorkoutSet};
use crate::core::menu::{BodyPart, Menu};

/// Errors that can occur talking to the logging backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Backend misconfigured (bad base URL, unusable token). Not retryable.
    Config(String),
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// The request did not finish inside the client timeout.
    Timeout,
    /// Backend answered with a non-2xx status.
    Api { status: u16, message: String },
    /// Response body did not match the expected shape.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Timeout => write!(f, "request timed out"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Which generated menus to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRequest {
    Duration(u32),
    BodyPart(BodyPart),
}

/// The remote side of the workout log. One implementation talks HTTP;
/// tests substitute their own.
#[async_trait]
pub trait WorkoutBackend: Send + Sync {
    /// `POST /log`
    async fn post_log(&self, set: &WorkoutSet) -> Result<(), ApiError>;

    /// `PATCH /log`, keyed by `set.timestamp`.
    async fn patch_log(&self, set: &WorkoutSet) -> Result<(), ApiError>;

    /// `DELETE /log`, keyed by `set.timestamp`.
    async fn delete_log(&self, set: &WorkoutSet) -> Result<(), ApiError>;

    /// `POST /stats/history`: every set the server knows for this user.
    async fn fetch_history(&self, user_id: &str) -> Result<Vec<WorkoutSet>, ApiError>;

    /// `POST /menus/by-duration` or `/menus/by-body-part`.
    async fn fetch_menus(&self, user_id: &str, request: MenuRequest)
    -> Result<Vec<Menu>, ApiError>;

    /// One of the opaque AI calls. Returns the response body as display text.
    async fn ai(&self, call: AiCall, user_id: &str) -> Result<String, ApiError>;
}
