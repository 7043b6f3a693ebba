//! HTTP implementation of [`WorkoutBackend`] against the logging API.
//!
//! Every call carries `Authorization: Bearer <token>` when a token is
//! configured. Any non-2xx status is an [`ApiError::Api`].

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;

use super::backend::{ApiError, MenuRequest, WorkoutBackend};
use super::types::{AiCall, BodyPartMenuRequest, DurationMenuRequest, UserRequest, WorkoutSet};
use crate::core::menu::Menu;

pub struct HttpBackend {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and turns transport failures and non-2xx statuses into `ApiError`.
    async fn send(&self, builder: RequestBuilder, what: &str) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else if e.is_builder() {
                ApiError::Config(e.to_string())
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        debug!("{} response status: {}", what, response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("{} failed: {} - {}", what, status, message);
            return Err(ApiError::Api { status, message });
        }
        Ok(response)
    }

    async fn send_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &T,
    ) -> Result<Response, ApiError> {
        let what = format!("{} {}", method, path);
        self.send(self.request(method, path).json(body), &what).await
    }
}

/// Pretty-prints JSON bodies; anything else is passed through untouched.
fn display_body(body: String) -> String {
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or(body),
        Err(_) => body,
    }
}

#[async_trait]
impl WorkoutBackend for HttpBackend {
    async fn post_log(&self, set: &WorkoutSet) -> Result<(), ApiError> {
        info!(
            "POST /log: exercise={}, weight={}, reps={}, ts={}",
            set.exercise_id, set.weight, set.reps, set.timestamp
        );
        self.send_json(Method::POST, "/log", set).await?;
        Ok(())
    }

    async fn patch_log(&self, set: &WorkoutSet) -> Result<(), ApiError> {
        info!("PATCH /log: ts={}", set.timestamp);
        self.send_json(Method::PATCH, "/log", set).await?;
        Ok(())
    }

    async fn delete_log(&self, set: &WorkoutSet) -> Result<(), ApiError> {
        info!("DELETE /log: ts={}", set.timestamp);
        self.send_json(Method::DELETE, "/log", set).await?;
        Ok(())
    }

    async fn fetch_history(&self, user_id: &str) -> Result<Vec<WorkoutSet>, ApiError> {
        let response = self
            .send_json(Method::POST, "/stats/history", &UserRequest { user_id })
            .await?;
        let history: Vec<WorkoutSet> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        info!("Fetched {} sets of history", history.len());
        Ok(history)
    }

    async fn fetch_menus(
        &self,
        user_id: &str,
        request: MenuRequest,
    ) -> Result<Vec<Menu>, ApiError> {
        let response = match request {
            MenuRequest::Duration(duration_minutes) => {
                let body = DurationMenuRequest {
                    user_id,
                    duration_minutes,
                };
                self.send_json(Method::POST, "/menus/by-duration", &body)
                    .await?
            }
            MenuRequest::BodyPart(part) => {
                let body = BodyPartMenuRequest {
                    user_id,
                    body_part: part.as_str(),
                };
                self.send_json(Method::POST, "/menus/by-body-part", &body)
                    .await?
            }
        };
        let menus: Vec<Menu> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        debug!("Fetched {} menus for {:?}", menus.len(), request);
        Ok(menus)
    }

    async fn ai(&self, call: AiCall, user_id: &str) -> Result<String, ApiError> {
        info!("AI call: {}", call.path());
        let response = match call {
            AiCall::Info => {
                self.send(self.request(Method::GET, call.path()), call.path())
                    .await?
            }
            _ => {
                self.send_json(Method::POST, call.path(), &UserRequest { user_id })
                    .await?
            }
        };
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(display_body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let backend = HttpBackend::new("http://localhost:3000/", None);
        assert_eq!(backend.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_display_body_pretty_prints_json() {
        let out = display_body(r#"{"general_advice":"rest more"}"#.to_string());
        assert!(out.contains("\n"));
        assert!(out.contains("\"general_advice\": \"rest more\""));
    }

    #[test]
    fn test_display_body_passes_plain_text_through() {
        assert_eq!(display_body("service up".to_string()), "service up");
    }
}
