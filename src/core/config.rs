//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.liftlog/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::menu::DEFAULT_REST_SECS;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LiftlogConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub user_id: Option<String>,
    pub default_rest_seconds: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub sync_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NotificationConfig {
    pub bell: Option<bool>,
    pub speech: Option<bool>,
    pub speech_command: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_USER_ID: &str = "local";
pub const DEFAULT_SYNC_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SPEECH_COMMAND: &str = "espeak";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub user_id: String,
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub sync_timeout: Duration,
    pub default_rest_secs: u32,
    pub bell: bool,
    /// Command run with the announcement text; `None` = speech off.
    pub speech_command: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.liftlog/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".liftlog").join("config.toml"))
}

/// Load config from `~/.liftlog/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `LiftlogConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LiftlogConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(LiftlogConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(LiftlogConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: LiftlogConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# liftlog configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# user_id = "alice"                     # Or set LIFTLOG_USER
# default_rest_seconds = 90             # Used when a menu doesn't say

# [api]
# base_url = "http://localhost:3000"    # Or set LIFTLOG_API_BASE
# token = "eyJ..."                      # Bearer token; or set LIFTLOG_TOKEN
# sync_timeout_secs = 10                # Give up on a set upload after this

# [notifications]
# bell = true                           # Terminal bell on rest complete / log
# speech = false                        # Announce rest complete aloud
# speech_command = "espeak"             # Called with the announcement text
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_api_base` and `cli_user` are from CLI flags (None = not specified).
pub fn resolve(
    config: &LiftlogConfig,
    cli_api_base: Option<&str>,
    cli_user: Option<&str>,
) -> ResolvedConfig {
    // User: CLI → env → config → default
    let user_id = cli_user
        .map(|s| s.to_string())
        .or_else(|| std::env::var("LIFTLOG_USER").ok())
        .or_else(|| config.general.user_id.clone())
        .unwrap_or_else(|| DEFAULT_USER_ID.to_string());

    // API base URL: CLI → env → config → default
    let api_base_url = cli_api_base
        .map(|s| s.to_string())
        .or_else(|| std::env::var("LIFTLOG_API_BASE").ok())
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    // Token: env → config
    let api_token = std::env::var("LIFTLOG_TOKEN")
        .ok()
        .or_else(|| config.api.token.clone())
        .filter(|t| !t.trim().is_empty());

    let speech_command = if config.notifications.speech.unwrap_or(false) {
        Some(
            config
                .notifications
                .speech_command
                .clone()
                .unwrap_or_else(|| DEFAULT_SPEECH_COMMAND.to_string()),
        )
    } else {
        None
    };

    ResolvedConfig {
        user_id,
        api_base_url,
        api_token,
        sync_timeout: Duration::from_secs(
            config
                .api
                .sync_timeout_secs
                .unwrap_or(DEFAULT_SYNC_TIMEOUT_SECS),
        ),
        default_rest_secs: config
            .general
            .default_rest_seconds
            .unwrap_or(DEFAULT_REST_SECS),
        bell: config.notifications.bell.unwrap_or(true),
        speech_command,
    }
}
