// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Setu retail assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Setu configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SetuConfig {
    /// Process-wide settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Retail backend connection.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Chat session identity and persistence.
    #[serde(default)]
    pub session: SessionConfig,

    /// Chat screen behavior.
    #[serde(default)]
    pub chat: ChatConfig,

    /// Guided demo playback.
    #[serde(default)]
    pub demo: DemoConfig,

    /// Virtual try-on screen.
    #[serde(default)]
    pub tryon: TryOnConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Retail backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

/// Chat session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// User identifier sent with every request. A static placeholder; there is no login.
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Key the session record is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Path to the SQLite database holding the session record.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            storage_key: default_storage_key(),
            database_path: default_database_path(),
        }
    }
}

fn default_user_id() -> String {
    "user_001".to_string()
}

fn default_storage_key() -> String {
    "setu_chat_session".to_string()
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("setu").join("setu.db"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_else(|| "setu.db".to_string())
}

/// Chat screen configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Pause before a successful assistant reply is shown.
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,

    /// Ask the backend to ground replies in the catalog.
    #[serde(default = "default_include_products")]
    pub include_products: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: default_typing_delay_ms(),
            include_products: default_include_products(),
        }
    }
}

fn default_typing_delay_ms() -> u64 {
    600
}

fn default_include_products() -> bool {
    true
}

/// Guided demo configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DemoConfig {
    /// Playback speed. Step delays are divided by this value.
    #[serde(default = "default_demo_speed")]
    pub speed: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            speed: default_demo_speed(),
        }
    }
}

fn default_demo_speed() -> f64 {
    1.0
}

/// Virtual try-on configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TryOnConfig {
    /// Artificial processing delay before a try-on result is revealed.
    #[serde(default = "default_processing_delay_ms")]
    pub processing_delay_ms: u64,
}

impl Default for TryOnConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: default_processing_delay_ms(),
        }
    }
}

fn default_processing_delay_ms() -> u64 {
    1500
}
