// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./setu.toml` > `~/.config/setu/setu.toml` > `/etc/setu/setu.toml`
//! with environment variable overrides via `SETU_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SetuConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/setu/setu.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "setu.toml";

/// Path of the per-user config file, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("setu/setu.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/setu/setu.toml` (system-wide)
/// 3. `~/.config/setu/setu.toml` (user XDG config)
/// 4. `./setu.toml` (local directory)
/// 5. `SETU_*` environment variables
pub fn load_config() -> Result<SetuConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SetuConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SetuConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
///
/// The XDG hierarchy is skipped entirely.
pub fn load_config_from_path(path: &Path) -> Result<SetuConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SetuConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SetuConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `SETU_BACKEND_BASE_URL` must map to `backend.base_url`, not
/// `backend.base.url`.
fn env_provider() -> Env {
    Env::prefixed("SETU_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a prefix-stripped env var name to its dotted, lowercase config key.
///
/// Figment passes the name with its original case (`BACKEND_BASE_URL`).
pub(crate) fn map_env_key(key: &str) -> String {
    const SECTIONS: [&str; 6] = ["app", "backend", "session", "chat", "demo", "tryon"];
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key
}
