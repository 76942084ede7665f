// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as the backend URL scheme, non-empty identifiers and the demo speed range.

use std::ops::RangeInclusive;

use crate::diagnostic::ConfigError;
use crate::model::SetuConfig;

/// Accepted playback speeds for the guided demo.
pub const DEMO_SPEED_RANGE: RangeInclusive<f64> = 0.01..=100.0;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SetuConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Err(message) = check_base_url(&config.backend.base_url) {
        errors.push(ConfigError::Validation { message });
    }

    if config.session.user_id.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "session.user_id must not be empty".to_string(),
        });
    }

    if config.session.storage_key.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "session.storage_key must not be empty".to_string(),
        });
    }

    if config.session.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "session.database_path must not be empty".to_string(),
        });
    }

    let speed = config.demo.speed;
    if !DEMO_SPEED_RANGE.contains(&speed) {
        errors.push(ConfigError::Validation {
            message: format!(
                "demo.speed must be between {} and {}, got {speed}",
                DEMO_SPEED_RANGE.start(),
                DEMO_SPEED_RANGE.end()
            ),
        });
    }

    let level = config.app.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{}` is not one of {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks that the base URL is `http(s)://host[...]`.
fn check_base_url(url: &str) -> Result<(), String> {
    let url = url.trim();
    if url.is_empty() {
        return Err("backend.base_url must not be empty".to_string());
    }
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .ok_or_else(|| format!("backend.base_url `{url}` must start with http:// or https://"))?;
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() || host.starts_with(':') {
        return Err(format!("backend.base_url `{url}` has no host"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &SetuConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        let config = SetuConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn base_url_without_scheme_fails() {
        let mut config = SetuConfig::default();
        config.backend.base_url = "localhost:8000".to_string();
        let errors = messages(&config);
        assert!(errors.iter().any(|m| m.contains("must start with http")));
    }

    #[test]
    fn base_url_without_host_fails() {
        let mut config = SetuConfig::default();
        config.backend.base_url = "http://:8000".to_string();
        assert!(messages(&config).iter().any(|m| m.contains("has no host")));
    }

    #[test]
    fn https_base_url_with_path_passes() {
        let mut config = SetuConfig::default();
        config.backend.base_url = "https://shop.example.com/api".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_demo_speed_fails() {
        let mut config = SetuConfig::default();
        config.demo.speed = 0.0;
        assert!(messages(&config).iter().any(|m| m.contains("demo.speed")));
    }

    #[test]
    fn demo_speed_outside_range_fails() {
        for speed in [1e-300, 0.001, 100.5, f64::NAN, f64::INFINITY, -2.0] {
            let mut config = SetuConfig::default();
            config.demo.speed = speed;
            assert!(
                messages(&config).iter().any(|m| m.contains("demo.speed")),
                "speed {speed} passed"
            );
        }
    }

    #[test]
    fn demo_speed_range_bounds_are_inclusive() {
        for speed in [0.01, 1.0, 100.0] {
            let mut config = SetuConfig::default();
            config.demo.speed = speed;
            assert!(validate_config(&config).is_ok(), "speed {speed} rejected");
        }
    }

    #[test]
    fn errors_are_collected_not_fail_fast() {
        let mut config = SetuConfig::default();
        config.session.user_id = " ".to_string();
        config.session.storage_key = String::new();
        config.app.log_level = "loud".to_string();
        let errors = messages(&config);
        assert_eq!(errors.len(), 3, "got: {errors:?}");
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = SetuConfig::default();
        config.app.log_level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
