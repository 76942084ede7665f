// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `setu status` command implementation.
//!
//! Probes the backend root, fetches the configured user's profile and opens
//! the session store, then prints what answered. Never fails just because the
//! backend is down.

use std::io::IsTerminal;

use serde::Serialize;
use setu_client::HttpClient;
use setu_config::SetuConfig;
use setu_core::{Adapter, HealthStatus, RetailApi, SetuError};
use setu_storage::SqliteSessionStore;
use tracing::debug;

/// Health of one component, flattened for output.
#[derive(Debug, Serialize, PartialEq)]
pub struct ComponentStatus {
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ComponentStatus {
    fn from_health(health: Result<HealthStatus, SetuError>) -> Self {
        match health {
            Ok(HealthStatus::Healthy) => Self {
                state: "healthy",
                detail: None,
            },
            Ok(HealthStatus::Degraded(detail)) => Self {
                state: "degraded",
                detail: Some(detail),
            },
            Ok(HealthStatus::Unhealthy(detail)) => Self {
                state: "unhealthy",
                detail: Some(detail),
            },
            Err(e) => Self {
                state: "unhealthy",
                detail: Some(e.to_string()),
            },
        }
    }

    fn is_healthy(&self) -> bool {
        self.state == "healthy"
    }
}

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub backend_url: String,
    pub backend: ComponentStatus,
    pub user_id: String,
    pub loyalty_points: Option<u64>,
    pub session_store: ComponentStatus,
    pub database_path: String,
}

/// Run the `setu status` command.
///
/// If `--json` is passed, outputs structured JSON for scripting.
/// If `--plain` is passed or stdout is not a TTY, disables colors.
pub async fn run_status(config: &SetuConfig, json: bool, plain: bool) -> Result<(), SetuError> {
    let client = HttpClient::new(&config.backend.base_url)?;
    let backend = ComponentStatus::from_health(client.health_check().await);

    let loyalty_points = if backend.is_healthy() {
        match client.user_profile(&config.session.user_id).await {
            Ok(profile) => Some(profile.loyalty_points),
            Err(e) => {
                debug!(error = %e, "profile lookup failed");
                None
            }
        }
    } else {
        None
    };

    let session_store = match SqliteSessionStore::open(
        &config.session.database_path,
        config.session.storage_key.clone(),
    )
    .await
    {
        Ok(store) => ComponentStatus::from_health(store.health_check().await),
        Err(e) => ComponentStatus::from_health(Err(e)),
    };

    let report = StatusReport {
        backend_url: config.backend.base_url.clone(),
        backend,
        user_id: config.session.user_id.clone(),
        loyalty_points,
        session_store,
        database_path: config.session.database_path.clone(),
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_report(&report, use_color);
    }
    Ok(())
}

fn state_label(status: &ComponentStatus, use_color: bool) -> String {
    let (mark, plain_mark) = match status.state {
        "healthy" => ("✓", "[OK]"),
        "degraded" => ("!", "[WARN]"),
        _ => ("✗", "[FAIL]"),
    };
    let mut label = if use_color {
        use colored::Colorize;
        let text = format!("{mark} {}", status.state);
        match status.state {
            "healthy" => text.green().to_string(),
            "degraded" => text.yellow().to_string(),
            _ => text.red().to_string(),
        }
    } else {
        format!("{plain_mark} {}", status.state)
    };
    if let Some(detail) = &status.detail {
        label.push_str(&format!(" ({detail})"));
    }
    label
}

fn print_report(report: &StatusReport, use_color: bool) {
    println!();
    println!("  setu status");
    println!("  {}", "-".repeat(35));
    println!(
        "    Backend:  {}",
        state_label(&report.backend, use_color)
    );
    println!("    URL:      {}", report.backend_url);
    match report.loyalty_points {
        Some(points) => println!("    User:     {} ({points} loyalty points)", report.user_id),
        None => println!("    User:     {}", report.user_id),
    }
    println!(
        "    Sessions: {}",
        state_label(&report.session_store, use_color)
    );
    println!("    Database: {}", report.database_path);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(base_url: &str, dir: &tempfile::TempDir) -> SetuConfig {
        let mut config = SetuConfig::default();
        config.backend.base_url = base_url.to_string();
        config.session.database_path = dir.path().join("setu.db").display().to_string();
        config
    }

    #[test]
    fn health_maps_to_states() {
        assert!(ComponentStatus::from_health(Ok(HealthStatus::Healthy)).is_healthy());
        let degraded = ComponentStatus::from_health(Ok(HealthStatus::Degraded("503".into())));
        assert_eq!(degraded.state, "degraded");
        assert_eq!(degraded.detail.as_deref(), Some("503"));
        let err = ComponentStatus::from_health(Err(SetuError::Internal("boom".into())));
        assert_eq!(err.state, "unhealthy");
    }

    #[test]
    fn plain_labels_have_no_color() {
        let status = ComponentStatus {
            state: "unhealthy",
            detail: Some("connection refused".into()),
        };
        assert_eq!(
            state_label(&status, false),
            "[FAIL] unhealthy (connection refused)"
        );
    }

    #[test]
    fn report_serializes_without_empty_detail() {
        let report = StatusReport {
            backend_url: "http://localhost:8000".into(),
            backend: ComponentStatus {
                state: "healthy",
                detail: None,
            },
            user_id: "user_001".into(),
            loyalty_points: Some(1200),
            session_store: ComponentStatus {
                state: "healthy",
                detail: None,
            },
            database_path: "/tmp/setu.db".into(),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"state\":\"healthy\""));
        assert!(json.contains("\"loyalty_points\":1200"));
        assert!(!json.contains("detail"));
    }

    #[tokio::test]
    async fn status_succeeds_against_running_backend() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Setu AI Backend API",
                "status": "running"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user/user_001"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user": {"user_id": "user_001", "loyalty_points": 1200}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        run_status(&config_for(&server.uri(), &dir), true, true)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn status_succeeds_when_backend_is_down() {
        let dir = tempfile::tempdir().unwrap();
        run_status(&config_for("http://127.0.0.1:1", &dir), false, true)
            .await
            .unwrap();
    }
}
