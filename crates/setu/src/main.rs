// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Setu - terminal client for the Setu AI retail assistant.
//!
//! This is the binary entry point. Every interactive screen returns the next
//! place to go and the router loop in [`app`] follows it until the user quits.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod app;
mod render;
mod screens;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use setu_config::SetuConfig;
use setu_core::Route;

use crate::app::{App, Next};

/// Setu - your smart retail assistant, in the terminal.
#[derive(Parser, Debug)]
#[command(name = "setu", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the usual locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the home screen (default).
    Home,
    /// Chat with the assistant.
    Chat,
    /// Try products on a photo of yourself.
    TryOn {
        /// Photo to start with.
        #[arg(long, value_name = "PATH")]
        photo: Option<PathBuf>,
    },
    /// Browse products, check stock and buy.
    Catalog,
    /// Play the guided demo.
    Demo {
        /// Playback speed; 2 plays twice as fast.
        #[arg(long, value_parser = parse_speed)]
        speed: Option<f64>,
    },
    /// Show backend and session store health.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn parse_speed(s: &str) -> Result<f64, String> {
    let speed: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if setu_config::DEMO_SPEED_RANGE.contains(&speed) {
        Ok(speed)
    } else {
        Err(format!(
            "speed must be between {} and {}, got {s}",
            setu_config::DEMO_SPEED_RANGE.start(),
            setu_config::DEMO_SPEED_RANGE.end()
        ))
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => setu_config::load_and_validate_path(path),
        None => setu_config::load_and_validate(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            setu_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);
    tracing::debug!(backend = %config.backend.base_url, "config loaded");

    let result = match cli.command {
        Some(Commands::Status { json, plain }) => status::run_status(&config, json, plain).await,
        Some(Commands::Config) => print_config(&config),
        command => {
            let (start, photo) = match command {
                Some(Commands::Chat) => (Next::Go(Route::Chat), None),
                Some(Commands::TryOn { photo }) => (Next::Go(Route::TryOn), photo),
                Some(Commands::Catalog) => (Next::Go(Route::Catalog), None),
                Some(Commands::Demo { speed }) => {
                    if let Some(speed) = speed {
                        config.demo.speed = speed;
                    }
                    (Next::Demo, None)
                }
                _ => (Next::Go(Route::Home), None),
            };
            match App::new(config, photo) {
                Ok(app) => app.run(start).await,
                Err(e) => Err(e),
            }
        }
    };

    if let Err(e) = result {
        eprintln!("setu: {e}");
        std::process::exit(1);
    }
}

fn print_config(config: &SetuConfig) -> Result<(), setu_core::SetuError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| setu_core::SetuError::Internal(format!("failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so the screens on stdout stay readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("setu={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc can advance the epoch; the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_config_defaults_are_valid() {
        let config = setu_config::load_and_validate_str("").expect("defaults should be valid");
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert!(print_config(&config).is_ok());
    }

    #[test]
    fn cli_defaults_to_home() {
        let cli = Cli::try_parse_from(["setu"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["setu", "try-on", "--photo", "me.png"]).unwrap();
        match cli.command {
            Some(Commands::TryOn { photo }) => assert_eq!(photo, Some(PathBuf::from("me.png"))),
            other => panic!("expected try-on, got {other:?}"),
        }

        let cli = Cli::try_parse_from(["setu", "demo", "--speed", "2", "--config", "x.toml"])
            .unwrap();
        assert!(matches!(cli.command, Some(Commands::Demo { speed: Some(s) }) if s == 2.0));
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));

        let cli = Cli::try_parse_from(["setu", "status", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Status {
                json: true,
                plain: false
            })
        ));
    }

    #[test]
    fn demo_speed_must_be_in_range() {
        assert_eq!(parse_speed("0.5"), Ok(0.5));
        assert!(parse_speed("0").is_err());
        assert!(parse_speed("-1").is_err());
        assert!(parse_speed("inf").is_err());
        assert!(parse_speed("fast").is_err());
        assert!(parse_speed("1e-300").is_err());
        assert!(parse_speed("1000").is_err());
        assert_eq!(parse_speed("0.01"), Ok(0.01));
        assert!(Cli::try_parse_from(["setu", "demo", "--speed", "0"]).is_err());
    }
}
