// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `setu demo`: plays the guided demo on the terminal.

use std::sync::Arc;

use colored::Colorize;
use setu_assistant::demo::run_to_completion;
use setu_assistant::{DemoSequencer, StepOutcome};
use setu_core::{Navigator, Route, SetuError};
use tracing::debug;

use crate::app::{App, Next};
use crate::render;

/// Announces route changes requested by the demo script.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        println!("{}\n", format!("→ opening {route}").magenta());
    }
}

pub async fn run(app: &mut App) -> Result<Next, SetuError> {
    let speed = app.config.demo.speed;
    let mut sequencer = DemoSequencer::new(app.api.clone(), Arc::new(TerminalNavigator));

    println!();
    println!("{}", "🎬 Guided Demo".bold().green());
    if speed != 1.0 {
        println!("{}", format!("playing at {speed}x").dimmed());
    }
    println!();

    run_to_completion(&mut sequencer, speed, |outcome| {
        if let StepOutcome::ActionFailed { action, error, .. } = outcome {
            debug!(%action, error = %error, "demo action failed");
        }
        if let Some(message) = outcome.message() {
            println!("{}\n", render::message(message));
        }
    })
    .await;

    println!("{}", "Demo finished. Back to home.".dimmed());
    Ok(Next::Go(Route::Home))
}
