// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared state of the interactive client and the router loop.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use setu_client::HttpClient;
use setu_config::SetuConfig;
use setu_core::{RetailApi, Route, SessionRepository, SetuError};
use setu_storage::SqliteSessionStore;
use tracing::{info, warn};

use crate::screens;

/// Where the router goes after a screen returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    Go(Route),
    /// The guided demo. It has no route of its own.
    Demo,
    Quit,
}

pub struct App {
    pub config: SetuConfig,
    pub api: Arc<dyn RetailApi>,
    /// Photo passed on the command line, consumed by the first try-on screen.
    pub initial_photo: Option<PathBuf>,
    editor: DefaultEditor,
    sessions: Option<Arc<SqliteSessionStore>>,
}

impl App {
    pub fn new(config: SetuConfig, initial_photo: Option<PathBuf>) -> Result<Self, SetuError> {
        let api: Arc<dyn RetailApi> = Arc::new(HttpClient::new(&config.backend.base_url)?);
        let editor = DefaultEditor::new()
            .map_err(|e| SetuError::Internal(format!("failed to initialize readline: {e}")))?;
        Ok(Self {
            config,
            api,
            initial_photo,
            editor,
            sessions: None,
        })
    }

    /// Follows screens until one of them asks to quit.
    pub async fn run(mut self, start: Next) -> Result<(), SetuError> {
        let mut next = start;
        loop {
            info!(?next, "entering screen");
            next = match next {
                Next::Go(Route::Home) => screens::home::run(&mut self)?,
                Next::Go(Route::Chat) => screens::chat::run(&mut self).await?,
                Next::Go(Route::Catalog) => screens::catalog::run(&mut self).await?,
                Next::Go(Route::TryOn) => screens::tryon::run(&mut self).await?,
                Next::Demo => screens::demo::run(&mut self).await?,
                Next::Quit => break,
            };
        }
        self.close().await;
        println!("{}", "goodbye".dimmed());
        Ok(())
    }

    /// Checkpoints the session store if a screen opened it.
    async fn close(&self) {
        if let Some(store) = &self.sessions {
            if let Err(e) = store.close().await {
                warn!(error = %e, "session store checkpoint failed");
            }
        }
    }

    /// The persisted chat session store, opened on first use.
    pub async fn sessions(&mut self) -> Result<Arc<dyn SessionRepository>, SetuError> {
        if let Some(store) = &self.sessions {
            return Ok(store.clone());
        }
        let store = Arc::new(
            SqliteSessionStore::open(
                &self.config.session.database_path,
                self.config.session.storage_key.clone(),
            )
            .await?,
        );
        self.sessions = Some(store.clone());
        Ok(store)
    }

    /// Reads one line. `None` means the user pressed Ctrl+C or Ctrl+D.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>, SetuError> {
        self.read_line_with(prompt, "")
    }

    /// Reads one line with `initial` already typed in.
    pub fn read_line_with(
        &mut self,
        prompt: &str,
        initial: &str,
    ) -> Result<Option<String>, SetuError> {
        match self.editor.readline_with_initial(prompt, (initial, "")) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(e) => Err(SetuError::Internal(format!("readline failed: {e}"))),
        }
    }
}

/// Navigation words shared by every screen.
pub fn navigation(word: &str) -> Option<Next> {
    match word {
        "home" | "/home" | "/" => Some(Next::Go(Route::Home)),
        "chat" | "/chat" => Some(Next::Go(Route::Chat)),
        "catalog" | "/catalog" => Some(Next::Go(Route::Catalog)),
        "try-on" | "tryon" | "/try-on" => Some(Next::Go(Route::TryOn)),
        "demo" => Some(Next::Demo),
        "quit" | "exit" | "/quit" | "/exit" => Some(Next::Quit),
        _ => None,
    }
}
