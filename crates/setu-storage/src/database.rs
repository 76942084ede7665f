// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup and WAL mode.
//!
//! All reads and writes are serialized through tokio-rusqlite's single
//! background thread. Do NOT open extra connections to the same file.

use std::path::Path;

use setu_core::SetuError;
use tokio_rusqlite::Connection;
use tracing::debug;

/// Handle to the opened, migrated SQLite database.
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path` and applies migrations.
    ///
    /// Missing parent directories are created.
    pub async fn open(path: &str) -> Result<Self, SetuError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(SetuError::storage)?;
            }
        }

        let conn = Connection::open(path).await.map_err(SetuError::storage)?;

        conn.call(|conn| -> Result<(), rusqlite::Error> {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| crate::migrations::run_migrations(conn))
            .await
            .map_err(|e: tokio_rusqlite::Error<SetuError>| SetuError::storage(e))?;

        debug!(path, "session database opened");
        Ok(Self { conn })
    }

    /// The underlying async connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Folds the WAL back into the main file. [`SqliteSessionStore::close`]
    /// runs it when the client exits.
    ///
    /// [`SqliteSessionStore::close`]: crate::SqliteSessionStore::close
    pub async fn checkpoint(&self) -> Result<(), SetuError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> SetuError {
    SetuError::Storage {
        source: Box::new(e),
    }
}
