// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of [`SessionRepository`].

use async_trait::async_trait;
use setu_core::{Adapter, HealthStatus, SessionRepository, SessionSnapshot, SetuError};
use tracing::debug;

use crate::database::{Database, map_tr_err};
use crate::queries;

/// Keeps the chat session as one JSON document under a fixed storage key.
///
/// The key plays the role of a storage origin: two stores opened on the same
/// database with the same key see the same session, last write wins.
#[derive(Clone)]
pub struct SqliteSessionStore {
    db: Database,
    key: String,
}

impl SqliteSessionStore {
    pub fn new(db: Database, key: impl Into<String>) -> Self {
        Self {
            db,
            key: key.into(),
        }
    }

    /// Opens the database at `path` and binds the store to `key`.
    pub async fn open(path: &str, key: impl Into<String>) -> Result<Self, SetuError> {
        let db = Database::open(path).await?;
        Ok(Self::new(db, key))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Checkpoints the WAL so the session file is complete on its own.
    pub async fn close(&self) -> Result<(), SetuError> {
        self.db.checkpoint().await
    }
}

#[async_trait]
impl Adapter for SqliteSessionStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn health_check(&self) -> Result<HealthStatus, SetuError> {
        self.db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionStore {
    /// A stored value that does not parse is reported as [`SetuError::Decode`].
    async fn load(&self) -> Result<Option<SessionSnapshot>, SetuError> {
        let Some(raw) = queries::kv::get(&self.db, &self.key).await? else {
            return Ok(None);
        };
        let snapshot = serde_json::from_str(&raw).map_err(|e| SetuError::Decode {
            message: format!("stored session `{}` is not valid: {e}", self.key),
            source: Some(Box::new(e)),
        })?;
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SetuError> {
        let raw = serde_json::to_string(snapshot).map_err(|e| SetuError::Internal(format!(
            "failed to serialize session: {e}"
        )))?;
        queries::kv::put(&self.db, &self.key, &raw).await?;
        debug!(key = %self.key, messages = snapshot.messages.len(), "session saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), SetuError> {
        let removed = queries::kv::delete(&self.db, &self.key).await?;
        debug!(key = %self.key, removed, "session cleared");
        Ok(())
    }
}
