// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session repository kept in memory.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use setu_core::{SessionRepository, SessionSnapshot, SetuError};

#[derive(Default)]
struct Inner {
    record: Option<SessionSnapshot>,
    corrupt: bool,
    fail_saves: bool,
    saves: usize,
    clears: usize,
}

/// In-memory [`SessionRepository`] with the same last-write-wins contract as
/// the SQLite store. Clones share the record.
#[derive(Clone, Default)]
pub struct MemorySessionRepository {
    inner: Arc<Mutex<Inner>>,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `snapshot` already persisted.
    pub fn with_snapshot(snapshot: SessionSnapshot) -> Self {
        let repo = Self::new();
        repo.inner().record = Some(snapshot);
        repo
    }

    /// Makes `load` report an undecodable record until the next save or clear.
    pub fn corrupt(&self) {
        self.inner().corrupt = true;
    }

    /// Makes every later `save` fail with a storage error.
    pub fn fail_saves(&self, fail: bool) {
        self.inner().fail_saves = fail;
    }

    /// The currently persisted record.
    pub fn stored(&self) -> Option<SessionSnapshot> {
        self.inner().record.clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.inner().saves
    }

    pub fn clear_count(&self) -> usize {
        self.inner().clears
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("session repository lock poisoned")
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn load(&self) -> Result<Option<SessionSnapshot>, SetuError> {
        let inner = self.inner();
        if inner.corrupt {
            return Err(SetuError::Decode {
                message: "stored session is not valid JSON".into(),
                source: None,
            });
        }
        Ok(inner.record.clone())
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SetuError> {
        let mut inner = self.inner();
        if inner.fail_saves {
            return Err(SetuError::storage(std::io::Error::other("disk full")));
        }
        inner.record = Some(snapshot.clone());
        inner.corrupt = false;
        inner.saves += 1;
        Ok(())
    }

    async fn clear(&self) -> Result<(), SetuError> {
        let mut inner = self.inner();
        inner.record = None;
        inner.corrupt = false;
        inner.clears += 1;
        Ok(())
    }
}
