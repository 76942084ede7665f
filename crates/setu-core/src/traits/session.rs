// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence of the single chat session record.

use async_trait::async_trait;

use crate::error::SetuError;
use crate::types::SessionSnapshot;

/// Stores one [`SessionSnapshot`] per storage origin.
///
/// `save` overwrites whatever was there (last write wins). There is no
/// merge, no versioning and no expiry.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Reads the persisted record, `None` if nothing was saved yet.
    async fn load(&self) -> Result<Option<SessionSnapshot>, SetuError>;

    /// Replaces the persisted record.
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SetuError>;

    /// Deletes the persisted record. Clearing an absent record is not an error.
    async fn clear(&self) -> Result<(), SetuError>;
}
