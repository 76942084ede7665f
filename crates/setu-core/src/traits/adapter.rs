// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait for adapters that talk to something outside the process.

use async_trait::async_trait;

use crate::error::SetuError;
use crate::types::HealthStatus;

/// Common surface of the backend client and the session store.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Short human-readable name (e.g. `"http"`, `"sqlite"`).
    fn name(&self) -> &str;

    /// Probes the underlying resource.
    async fn health_check(&self) -> Result<HealthStatus, SetuError>;
}
