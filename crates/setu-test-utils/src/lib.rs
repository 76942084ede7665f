// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Setu integration tests.
//!
//! Provides in-process doubles for the trait seams so flows can be tested
//! without a running backend or a database.
//!
//! # Components
//!
//! - [`MockBackend`] - scripted [`setu_core::RetailApi`] that records every call
//! - [`MemorySessionRepository`] - session store kept in memory
//! - [`RecordingNavigator`] - collects navigation requests

pub mod fixtures;
pub mod mock_backend;
pub mod mock_session;
pub mod navigator;

pub use fixtures::{navy_blazer, oxford_shirt, sample_products};
pub use mock_backend::{BackendCall, Endpoint, Failure, MockBackend};
pub use mock_session::MemorySessionRepository;
pub use navigator::RecordingNavigator;
