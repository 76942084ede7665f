// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams of the assistant.
//!
//! Flows depend on these traits only, so the HTTP client, the SQLite store
//! and the terminal router can be swapped for mocks in tests.

pub mod adapter;
pub mod backend;
pub mod navigator;
pub mod session;

pub use adapter::Adapter;
pub use backend::RetailApi;
pub use navigator::Navigator;
pub use session::SessionRepository;
