// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for the Setu retail assistant.
//!
//! A small key/value table holds the serialized chat session. All access
//! goes through `tokio-rusqlite`'s single background thread, and the schema
//! is created by embedded migrations when the database is opened.

pub mod database;
pub mod migrations;
pub mod queries;
pub mod session_store;

pub use database::Database;
pub use session_store::SqliteSessionStore;
