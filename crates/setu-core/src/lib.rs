// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Setu retail assistant.
//!
//! This crate provides the error type, the domain and wire types, the
//! client routes, and the trait seams ([`RetailApi`], [`SessionRepository`],
//! [`Navigator`]) that the flows in `setu-assistant` are written against.

pub mod api;
pub mod error;
pub mod route;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SetuError;
pub use route::Route;
pub use types::{
    CallToAction, ChatMessage, HealthStatus, PaymentMethod, Product, Role, SessionData,
    SessionSnapshot,
};

pub use traits::{Adapter, Navigator, RetailApi, SessionRepository};
