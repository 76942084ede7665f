// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP adapter for the Setu retail backend.
//!
//! [`HttpClient`] implements [`setu_core::RetailApi`] with one request per
//! call: JSON in, JSON out, no retries and no client-side timeout.

pub mod client;

pub use client::HttpClient;
