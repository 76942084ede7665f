// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive screens. Each `run` returns where the router goes next.

pub mod catalog;
pub mod chat;
pub mod demo;
pub mod home;
pub mod tryon;
