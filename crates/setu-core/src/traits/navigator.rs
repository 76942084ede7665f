// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Page navigation requested by flows that are not driven by user input.

use crate::route::Route;

/// Receives navigation requests (e.g. from the demo sequencer).
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
