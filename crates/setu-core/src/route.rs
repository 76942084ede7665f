// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-visible routes. Pure view routing; nothing is rendered server side.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A screen of the client, identified by its path.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum Route {
    #[default]
    #[serde(rename = "/")]
    #[strum(serialize = "/")]
    Home,
    #[serde(rename = "/chat")]
    #[strum(serialize = "/chat")]
    Chat,
    #[serde(rename = "/try-on")]
    #[strum(serialize = "/try-on")]
    TryOn,
    #[serde(rename = "/catalog")]
    #[strum(serialize = "/catalog")]
    Catalog,
}

impl Route {
    /// The path this route is mounted at.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Chat => "/chat",
            Route::TryOn => "/try-on",
            Route::Catalog => "/catalog",
        }
    }
}
