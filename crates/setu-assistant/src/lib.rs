// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flows of the Setu retail assistant.
//!
//! Each flow is written against the trait seams in `setu-core` and returns
//! a result value; deciding how to show a failure (alert, fallback message,
//! silent continue) is left to the presentation layer.
//!
//! - [`chat::ChatSession`] - persisted transcript and the chat turn protocol
//! - [`demo::DemoSequencer`] - the scripted guided demo as a stepped state machine
//! - [`checkout`] - validated checkout, loyalty and fulfillment composition
//! - [`tryon::TryOnSession`] - photo upload and the mocked try-on call
//! - [`catalog::Catalog`] - product list and stock lookups

pub mod catalog;
pub mod chat;
pub mod checkout;
pub mod demo;
pub mod tryon;

pub use catalog::Catalog;
pub use chat::{ChatOptions, ChatSession, ChatTurn, QuickReply};
pub use checkout::{CheckoutFailure, CheckoutForm, CheckoutValidation, OrderResult};
pub use demo::{DemoSequencer, DemoState, DemoStep, StepOutcome};
pub use tryon::{TryOnError, TryOnSession, UserImage};
