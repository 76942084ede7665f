// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The persisted chat session and the chat turn protocol.
//!
//! A turn always ends with a bot message after the user message: when the
//! assistant cannot be reached a fixed apology is appended instead of
//! surfacing the error. Every mutation of the transcript or the session
//! metadata rewrites the whole snapshot through the [`SessionRepository`].

use std::sync::Arc;
use std::time::Duration;

use setu_config::SetuConfig;
use setu_core::api::ChatRequest;
use setu_core::{
    ChatMessage, RetailApi, Route, SessionData, SessionRepository, SessionSnapshot, SetuError,
};
use strum::{Display, EnumIter, EnumString};
use tracing::{debug, warn};

/// First bot message of a brand new session.
pub const GREETING: &str =
    "👋 Hello! I'm Setu AI, your smart retail assistant. How can I help you today?";

/// Bot message a cleared session restarts with.
pub const CLEARED_GREETING: &str = "👋 Hello! I'm Setu AI. How can I help you today?";

/// Reply used when the assistant answers without reply text.
pub const OFFLINE_REPLY: &str =
    "I'm here to help with products, stock, and try-ons! Tell me what you need.";

/// Reply used when the assistant call fails.
pub const UNAVAILABLE_REPLY: &str =
    "I'm having trouble reaching the assistant. Please try again.";

pub const CATALOG_CTA_LABEL: &str = "Open catalog";

/// Canned inputs offered next to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum QuickReply {
    Shirts,
    Blazers,
    TryOn,
    Loyalty,
}

impl QuickReply {
    /// The text placed in the input line.
    pub fn text(self) -> &'static str {
        match self {
            QuickReply::Shirts => "Show me shirts",
            QuickReply::Blazers => "Show me blazers",
            QuickReply::TryOn => "Virtual try-on",
            QuickReply::Loyalty => "Check my loyalty points",
        }
    }
}

/// Knobs of the chat turn, usually taken from `[session]` and `[chat]`.
#[derive(Debug, Clone)]
pub struct ChatOptions {
    /// User a new session is created for.
    pub user_id: String,
    pub include_products: bool,
    /// Pause between receiving a reply and showing it.
    pub typing_delay: Duration,
}

impl ChatOptions {
    pub fn from_config(config: &SetuConfig) -> Self {
        Self {
            user_id: config.session.user_id.clone(),
            include_products: config.chat.include_products,
            typing_delay: Duration::from_millis(config.chat.typing_delay_ms),
        }
    }
}

/// What a call to [`ChatSession::send`] did.
#[derive(Debug)]
pub enum ChatTurn {
    /// The input was blank. Nothing was appended or sent.
    Ignored,
    /// The assistant answered and `reply` was appended.
    Answered { reply: ChatMessage, llm_used: bool },
    /// The assistant call failed and the fallback `reply` was appended.
    Unavailable { reply: ChatMessage, error: SetuError },
}

impl ChatTurn {
    /// The bot message appended by this turn, if any.
    pub fn reply(&self) -> Option<&ChatMessage> {
        match self {
            ChatTurn::Ignored => None,
            ChatTurn::Answered { reply, .. } | ChatTurn::Unavailable { reply, .. } => Some(reply),
        }
    }
}

/// One user's chat: transcript, metadata and where they are persisted.
pub struct ChatSession {
    api: Arc<dyn RetailApi>,
    repo: Arc<dyn SessionRepository>,
    options: ChatOptions,
    messages: Vec<ChatMessage>,
    session_data: SessionData,
}

impl ChatSession {
    /// Restores the persisted session, or starts a new one with the greeting.
    ///
    /// A stored record that cannot be decoded is logged and replaced.
    pub async fn open(
        api: Arc<dyn RetailApi>,
        repo: Arc<dyn SessionRepository>,
        options: ChatOptions,
    ) -> Result<Self, SetuError> {
        let restored = match repo.load().await {
            Ok(snapshot) => snapshot,
            Err(e @ SetuError::Decode { .. }) => {
                warn!(error = %e, "discarding unreadable chat session");
                None
            }
            Err(e) => return Err(e),
        };

        let mut session = Self {
            api,
            repo,
            messages: Vec::new(),
            session_data: SessionData::new(options.user_id.clone()),
            options,
        };

        match restored {
            Some(snapshot) => {
                debug!(messages = snapshot.messages.len(), "chat session restored");
                session.messages = snapshot.messages;
                session.session_data = snapshot.session_data;
            }
            None => {
                session.messages.push(ChatMessage::bot(GREETING));
                session.persist().await?;
                debug!("new chat session started");
            }
        }
        Ok(session)
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn session_data(&self) -> &SessionData {
        &self.session_data
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            messages: self.messages.clone(),
            session_data: self.session_data.clone(),
        }
    }

    /// Runs one chat turn for `input`.
    ///
    /// Only a failure to persist the completed turn is returned as an error;
    /// assistant failures become [`ChatTurn::Unavailable`].
    pub async fn send(&mut self, input: &str) -> Result<ChatTurn, SetuError> {
        let text = input.trim();
        if text.is_empty() {
            return Ok(ChatTurn::Ignored);
        }

        let history: Vec<String> = self
            .messages
            .iter()
            .map(ChatMessage::as_history_line)
            .collect();

        self.messages.push(ChatMessage::user(text));
        if let Err(e) = self.persist().await {
            warn!(error = %e, "failed to persist user message");
        }

        let request = ChatRequest {
            message: text.to_string(),
            history,
            user_id: self.session_data.user_id.clone(),
            include_products: self.options.include_products,
        };

        let turn = match self.api.chat(&request).await {
            Ok(response) => {
                tokio::time::sleep(self.options.typing_delay).await;
                let text = response
                    .reply
                    .filter(|r| !r.trim().is_empty())
                    .unwrap_or_else(|| OFFLINE_REPLY.to_string());
                let reply = ChatMessage::bot(text).with_cta(CATALOG_CTA_LABEL, Route::Catalog);
                self.messages.push(reply.clone());
                ChatTurn::Answered {
                    reply,
                    llm_used: response.llm_used,
                }
            }
            Err(error) => {
                warn!(error = %error, "assistant unavailable");
                let reply = ChatMessage::bot(UNAVAILABLE_REPLY);
                self.messages.push(reply.clone());
                ChatTurn::Unavailable { reply, error }
            }
        };

        self.persist().await?;
        Ok(turn)
    }

    /// Deletes the persisted record and starts over with one greeting.
    ///
    /// The fresh greeting is only written back with the next mutation.
    pub async fn clear(&mut self) -> Result<(), SetuError> {
        self.repo.clear().await?;
        self.messages = vec![ChatMessage::bot(CLEARED_GREETING)];
        debug!("chat session cleared");
        Ok(())
    }

    /// Replaces the session metadata and persists it.
    pub async fn set_session_data(&mut self, data: SessionData) -> Result<(), SetuError> {
        self.session_data = data;
        self.persist().await
    }

    async fn persist(&self) -> Result<(), SetuError> {
        self.repo.save(&self.snapshot()).await
    }
}
