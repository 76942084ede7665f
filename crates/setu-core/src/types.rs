// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the client adapter, the session store, and the flows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::route::Route;

/// Catalog product as served by the backend. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub color: String,
    pub price: f64,
    /// Image reference (URL or path); some products have none.
    #[serde(default)]
    pub image: Option<String>,
    /// Available sizes, in display order.
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// Author of a transcript entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Bot,
    User,
}

/// A suggested navigation attached to a bot message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToAction {
    pub label: String,
    pub route: Route,
}

/// One entry of a chat or demo transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    /// Products attached to the message (recommendation results).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<CallToAction>,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// A bot message stamped now.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            text: text.into(),
            products: None,
            cta: None,
            timestamp: Utc::now(),
        }
    }

    /// A user message stamped now.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            products: None,
            cta: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = Some(products);
        self
    }

    pub fn with_cta(mut self, label: impl Into<String>, route: Route) -> Self {
        self.cta = Some(CallToAction {
            label: label.into(),
            route,
        });
        self
    }

    /// The `"{role}: {text}"` line used when flattening a transcript into context.
    pub fn as_history_line(&self) -> String {
        format!("{}: {}", self.role, self.text)
    }
}

/// Session metadata persisted next to the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub user_id: String,
    /// Product ids the user picked during the conversation.
    #[serde(default)]
    pub selected_products: Vec<u64>,
    /// Product ids in the cart.
    #[serde(default)]
    pub cart: Vec<u64>,
}

impl SessionData {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            selected_products: Vec::new(),
            cart: Vec::new(),
        }
    }
}

/// Everything the session repository stores: transcript plus metadata.
///
/// Written as one opaque record; no schema versioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub messages: Vec<ChatMessage>,
    pub session_data: SessionData,
}

/// Supported payment methods for checkout.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "UPI")]
    #[strum(serialize = "UPI", ascii_case_insensitive)]
    Upi,
    #[serde(rename = "Card")]
    #[strum(serialize = "Card", ascii_case_insensitive)]
    Card,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Bot).unwrap(), "\"bot\"");
        assert_eq!(Role::User.to_string(), "user");
    }

    #[test]
    fn payment_method_wire_names() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Upi).unwrap(), "\"UPI\"");
        assert_eq!(serde_json::to_string(&PaymentMethod::Card).unwrap(), "\"Card\"");
        assert_eq!(PaymentMethod::from_str("upi").unwrap(), PaymentMethod::Upi);
        assert_eq!(PaymentMethod::from_str("CARD").unwrap(), PaymentMethod::Card);
        assert!(PaymentMethod::from_str("cash").is_err());
    }

    #[test]
    fn history_line_uses_role_prefix() {
        let msg = ChatMessage::user("Show me shirts");
        assert_eq!(msg.as_history_line(), "user: Show me shirts");
    }

    #[test]
    fn product_tolerates_missing_optional_fields() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "Linen Shirt",
            "category": "Shirts",
            "price": 1999
        }))
        .unwrap();
        assert_eq!(product.price, 1999.0);
        assert!(product.sizes.is_empty());
        assert!(product.image.is_none());
    }

    #[test]
    fn message_without_extras_omits_them_on_the_wire() {
        let msg = ChatMessage::bot("hi");
        let value = serde_json::to_value(&msg).unwrap();
        assert!(value.get("products").is_none());
        assert!(value.get("cta").is_none());
    }
}
