// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response bodies of the retail backend, named as on the wire.
//!
//! Response structs default every field the backend omits in some branch
//! (e.g. loyalty without a profile has no `final_amount`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{PaymentMethod, Product};

/// Envelope of `GET /products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsEnvelope {
    pub products: Vec<Product>,
}

/// Envelope of `GET /products/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductEnvelope {
    pub product: Product,
}

/// Body of `POST /recommend`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub category: Option<String>,
    pub user_input: Option<String>,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<Product>,
    #[serde(default)]
    pub message: String,
}

/// Body of `POST /inventory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRequest {
    pub product_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryResponse {
    pub product_id: u64,
    #[serde(default)]
    pub product_name: String,
    pub online_stock: u32,
    /// Units per store, keyed by store name (`store_1`, `store_2`, ...).
    #[serde(default)]
    pub store_stock: BTreeMap<String, u32>,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub message: String,
}

/// Body of `POST /checkout`. Only the credential matching the method is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub product_id: u64,
    pub size: String,
    pub payment_method: PaymentMethod,
    pub upi_id: Option<String>,
    pub card_number: Option<String>,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub order_id: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Body of `POST /apply-loyalty`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyRequest {
    pub user_id: String,
    pub order_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyResponse {
    #[serde(default)]
    pub loyalty_points: u64,
    #[serde(default)]
    pub discount_points_used: Option<u64>,
    #[serde(default)]
    pub discount_amount: f64,
    #[serde(default)]
    pub final_amount: Option<f64>,
    #[serde(default)]
    pub message: String,
}

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentType {
    HomeDelivery,
    StorePickup,
}

/// Body of `POST /fulfillment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FulfillmentRequest {
    pub order_id: String,
    pub fulfillment_type: FulfillmentType,
    pub address: Option<String>,
    pub store_location: Option<String>,
}

impl FulfillmentRequest {
    pub fn home_delivery(order_id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            fulfillment_type: FulfillmentType::HomeDelivery,
            address: Some(address.into()),
            store_location: None,
        }
    }

    pub fn store_pickup(order_id: impl Into<String>, store_location: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            fulfillment_type: FulfillmentType::StorePickup,
            address: None,
            store_location: Some(store_location.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentResponse {
    pub fulfillment_type: FulfillmentType,
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub estimated_delivery_days: Option<u32>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub store_location: Option<String>,
    #[serde(default)]
    pub pickup_date: Option<u32>,
}

/// Body of `POST /virtual-tryon-mock`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryOnRequest {
    pub product_id: u64,
    pub model_image_url: Option<String>,
    /// The user's photo, usually a `data:` URL.
    pub user_image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryOnResponse {
    pub product_id: u64,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub tryon_status: String,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub user_image_url: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub fit_rating: String,
    #[serde(default)]
    pub recommendation: String,
}

/// Body of `POST /chat-llm`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Flattened transcript so far, one `"{role}: {text}"` line per message.
    pub history: Vec<String>,
    pub user_id: String,
    pub include_products: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub llm_used: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Envelope of `GET /user/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub loyalty_points: u64,
    #[serde(default)]
    pub preferences: serde_json::Value,
    /// Any other profile fields, kept as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
