// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The retail backend as seen by the client: one method per endpoint.

use async_trait::async_trait;

use crate::api::{
    ChatRequest, ChatResponse, CheckoutRequest, CheckoutResponse, FulfillmentRequest,
    FulfillmentResponse, InventoryResponse, LoyaltyResponse, RecommendResponse, TryOnRequest,
    TryOnResponse, UserProfile,
};
use crate::error::SetuError;
use crate::types::Product;

/// Typed access to the backend capabilities ("agents").
///
/// Every call issues exactly one request and hands the error back unchanged.
/// Implementations must not retry.
#[async_trait]
pub trait RetailApi: Send + Sync {
    /// `GET /products`
    async fn list_products(&self) -> Result<Vec<Product>, SetuError>;

    /// `GET /products/{id}`
    async fn get_product(&self, product_id: u64) -> Result<Product, SetuError>;

    /// `POST /recommend`
    async fn recommend(
        &self,
        category: Option<&str>,
        user_input: Option<&str>,
        user_id: &str,
    ) -> Result<RecommendResponse, SetuError>;

    /// `POST /inventory`
    async fn check_inventory(&self, product_id: u64) -> Result<InventoryResponse, SetuError>;

    /// `POST /checkout`
    async fn checkout(&self, request: &CheckoutRequest) -> Result<CheckoutResponse, SetuError>;

    /// `POST /apply-loyalty`
    async fn apply_loyalty(
        &self,
        user_id: &str,
        order_amount: f64,
    ) -> Result<LoyaltyResponse, SetuError>;

    /// `POST /fulfillment`
    async fn fulfillment(
        &self,
        request: &FulfillmentRequest,
    ) -> Result<FulfillmentResponse, SetuError>;

    /// `POST /virtual-tryon-mock`
    async fn virtual_try_on(&self, request: &TryOnRequest) -> Result<TryOnResponse, SetuError>;

    /// `POST /chat-llm`
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, SetuError>;

    /// `GET /user/{id}`
    async fn user_profile(&self, user_id: &str) -> Result<UserProfile, SetuError>;
}
