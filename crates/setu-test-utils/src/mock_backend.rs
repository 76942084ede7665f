// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted retail backend for deterministic testing.
//!
//! `MockBackend` implements [`RetailApi`] over an in-memory catalog, records
//! every call in issue order, and can be told to fail any endpoint.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use setu_core::api::{
    ChatRequest, ChatResponse, CheckoutRequest, CheckoutResponse, FulfillmentRequest,
    FulfillmentResponse, FulfillmentType, InventoryResponse, LoyaltyResponse, RecommendResponse,
    TryOnRequest, TryOnResponse, UserProfile,
};
use setu_core::{Adapter, HealthStatus, Product, RetailApi, SetuError};
use tracing::debug;

/// The ten backend endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Products,
    Product,
    Recommend,
    Inventory,
    Checkout,
    Loyalty,
    Fulfillment,
    TryOn,
    Chat,
    User,
}

/// One recorded call with the arguments it was issued with.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    ListProducts,
    GetProduct(u64),
    Recommend {
        category: Option<String>,
        user_input: Option<String>,
        user_id: String,
    },
    CheckInventory(u64),
    Checkout(CheckoutRequest),
    ApplyLoyalty {
        user_id: String,
        order_amount: f64,
    },
    Fulfillment(FulfillmentRequest),
    VirtualTryOn(TryOnRequest),
    Chat(ChatRequest),
    UserProfile(String),
}

impl BackendCall {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            BackendCall::ListProducts => Endpoint::Products,
            BackendCall::GetProduct(_) => Endpoint::Product,
            BackendCall::Recommend { .. } => Endpoint::Recommend,
            BackendCall::CheckInventory(_) => Endpoint::Inventory,
            BackendCall::Checkout(_) => Endpoint::Checkout,
            BackendCall::ApplyLoyalty { .. } => Endpoint::Loyalty,
            BackendCall::Fulfillment(_) => Endpoint::Fulfillment,
            BackendCall::VirtualTryOn(_) => Endpoint::TryOn,
            BackendCall::Chat(_) => Endpoint::Chat,
            BackendCall::UserProfile(_) => Endpoint::User,
        }
    }
}

/// How an endpoint should fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// The backend could not be reached.
    Transport,
    /// Non-success status with a plain string `detail`.
    Status(u16, String),
    /// HTTP 400 with `{"status": "failed", ...}` as returned for a declined payment.
    PaymentDeclined,
}

impl Failure {
    fn to_error(&self) -> SetuError {
        match self {
            Failure::Transport => SetuError::Transport {
                message: "connection refused".into(),
                source: None,
            },
            Failure::Status(status, detail) => SetuError::Backend {
                status: *status,
                message: detail.clone(),
                detail: Some(serde_json::Value::String(detail.clone())),
            },
            Failure::PaymentDeclined => SetuError::Backend {
                status: 400,
                message: "Payment Failed. Please try again.".into(),
                detail: Some(serde_json::json!({
                    "status": "failed",
                    "message": "Payment Failed. Please try again.",
                    "order_id": null
                })),
            },
        }
    }
}

struct State {
    products: Vec<Product>,
    chat_replies: VecDeque<ChatResponse>,
    loyalty: Option<LoyaltyResponse>,
    failures: HashMap<Endpoint, Failure>,
    calls: Vec<BackendCall>,
    next_order: u64,
}

/// In-memory [`RetailApi`].
///
/// Clones share state, so a test can hand one clone to the flow under test
/// and inspect calls through another.
#[derive(Clone)]
pub struct MockBackend {
    state: Arc<Mutex<State>>,
}

impl MockBackend {
    /// Creates a backend with an empty catalog.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                products: Vec::new(),
                chat_replies: VecDeque::new(),
                loyalty: None,
                failures: HashMap::new(),
                calls: Vec::new(),
                next_order: 100_001,
            })),
        }
    }

    /// Creates a backend serving the given catalog.
    pub fn with_products(products: Vec<Product>) -> Self {
        let backend = Self::new();
        backend.state().products = products;
        backend
    }

    /// Queues a reply for the next `chat` call. Unqueued calls get an offline reply.
    pub fn push_chat_reply(&self, response: ChatResponse) {
        self.state().chat_replies.push_back(response);
    }

    /// Overrides the computed loyalty response.
    pub fn set_loyalty(&self, response: LoyaltyResponse) {
        self.state().loyalty = Some(response);
    }

    /// Makes every later call to `endpoint` fail.
    pub fn fail(&self, endpoint: Endpoint, failure: Failure) {
        self.state().failures.insert(endpoint, failure);
    }

    /// Stops failing `endpoint`.
    pub fn recover(&self, endpoint: Endpoint) {
        self.state().failures.remove(&endpoint);
    }

    /// All calls so far, in issue order.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.state().calls.clone()
    }

    /// Number of calls that hit `endpoint`.
    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| c.endpoint() == endpoint)
            .count()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("mock backend lock poisoned")
    }

    /// Records the call and returns the configured failure, if any.
    fn record(&self, call: BackendCall) -> Result<(), SetuError> {
        debug!(?call, "mock backend call");
        let endpoint = call.endpoint();
        let mut state = self.state();
        state.calls.push(call);
        match state.failures.get(&endpoint) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    fn find(&self, product_id: u64) -> Result<Product, SetuError> {
        self.state()
            .products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| Failure::Status(404, "Product not found".into()).to_error())
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for MockBackend {
    fn name(&self) -> &str {
        "mock-backend"
    }

    async fn health_check(&self) -> Result<HealthStatus, SetuError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl RetailApi for MockBackend {
    async fn list_products(&self) -> Result<Vec<Product>, SetuError> {
        self.record(BackendCall::ListProducts)?;
        Ok(self.state().products.clone())
    }

    async fn get_product(&self, product_id: u64) -> Result<Product, SetuError> {
        self.record(BackendCall::GetProduct(product_id))?;
        self.find(product_id)
    }

    async fn recommend(
        &self,
        category: Option<&str>,
        user_input: Option<&str>,
        user_id: &str,
    ) -> Result<RecommendResponse, SetuError> {
        self.record(BackendCall::Recommend {
            category: category.map(str::to_string),
            user_input: user_input.map(str::to_string),
            user_id: user_id.to_string(),
        })?;
        let recommendations: Vec<Product> = self
            .state()
            .products
            .iter()
            .filter(|p| category.is_none_or(|c| p.category.eq_ignore_ascii_case(c)))
            .cloned()
            .collect();
        let message = format!("Found {} recommendations for you!", recommendations.len());
        Ok(RecommendResponse {
            recommendations,
            message,
        })
    }

    async fn check_inventory(&self, product_id: u64) -> Result<InventoryResponse, SetuError> {
        self.record(BackendCall::CheckInventory(product_id))?;
        let product = self.find(product_id)?;
        let store_stock = BTreeMap::from([
            ("Mumbai Central".to_string(), 5),
            ("Pune Camp".to_string(), 0),
        ]);
        Ok(InventoryResponse {
            product_id,
            message: format!("{} - Online: 10 units available", product.name),
            product_name: product.name,
            online_stock: 10,
            store_stock,
            available: true,
        })
    }

    async fn checkout(&self, request: &CheckoutRequest) -> Result<CheckoutResponse, SetuError> {
        self.record(BackendCall::Checkout(request.clone()))?;
        let product = self.find(request.product_id)?;
        let order_id = {
            let mut state = self.state();
            let id = state.next_order;
            state.next_order += 1;
            format!("ORD{id}")
        };
        Ok(CheckoutResponse {
            status: "success".into(),
            message: "Payment Successful!".into(),
            order_id,
            product: product.name,
            size: request.size.clone(),
            amount: product.price,
            payment_method: request.payment_method.to_string(),
            timestamp: None,
        })
    }

    async fn apply_loyalty(
        &self,
        user_id: &str,
        order_amount: f64,
    ) -> Result<LoyaltyResponse, SetuError> {
        self.record(BackendCall::ApplyLoyalty {
            user_id: user_id.to_string(),
            order_amount,
        })?;
        if let Some(response) = self.state().loyalty.clone() {
            return Ok(response);
        }
        // 1200 points at half a rupee each, capped at 30% of the order.
        let discount = (1200.0_f64 * 0.5).min(order_amount * 0.3);
        let points = (discount / 0.5) as u64;
        Ok(LoyaltyResponse {
            loyalty_points: 1200,
            discount_points_used: Some(points),
            discount_amount: discount,
            final_amount: Some(order_amount - discount),
            message: format!("Applied {points} loyalty points for ₹{discount:.2} discount"),
        })
    }

    async fn fulfillment(
        &self,
        request: &FulfillmentRequest,
    ) -> Result<FulfillmentResponse, SetuError> {
        self.record(BackendCall::Fulfillment(request.clone()))?;
        let response = match request.fulfillment_type {
            FulfillmentType::HomeDelivery => FulfillmentResponse {
                fulfillment_type: FulfillmentType::HomeDelivery,
                order_id: request.order_id.clone(),
                status: "scheduled".into(),
                message: "Order will be delivered to your address in 3 days".into(),
                estimated_delivery_days: Some(3),
                address: request.address.clone(),
                store_location: None,
                pickup_date: None,
            },
            FulfillmentType::StorePickup => FulfillmentResponse {
                fulfillment_type: FulfillmentType::StorePickup,
                order_id: request.order_id.clone(),
                status: "ready_for_pickup".into(),
                message: format!(
                    "Order ready for pickup at {} in 1-3 days",
                    request.store_location.as_deref().unwrap_or_default()
                ),
                estimated_delivery_days: None,
                address: None,
                store_location: request.store_location.clone(),
                pickup_date: Some(2),
            },
        };
        Ok(response)
    }

    async fn virtual_try_on(&self, request: &TryOnRequest) -> Result<TryOnResponse, SetuError> {
        self.record(BackendCall::VirtualTryOn(request.clone()))?;
        let product = self.find(request.product_id)?;
        Ok(TryOnResponse {
            product_id: product.id,
            message: format!(
                "Virtual try-on preview generated for {} using your photo",
                product.name
            ),
            product_name: product.name,
            tryon_status: "success".into(),
            preview_url: product.image,
            user_image_url: request.user_image_url.clone(),
            fit_rating: "Good Fit".into(),
            recommendation: "Looks great!".into(),
        })
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, SetuError> {
        self.record(BackendCall::Chat(request.clone()))?;
        let queued = self.state().chat_replies.pop_front();
        Ok(queued.unwrap_or_else(|| ChatResponse {
            message: "LLM is not configured.".into(),
            reply: Some("I'm running in offline mode.".into()),
            llm_used: false,
            error: None,
        }))
    }

    async fn user_profile(&self, user_id: &str) -> Result<UserProfile, SetuError> {
        self.record(BackendCall::UserProfile(user_id.to_string()))?;
        Ok(UserProfile {
            user_id: user_id.to_string(),
            name: Some("Test User".into()),
            loyalty_points: 1200,
            preferences: serde_json::Value::Null,
            extra: serde_json::Map::new(),
        })
    }
}
