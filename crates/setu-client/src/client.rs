// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the retail backend.
//!
//! Every endpoint is a single request. Non-success responses are turned into
//! [`SetuError::Backend`] with the backend's `detail` payload preserved, so
//! callers can tell a declined payment apart from any other failure.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use setu_core::api::{
    ChatRequest, ChatResponse, CheckoutRequest, CheckoutResponse, FulfillmentRequest,
    FulfillmentResponse, InventoryRequest, InventoryResponse, LoyaltyRequest, LoyaltyResponse,
    ProductEnvelope, ProductsEnvelope, RecommendRequest, RecommendResponse, TryOnRequest,
    TryOnResponse, UserEnvelope, UserProfile,
};
use setu_core::{Adapter, HealthStatus, Product, RetailApi, SetuError};
use tracing::{debug, warn};

/// Client for the retail backend REST API.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    /// Creates a client for the backend at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, SetuError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SetuError::Config(format!("invalid backend base URL `{base_url}`: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SetuError::Config(format!(
                "backend base URL `{base_url}` cannot carry a path"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| SetuError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client, base_url })
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SetuError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SetuError::Internal(format!("URL `{}` has no path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, SetuError> {
        self.send::<(), T>(Method::GET, segments, None).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, SetuError> {
        self.send(Method::POST, segments, Some(body)).await
    }

    async fn send<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<T, SetuError> {
        let url = self.endpoint(segments)?;
        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| SetuError::Transport {
            message: format!("{method} {url} failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        debug!(%method, path = url.path(), status = %status, "backend response received");

        let text = response.text().await.map_err(|e| SetuError::Transport {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let err = backend_error(status, &text);
            warn!(%method, path = url.path(), error = %err, "backend call failed");
            return Err(err);
        }

        serde_json::from_str(&text).map_err(|e| SetuError::Decode {
            message: format!("unexpected response from {}: {e}", url.path()),
            source: Some(Box::new(e)),
        })
    }
}

/// Builds the error for a non-success response.
///
/// The backend reports failures as `{"detail": ...}` where `detail` is
/// either a plain string or an object with a `message` field.
fn backend_error(status: StatusCode, body: &str) -> SetuError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|mut v| v.get_mut("detail").map(serde_json::Value::take));

    let message = match &detail {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(obj) => obj
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| obj.to_string()),
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };

    SetuError::Backend {
        status: status.as_u16(),
        message,
        detail,
    }
}

#[async_trait]
impl Adapter for HttpClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn health_check(&self) -> Result<HealthStatus, SetuError> {
        match self.client.get(self.base_url.clone()).send().await {
            Ok(resp) if resp.status().is_success() => Ok(HealthStatus::Healthy),
            Ok(resp) => Ok(HealthStatus::Degraded(format!(
                "backend answered {}",
                resp.status()
            ))),
            Err(e) => Ok(HealthStatus::Unhealthy(format!("backend unreachable: {e}"))),
        }
    }
}

#[async_trait]
impl RetailApi for HttpClient {
    async fn list_products(&self) -> Result<Vec<Product>, SetuError> {
        let envelope: ProductsEnvelope = self.get_json(&["products"]).await?;
        Ok(envelope.products)
    }

    async fn get_product(&self, product_id: u64) -> Result<Product, SetuError> {
        let id = product_id.to_string();
        let envelope: ProductEnvelope = self.get_json(&["products", id.as_str()]).await?;
        Ok(envelope.product)
    }

    async fn recommend(
        &self,
        category: Option<&str>,
        user_input: Option<&str>,
        user_id: &str,
    ) -> Result<RecommendResponse, SetuError> {
        let body = RecommendRequest {
            category: category.map(str::to_string),
            user_input: user_input.map(str::to_string),
            user_id: user_id.to_string(),
        };
        self.post_json(&["recommend"], &body).await
    }

    async fn check_inventory(&self, product_id: u64) -> Result<InventoryResponse, SetuError> {
        self.post_json(&["inventory"], &InventoryRequest { product_id })
            .await
    }

    async fn checkout(&self, request: &CheckoutRequest) -> Result<CheckoutResponse, SetuError> {
        self.post_json(&["checkout"], request).await
    }

    async fn apply_loyalty(
        &self,
        user_id: &str,
        order_amount: f64,
    ) -> Result<LoyaltyResponse, SetuError> {
        let body = LoyaltyRequest {
            user_id: user_id.to_string(),
            order_amount,
        };
        self.post_json(&["apply-loyalty"], &body).await
    }

    async fn fulfillment(
        &self,
        request: &FulfillmentRequest,
    ) -> Result<FulfillmentResponse, SetuError> {
        self.post_json(&["fulfillment"], request).await
    }

    async fn virtual_try_on(&self, request: &TryOnRequest) -> Result<TryOnResponse, SetuError> {
        self.post_json(&["virtual-tryon-mock"], request).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, SetuError> {
        self.post_json(&["chat-llm"], request).await
    }

    async fn user_profile(&self, user_id: &str) -> Result<UserProfile, SetuError> {
        let envelope: UserEnvelope = self.get_json(&["user", user_id]).await?;
        Ok(envelope.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use setu_core::PaymentMethod;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn shirt() -> serde_json::Value {
        json!({
            "id": 1,
            "name": "Oxford Shirt",
            "category": "Shirts",
            "color": "White",
            "price": 2499,
            "image": "https://img.example/oxford.jpg",
            "sizes": ["M", "L"],
            "description": "Crisp cotton oxford"
        })
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = HttpClient::new("not a url").unwrap_err();
        assert!(matches!(err, SetuError::Config(_)), "got: {err:?}");
    }

    #[test]
    fn endpoint_appends_segments_after_base_path() {
        let client = HttpClient::new("http://shop.test/api/").unwrap();
        let url = client.endpoint(&["products", "7"]).unwrap();
        assert_eq!(url.as_str(), "http://shop.test/api/products/7");

        let client = HttpClient::new("http://shop.test:8000").unwrap();
        let url = client.endpoint(&["apply-loyalty"]).unwrap();
        assert_eq!(url.as_str(), "http://shop.test:8000/apply-loyalty");
    }

    #[test]
    fn user_id_segment_is_percent_encoded() {
        let client = HttpClient::new("http://shop.test").unwrap();
        let url = client.endpoint(&["user", "a b/c"]).unwrap();
        assert_eq!(url.path(), "/user/a%20b%2Fc");
    }

    #[tokio::test]
    async fn list_products_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": [shirt()]})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(&server.uri()).unwrap();
        let products = client.list_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Oxford Shirt");
        assert_eq!(products[0].sizes, vec!["M", "L"]);
    }

    #[tokio::test]
    async fn get_product_not_found_keeps_string_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/99"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Product not found"})),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new(&server.uri()).unwrap();
        let err = client.get_product(99).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_payment_failed());
        assert!(err.to_string().contains("Product not found"), "got: {err}");
    }

    #[tokio::test]
    async fn recommend_sends_all_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/recommend"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "category": "Shirts",
                "user_input": null,
                "user_id": "user_001"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "recommendations": [shirt()],
                "message": "Found 1 recommendations"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(&server.uri()).unwrap();
        let resp = client
            .recommend(Some("Shirts"), None, "user_001")
            .await
            .unwrap();
        assert_eq!(resp.recommendations.len(), 1);
    }

    #[tokio::test]
    async fn inventory_posts_product_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/inventory"))
            .and(body_json(json!({"product_id": 1})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "product_id": 1,
                "product_name": "Oxford Shirt",
                "online_stock": 12,
                "store_stock": {"store_1": 4},
                "available": true,
                "message": "Oxford Shirt - Online: 12 units available"
            })))
            .mount(&server)
            .await;

        let client = HttpClient::new(&server.uri()).unwrap();
        let resp = client.check_inventory(1).await.unwrap();
        assert_eq!(resp.online_stock, 12);
        assert_eq!(resp.store_stock["store_1"], 4);
    }

    #[tokio::test]
    async fn declined_payment_is_reported_as_payment_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/checkout"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "detail": {
                    "status": "failed",
                    "message": "Payment Failed. Please try again.",
                    "order_id": null
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(&server.uri()).unwrap();
        let request = CheckoutRequest {
            product_id: 1,
            size: "M".into(),
            payment_method: PaymentMethod::Upi,
            upi_id: Some("asha@upi".into()),
            card_number: None,
            user_id: "user_001".into(),
        };
        let err = client.checkout(&request).await.unwrap_err();
        assert!(err.is_payment_failed());
        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("Payment Failed"), "got: {err}");
    }

    #[tokio::test]
    async fn loyalty_and_fulfillment_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/apply-loyalty"))
            .and(body_json(json!({"user_id": "user_001", "order_amount": 2499.0})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "loyalty_points": 1200,
                "discount_points_used": 200,
                "discount_amount": 200,
                "final_amount": 2299,
                "message": "Applied 200 points"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/fulfillment"))
            .and(body_json(json!({
                "order_id": "ORD1",
                "fulfillment_type": "home_delivery",
                "address": "123 Main Street, City",
                "store_location": null
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "fulfillment_type": "home_delivery",
                "order_id": "ORD1",
                "status": "scheduled",
                "message": "Delivery scheduled",
                "estimated_delivery_days": 3,
                "address": "123 Main Street, City"
            })))
            .mount(&server)
            .await;

        let client = HttpClient::new(&server.uri()).unwrap();
        let loyalty = client.apply_loyalty("user_001", 2499.0).await.unwrap();
        assert_eq!(loyalty.final_amount, Some(2299.0));

        let fulfillment = client
            .fulfillment(&FulfillmentRequest::home_delivery("ORD1", "123 Main Street, City"))
            .await
            .unwrap();
        assert_eq!(fulfillment.estimated_delivery_days, Some(3));
    }

    #[tokio::test]
    async fn try_on_and_chat_use_hyphenated_paths() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/virtual-tryon-mock"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "product_id": 1,
                "product_name": "Oxford Shirt",
                "tryon_status": "success",
                "preview_url": "https://img.example/oxford.jpg",
                "user_image_url": "data:image/png;base64,AAAA",
                "message": "Virtual try-on preview generated",
                "fit_rating": "Good fit",
                "recommendation": "Size M recommended"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat-llm"))
            .and(body_json(json!({
                "message": "Show me shirts",
                "history": ["bot: hello"],
                "user_id": "user_001",
                "include_products": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Here are some shirts",
                "llm_used": true
            })))
            .mount(&server)
            .await;

        let client = HttpClient::new(&server.uri()).unwrap();
        let tryon = client
            .virtual_try_on(&TryOnRequest {
                product_id: 1,
                model_image_url: None,
                user_image_url: Some("data:image/png;base64,AAAA".into()),
            })
            .await
            .unwrap();
        assert_eq!(tryon.fit_rating, "Good fit");

        let chat = client
            .chat(&ChatRequest {
                message: "Show me shirts".into(),
                history: vec!["bot: hello".into()],
                user_id: "user_001".into(),
                include_products: true,
            })
            .await
            .unwrap();
        assert_eq!(chat.message, "Here are some shirts");
        assert!(chat.llm_used);
    }

    #[tokio::test]
    async fn user_profile_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/user_001"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": {"user_id": "user_001", "name": "Asha", "loyalty_points": 1200}
            })))
            .mount(&server)
            .await;

        let client = HttpClient::new(&server.uri()).unwrap();
        let user = client.user_profile("user_001").await.unwrap();
        assert_eq!(user.name.as_deref(), Some("Asha"));
        assert_eq!(user.loyalty_points, 1200);
    }

    #[tokio::test]
    async fn malformed_success_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = HttpClient::new(&server.uri()).unwrap();
        let err = client.list_products().await.unwrap_err();
        assert!(matches!(err, SetuError::Decode { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn server_error_without_json_uses_body_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/inventory"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(&server.uri()).unwrap();
        let err = client.check_inventory(1).await.unwrap_err();
        match err {
            SetuError::Backend {
                status,
                message,
                detail,
            } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
                assert!(detail.is_none());
            }
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        let client = HttpClient::new("http://127.0.0.1:1").unwrap();
        let err = client.list_products().await.unwrap_err();
        assert!(matches!(err, SetuError::Transport { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn health_check_reflects_root_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "running", "message": "Setu AI Retail Backend"})),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new(&server.uri()).unwrap();
        assert_eq!(client.name(), "http");
        assert_eq!(client.health_check().await.unwrap(), HealthStatus::Healthy);
    }
}
