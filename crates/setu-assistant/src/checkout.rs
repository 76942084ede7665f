// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog checkout: validate the form, then checkout, loyalty and
//! fulfillment in that order.
//!
//! Loyalty and fulfillment run unconditionally once checkout succeeded.
//! Nothing is rolled back if one of them fails afterwards: the order placed
//! by the first call stays placed. Submitting again places a second order.

use setu_core::api::{CheckoutRequest, FulfillmentRequest};
use setu_core::{PaymentMethod, Product, RetailApi, SetuError};
use thiserror::Error;
use tracing::{info, warn};

/// Address every catalog order is delivered to.
pub const DELIVERY_ADDRESS: &str = "123 Main Street, City";

/// A required field is missing. Display text is the prompt shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutValidation {
    #[error("Please select a size")]
    MissingSize,
    #[error("Please enter UPI ID")]
    MissingUpiId,
    #[error("Please enter card number")]
    MissingCardNumber,
}

/// Why a submission did not produce an order result.
#[derive(Debug, Error)]
pub enum CheckoutFailure {
    /// Blocked before any request was sent.
    #[error(transparent)]
    Invalid(#[from] CheckoutValidation),
    /// The backend declined the payment.
    #[error("payment declined: {0}")]
    PaymentFailed(#[source] SetuError),
    /// Any other failure of one of the three calls.
    #[error("order failed: {0}")]
    Failed(#[source] SetuError),
}

impl CheckoutFailure {
    /// Text of the alert shown for this failure.
    pub fn alert(&self) -> String {
        match self {
            CheckoutFailure::Invalid(v) => v.to_string(),
            CheckoutFailure::PaymentFailed(_) => "Payment failed. Please try again.".into(),
            CheckoutFailure::Failed(_) => "Error processing order. Please try again.".into(),
        }
    }
}

/// Transient state of the checkout modal.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutForm {
    pub product: Product,
    pub size: String,
    pub payment_method: PaymentMethod,
    pub upi_id: String,
    pub card_number: String,
}

impl CheckoutForm {
    /// Opens the form with the first listed size and UPI pre-selected.
    pub fn for_product(product: Product) -> Self {
        Self {
            size: product.sizes.first().cloned().unwrap_or_default(),
            product,
            payment_method: PaymentMethod::Upi,
            upi_id: String::new(),
            card_number: String::new(),
        }
    }

    /// Checks the fields in the order the form shows them.
    pub fn validate(&self) -> Result<(), CheckoutValidation> {
        if self.size.trim().is_empty() {
            return Err(CheckoutValidation::MissingSize);
        }
        match self.payment_method {
            PaymentMethod::Upi if self.upi_id.trim().is_empty() => {
                Err(CheckoutValidation::MissingUpiId)
            }
            PaymentMethod::Card if self.card_number.trim().is_empty() => {
                Err(CheckoutValidation::MissingCardNumber)
            }
            _ => Ok(()),
        }
    }

    /// Builds the checkout request. Only the credential of the chosen method is sent.
    pub fn to_request(&self, user_id: &str) -> CheckoutRequest {
        let (upi_id, card_number) = match self.payment_method {
            PaymentMethod::Upi => (Some(self.upi_id.trim().to_string()), None),
            PaymentMethod::Card => (None, Some(self.card_number.trim().to_string())),
        };
        CheckoutRequest {
            product_id: self.product.id,
            size: self.size.trim().to_string(),
            payment_method: self.payment_method,
            upi_id,
            card_number,
            user_id: user_id.to_string(),
        }
    }
}

/// Composition of the checkout, loyalty and fulfillment responses.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderResult {
    pub order_id: String,
    pub product_name: String,
    pub size: String,
    pub discount_amount: f64,
    pub final_amount: f64,
    pub fulfillment_message: String,
    pub estimated_delivery_days: Option<u32>,
}

/// Validates `form` and places the order.
///
/// Validation failures return before any request is issued. A declined
/// payment is only recognised on the checkout call itself.
pub async fn submit(
    api: &dyn RetailApi,
    form: &CheckoutForm,
    user_id: &str,
) -> Result<OrderResult, CheckoutFailure> {
    form.validate()?;

    let request = form.to_request(user_id);
    let checkout = api.checkout(&request).await.map_err(|e| {
        if e.is_payment_failed() {
            warn!(product_id = request.product_id, "payment declined");
            CheckoutFailure::PaymentFailed(e)
        } else {
            warn!(product_id = request.product_id, error = %e, "checkout failed");
            CheckoutFailure::Failed(e)
        }
    })?;
    info!(order_id = %checkout.order_id, "order placed");

    let price = form.product.price;
    let loyalty = api
        .apply_loyalty(user_id, price)
        .await
        .map_err(|e| after_checkout("loyalty", &checkout.order_id, e))?;

    let fulfillment = api
        .fulfillment(&FulfillmentRequest::home_delivery(
            checkout.order_id.clone(),
            DELIVERY_ADDRESS,
        ))
        .await
        .map_err(|e| after_checkout("fulfillment", &checkout.order_id, e))?;

    Ok(OrderResult {
        product_name: form.product.name.clone(),
        size: request.size,
        discount_amount: loyalty.discount_amount,
        final_amount: loyalty
            .final_amount
            .unwrap_or(price - loyalty.discount_amount),
        fulfillment_message: fulfillment.message,
        estimated_delivery_days: fulfillment.estimated_delivery_days,
        order_id: checkout.order_id,
    })
}

fn after_checkout(step: &str, order_id: &str, error: SetuError) -> CheckoutFailure {
    // The order already exists at this point.
    warn!(step, order_id, error = %error, "order placed but follow-up call failed");
    CheckoutFailure::Failed(error)
}
