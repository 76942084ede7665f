// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Product list and stock lookups behind the catalog screen.

use std::sync::Arc;

use setu_core::api::InventoryResponse;
use setu_core::{Product, RetailApi, SetuError};
use tracing::{info, warn};

pub const STOCK_ALERT: &str = "Error checking stock";

pub struct Catalog {
    api: Arc<dyn RetailApi>,
    products: Vec<Product>,
    inventory: Option<InventoryResponse>,
}

impl Catalog {
    /// Fetches the product list. A failure is logged and leaves the list empty.
    pub async fn load(api: Arc<dyn RetailApi>) -> Self {
        let products = match api.list_products().await {
            Ok(products) => {
                info!(count = products.len(), "catalog loaded");
                products
            }
            Err(e) => {
                warn!(error = %e, "failed to load products");
                Vec::new()
            }
        };
        Self {
            api,
            products,
            inventory: None,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, product_id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Result of the last successful stock lookup.
    pub fn inventory(&self) -> Option<&InventoryResponse> {
        self.inventory.as_ref()
    }

    /// Looks up stock for one product. On failure the previous lookup stays shown.
    pub async fn check_stock(&mut self, product_id: u64) -> Result<&InventoryResponse, SetuError> {
        match self.api.check_inventory(product_id).await {
            Ok(inventory) => Ok(self.inventory.insert(inventory)),
            Err(e) => {
                warn!(product_id, error = %e, "stock lookup failed");
                Err(e)
            }
        }
    }
}
