// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text rendering of transcripts, products and flow results.
//!
//! Everything here returns a `String` so screens decide where it is printed.

use colored::Colorize;
use setu_assistant::OrderResult;
use setu_core::api::{InventoryResponse, TryOnResponse};
use setu_core::{ChatMessage, Product, Role};

/// Products shown under a message; the rest are summarized.
const PRODUCT_PREVIEW: usize = 2;

/// `₹2499` for whole amounts, `₹1899.30` otherwise.
pub fn price(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("₹{amount:.0}")
    } else {
        format!("₹{amount:.2}")
    }
}

pub fn message(message: &ChatMessage) -> String {
    let time = message
        .timestamp
        .with_timezone(&chrono::Local)
        .format("%H:%M");
    let author = match message.role {
        Role::Bot => "Setu AI".cyan().bold(),
        Role::User => "You".green().bold(),
    };
    let mut out = format!("{author} {}\n  {}", time.to_string().dimmed(), message.text);

    if let Some(products) = &message.products {
        for product in products.iter().take(PRODUCT_PREVIEW) {
            out.push_str(&format!("\n    • {}", product_line(product)));
        }
        if products.len() > PRODUCT_PREVIEW {
            let more = format!("+{} more", products.len() - PRODUCT_PREVIEW);
            out.push_str(&format!("\n    {}", more.dimmed()));
        }
    }
    if let Some(cta) = &message.cta {
        let hint = format!("[{} → {}] type /open", cta.label, cta.route);
        out.push_str(&format!("\n  {}", hint.yellow()));
    }
    out
}

pub fn product_line(product: &Product) -> String {
    let mut line = format!(
        "#{} {} · {} · {}",
        product.id,
        product.name.bold(),
        product.category,
        price(product.price)
    );
    if !product.sizes.is_empty() {
        line.push_str(&format!(" · sizes {}", product.sizes.join(", ")));
    }
    line
}

pub fn inventory(stock: &InventoryResponse) -> String {
    let mut out = format!(
        "{}\n  Online: {} units",
        stock.product_name.bold(),
        stock.online_stock
    );
    for (store, units) in &stock.store_stock {
        let units = if *units > 0 {
            format!("{units} units").green()
        } else {
            "out of stock".red()
        };
        out.push_str(&format!("\n  {store}: {units}"));
    }
    out
}

pub fn order(result: &OrderResult) -> String {
    let mut out = format!(
        "{}\n  Order ID: {}\n  Product: {} ({})\n  Loyalty discount: -{}\n  Final amount: {}\n  {}",
        "✅ Order placed".green().bold(),
        result.order_id,
        result.product_name,
        result.size,
        price(result.discount_amount),
        price(result.final_amount).bold(),
        result.fulfillment_message,
    );
    if let Some(days) = result.estimated_delivery_days {
        out.push_str(&format!("\n  Estimated delivery: {days} days"));
    }
    out
}

pub fn tryon(result: &TryOnResponse) -> String {
    let mut out = format!(
        "{}\n  {}\n  Fit: {}\n  {}",
        result.product_name.bold(),
        result.message,
        result.fit_rating.green(),
        result.recommendation
    );
    if let Some(preview) = &result.preview_url {
        out.push_str(&format!("\n  Preview: {preview}"));
    }
    out
}
