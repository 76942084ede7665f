// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned catalog entries.

use setu_core::Product;

/// Product 1: the shirt the demo script and most tests buy.
pub fn oxford_shirt() -> Product {
    Product {
        id: 1,
        name: "Classic Oxford Shirt".into(),
        category: "Shirts".into(),
        color: "White".into(),
        price: 2499.0,
        image: Some("https://images.example/oxford.jpg".into()),
        sizes: vec!["M".into(), "L".into()],
        description: "Crisp cotton oxford for everyday wear".into(),
    }
}

pub fn navy_blazer() -> Product {
    Product {
        id: 2,
        name: "Navy Blazer".into(),
        category: "Blazers".into(),
        color: "Navy".into(),
        price: 5999.0,
        image: None,
        sizes: vec!["S".into(), "M".into(), "L".into()],
        description: "Tailored wool blend blazer".into(),
    }
}

pub fn sample_products() -> Vec<Product> {
    let mut linen = oxford_shirt();
    linen.id = 3;
    linen.name = "Linen Shirt".into();
    linen.color = "Beige".into();
    linen.price = 1999.0;
    linen.image = None;
    vec![oxford_shirt(), navy_blazer(), linen]
}
