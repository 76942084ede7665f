// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `setu catalog`: product list, stock lookups and the checkout form.

use std::str::FromStr;

use colored::Colorize;
use setu_assistant::catalog::STOCK_ALERT;
use setu_assistant::checkout::{self, CheckoutForm};
use setu_assistant::Catalog;
use setu_core::{PaymentMethod, Product, Route, SetuError};
use tracing::debug;

use crate::app::{App, Next, navigation};
use crate::render;

#[derive(Debug, PartialEq)]
enum Command {
    List,
    Stock(u64),
    Buy(u64),
    Try(u64),
    Help,
    Go(Next),
    Unknown,
}

fn parse(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let verb = words.next()?;
    let id = words.next().and_then(|w| w.trim_start_matches('#').parse::<u64>().ok());
    let command = match (verb, id) {
        ("list" | "ls", _) => Command::List,
        ("stock", Some(id)) => Command::Stock(id),
        ("buy", Some(id)) => Command::Buy(id),
        ("try", Some(id)) => Command::Try(id),
        ("help", _) => Command::Help,
        (other, _) => navigation(other).map(Command::Go).unwrap_or(Command::Unknown),
    };
    Some(command)
}

pub async fn run(app: &mut App) -> Result<Next, SetuError> {
    let mut catalog = Catalog::load(app.api.clone()).await;

    println!();
    println!("{}", "Product Catalog".bold().green());
    print_products(&catalog);
    print_help();

    let prompt = format!("{}> ", "catalog".green());
    loop {
        let Some(line) = app.read_line(&prompt)? else {
            return Ok(Next::Quit);
        };
        let Some(command) = parse(&line) else {
            continue;
        };
        match command {
            Command::List => print_products(&catalog),
            Command::Stock(id) => match catalog.check_stock(id).await {
                Ok(stock) => println!("{}", render::inventory(stock)),
                Err(e) => {
                    debug!(error = %e, "stock lookup failed");
                    println!("{}", STOCK_ALERT.red());
                }
            },
            Command::Buy(id) => match catalog.find(id).cloned() {
                Some(product) => buy(app, product).await?,
                None => println!("{}", format!("no product #{id}").yellow()),
            },
            Command::Try(id) => {
                if catalog.find(id).is_some() {
                    return Ok(Next::Go(Route::TryOn));
                }
                println!("{}", format!("no product #{id}").yellow());
            }
            Command::Help => print_help(),
            Command::Go(next) => return Ok(next),
            Command::Unknown => {
                println!("{}", format!("unknown command: {}", line.trim()).yellow());
                print_help();
            }
        }
    }
}

/// Fills the checkout form interactively and submits it.
async fn buy(app: &mut App, product: Product) -> Result<(), SetuError> {
    let mut form = CheckoutForm::for_product(product);
    println!("{}", render::product_line(&form.product));

    let sizes = form.product.sizes.join("/");
    let Some(size) = app.read_line_with(&format!("size ({sizes}): "), &form.size)? else {
        return Ok(());
    };
    form.size = size.trim().to_string();

    let current = form.payment_method.to_string();
    let Some(method) = app.read_line_with("payment (UPI/Card): ", &current)? else {
        return Ok(());
    };
    form.payment_method = match PaymentMethod::from_str(method.trim()) {
        Ok(method) => method,
        Err(_) => {
            println!("{}", format!("unknown payment method: {}", method.trim()).yellow());
            return Ok(());
        }
    };

    let credential = match form.payment_method {
        PaymentMethod::Upi => app.read_line("UPI ID: ")?,
        PaymentMethod::Card => app.read_line("card number: ")?,
    };
    let Some(credential) = credential else {
        return Ok(());
    };
    match form.payment_method {
        PaymentMethod::Upi => form.upi_id = credential,
        PaymentMethod::Card => form.card_number = credential,
    }

    println!("{}", "Processing...".dimmed());
    match checkout::submit(app.api.as_ref(), &form, &app.config.session.user_id).await {
        Ok(result) => println!("{}", render::order(&result)),
        Err(failure) => {
            debug!(error = %failure, "checkout did not complete");
            println!("{}", failure.alert().red());
        }
    }
    Ok(())
}

fn print_products(catalog: &Catalog) {
    if catalog.products().is_empty() {
        println!("{}", "No products available.".dimmed());
    }
    for product in catalog.products() {
        println!("  {}", render::product_line(product));
    }
    println!();
}

fn print_help() {
    println!(
        "  {}  {}  {}  {}  ·  chat, try-on, home, quit",
        "list".yellow(),
        "stock <id>".yellow(),
        "buy <id>".yellow(),
        "try <id>".yellow()
    );
}
