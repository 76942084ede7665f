// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Home screen: feature overview, agent list and the guided demo entry.

use colored::Colorize;
use setu_core::{Route, SetuError};

use crate::app::{App, Next, navigation};

const FEATURES: [(&str, &str, &str); 3] = [
    (
        "chat",
        "AI Chat Assistant",
        "Get personalized product recommendations through natural conversation",
    ),
    (
        "try-on",
        "Virtual Try-On",
        "See how clothes look on you before buying with our AI-powered try-on",
    ),
    (
        "catalog",
        "Product Catalog",
        "Browse our complete collection of premium fashion items",
    ),
];

const AGENTS: [&str; 5] = [
    "🎯 Recommendation",
    "📦 Inventory",
    "💳 Payment",
    "🚚 Fulfillment",
    "⭐ Loyalty",
];

pub fn run(app: &mut App) -> Result<Next, SetuError> {
    print_home();
    loop {
        let Some(line) = app.read_line(&format!("{}> ", "setu".green()))? else {
            return Ok(Next::Quit);
        };
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        match navigation(word) {
            Some(Next::Go(Route::Home)) => print_home(),
            Some(next) => return Ok(next),
            None => {
                if word != "help" {
                    println!("{}", format!("unknown command: {word}").yellow());
                }
                print_menu();
            }
        }
    }
}

fn print_home() {
    println!();
    println!("{}", "Setu AI".bold().green());
    println!("{}", "Your Smart Retail Companion".bold());
    println!(
        "Experience the future of shopping with AI-powered recommendations, virtual try-on, and seamless checkout"
    );
    println!();
    for (_, title, blurb) in FEATURES {
        println!("  {}", title.bold());
        println!("    {}", blurb.dimmed());
    }
    println!();
    println!("{}", "Powered by Intelligent Agents".bold());
    println!("  {}", AGENTS.join("   "));
    println!();
    print_menu();
}

fn print_menu() {
    let commands: Vec<&str> = FEATURES.iter().map(|(cmd, _, _)| *cmd).collect();
    println!(
        "Go to: {}  ·  🎬 {}  ·  {}",
        commands.join(", ").yellow(),
        "demo".yellow(),
        "quit".yellow()
    );
}
