// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `setu try-on`: pick a photo, then try products on it.

use std::path::Path;

use colored::Colorize;
use setu_assistant::{Catalog, TryOnError, TryOnSession, UserImage};
use setu_core::SetuError;
use tracing::debug;

use crate::app::{App, Next, navigation};
use crate::render;

#[derive(Debug, PartialEq)]
enum Command<'a> {
    Photo(&'a str),
    Try(u64),
    List,
    Help,
    Go(Next),
    Unknown,
}

fn parse(line: &str) -> Option<Command<'_>> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let command = match verb {
        "" => return None,
        "photo" if !rest.is_empty() => Command::Photo(rest),
        "try" => match rest.trim_start_matches('#').parse() {
            Ok(id) => Command::Try(id),
            Err(_) => Command::Unknown,
        },
        "list" | "ls" => Command::List,
        "help" => Command::Help,
        other => navigation(other).map(Command::Go).unwrap_or(Command::Unknown),
    };
    Some(command)
}

pub async fn run(app: &mut App) -> Result<Next, SetuError> {
    let catalog = Catalog::load(app.api.clone()).await;
    let mut session = TryOnSession::from_config(app.api.clone(), &app.config);

    println!();
    println!("{}", "Try Before You Buy".bold().green());
    println!("Upload your photo and select a product to see how it looks on you");
    if let Some(path) = app.initial_photo.take() {
        load_photo(&mut session, &path).await;
    }
    print_products(&catalog);
    print_help();

    let prompt = format!("{}> ", "try-on".green());
    loop {
        let Some(line) = app.read_line(&prompt)? else {
            return Ok(Next::Quit);
        };
        let Some(command) = parse(&line) else {
            continue;
        };
        match command {
            Command::Photo(path) => load_photo(&mut session, Path::new(path)).await,
            Command::Try(id) => {
                let Some(product) = catalog.find(id).cloned() else {
                    println!("{}", format!("no product #{id}").yellow());
                    continue;
                };
                if session.photo().is_some() {
                    println!("{}", "Processing...".dimmed());
                }
                match session.try_on(product).await {
                    Ok(result) => {
                        println!("{}", render::tryon(result));
                        println!("  {}", "catalog to view details · chat to ask Setu AI".dimmed());
                    }
                    Err(TryOnError::MissingPhoto) => {
                        println!("{}", TryOnError::MissingPhoto.to_string().yellow());
                    }
                    Err(e) => debug!(error = %e, "try-on produced no result"),
                }
            }
            Command::List => print_products(&catalog),
            Command::Help => print_help(),
            Command::Go(next) => return Ok(next),
            Command::Unknown => {
                println!("{}", format!("unknown command: {}", line.trim()).yellow());
                print_help();
            }
        }
    }
}

async fn load_photo(session: &mut TryOnSession, path: &Path) {
    match UserImage::from_path(path).await {
        Ok(image) => {
            println!(
                "{} {}",
                "✓ photo loaded".green(),
                image.file_name().unwrap_or_default()
            );
            session.set_photo(image);
        }
        Err(e) => println!("{}", e.to_string().red()),
    }
}

fn print_products(catalog: &Catalog) {
    println!("{}", "Select a Product to Try On".bold());
    for product in catalog.products() {
        println!("  {}", render::product_line(product));
    }
    println!();
}

fn print_help() {
    println!(
        "  {}  {}  {}  ·  catalog, chat, home, quit",
        "photo <path>".yellow(),
        "try <id>".yellow(),
        "list".yellow()
    );
}
