// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `setu chat`: the persisted conversation with the assistant.

use std::str::FromStr;

use colored::Colorize;
use setu_assistant::{ChatOptions, ChatSession, ChatTurn, QuickReply};
use setu_core::SetuError;
use strum::IntoEnumIterator;
use tracing::debug;

use crate::app::{App, Next, navigation};
use crate::render;

#[derive(Debug, PartialEq)]
enum Input<'a> {
    Blank,
    Say(&'a str),
    Quick(QuickReply),
    /// Follow the call to action of the latest bot message.
    Open,
    Clear,
    Help,
    Go(Next),
    Unknown(&'a str),
}

fn parse(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Input::Blank;
    }
    if !line.starts_with('/') {
        return Input::Say(line);
    }
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };
    match command {
        "/open" => Input::Open,
        "/clear" => Input::Clear,
        "/help" => Input::Help,
        "/quick" => QuickReply::from_str(arg)
            .map(Input::Quick)
            .unwrap_or(Input::Unknown(line)),
        other => navigation(other).map(Input::Go).unwrap_or(Input::Unknown(line)),
    }
}

pub async fn run(app: &mut App) -> Result<Next, SetuError> {
    let repo = app.sessions().await?;
    let mut chat = ChatSession::open(
        app.api.clone(),
        repo,
        ChatOptions::from_config(&app.config),
    )
    .await?;

    println!();
    println!("{}", "Setu AI Assistant".bold().green());
    println!("Type {} for commands.\n", "/help".yellow());
    print_transcript(&chat);

    let prompt = format!("{}> ", "you".green());
    let mut initial = String::new();
    loop {
        let Some(line) = app.read_line_with(&prompt, &initial)? else {
            return Ok(Next::Quit);
        };
        initial.clear();

        match parse(&line) {
            Input::Blank => {}
            Input::Say(text) => {
                println!("{}", "Setu AI is typing...".dimmed());
                match chat.send(text).await {
                    Ok(ChatTurn::Ignored) => {}
                    Ok(turn) => {
                        if let ChatTurn::Unavailable { error, .. } = &turn {
                            debug!(error = %error, "assistant unavailable");
                        }
                        if let Some(reply) = turn.reply() {
                            println!("{}\n", render::message(reply));
                        }
                    }
                    Err(e) => eprintln!("{}: could not save the session: {e}", "error".red()),
                }
            }
            Input::Quick(reply) => initial = reply.text().to_string(),
            Input::Open => {
                let target = chat
                    .transcript()
                    .iter()
                    .rev()
                    .find_map(|m| m.cta.as_ref().map(|cta| cta.route));
                match target {
                    Some(route) => return Ok(Next::Go(route)),
                    None => println!("{}", "nothing to open yet".dimmed()),
                }
            }
            Input::Clear => match chat.clear().await {
                Ok(()) => print_transcript(&chat),
                Err(e) => eprintln!("{}: could not clear the session: {e}", "error".red()),
            },
            Input::Help => print_help(),
            Input::Go(next) => return Ok(next),
            Input::Unknown(line) => {
                println!("{}", format!("unknown command: {line}").yellow());
                print_help();
            }
        }
    }
}

fn print_transcript(chat: &ChatSession) {
    for message in chat.transcript() {
        println!("{}\n", render::message(message));
    }
}

fn print_help() {
    let quick: Vec<String> = QuickReply::iter().map(|q| q.to_string()).collect();
    println!("  /quick <{}>  prefill a suggestion", quick.join("|"));
    println!("  /open         follow the latest suggestion");
    println!("  /clear        start a new conversation");
    println!("  /home /catalog /try-on /quit");
}

#[cfg(test)]
mod tests {
    use super::*;
    use setu_core::Route;

    #[test]
    fn plain_text_is_said_trimmed() {
        assert_eq!(parse("  Show me shirts "), Input::Say("Show me shirts"));
        assert_eq!(parse("   "), Input::Blank);
    }

    #[test]
    fn quick_replies_by_name() {
        assert_eq!(parse("/quick try-on"), Input::Quick(QuickReply::TryOn));
        assert_eq!(parse("/quick loyalty"), Input::Quick(QuickReply::Loyalty));
        assert_eq!(parse("/quick socks"), Input::Unknown("/quick socks"));
    }

    #[test]
    fn slash_commands() {
        assert_eq!(parse("/open"), Input::Open);
        assert_eq!(parse("/clear"), Input::Clear);
        assert_eq!(parse("/catalog"), Input::Go(Next::Go(Route::Catalog)));
        assert_eq!(parse("/quit"), Input::Go(Next::Quit));
        assert_eq!(parse("/dance"), Input::Unknown("/dance"));
    }
}
