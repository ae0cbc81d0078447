//! Chat mode rendering.

use super::command::SLASH_COMMANDS;
use crate::api::find_model;
use crate::conversation::{Message, Role, SessionSettings, Transcript};
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header() {
    println!(
        "{} {} {}",
        Style::brand("Apollo AI"),
        Style::warning("BETA"),
        Style::version(format!("v{VERSION}"))
    );
    println!();
}

/// Shown while the transcript holds only the welcome message.
pub fn print_empty_state() {
    println!("  {}", Style::secondary("Customize the model and system prompt with /model and /system."));
    println!(
        "  {}",
        Style::warning("⚠️ If you get rate limit errors, wait a few seconds between messages")
    );
    println!();
}

pub fn print_message(position: usize, message: &Message, copied: bool) {
    let label = match message.role() {
        Role::User => Style::user("you"),
        Role::Assistant => Style::assistant("apollo"),
    };
    let copied_marker = if copied {
        format!(" {}", Style::success("✓ copied"))
    } else {
        String::new()
    };

    println!(
        "{} {label}{copied_marker}",
        Style::secondary(format!("[{position}]"))
    );
    if message.is_warning() {
        println!("{}", Style::failure(message.content()));
    } else {
        println!("{}", message.content());
    }
    println!();
}

pub fn print_transcript(transcript: &Transcript, copied_index: Option<usize>) {
    for (index, message) in transcript.messages().iter().enumerate() {
        print_message(index + 1, message, copied_index == Some(index));
    }
}

/// The error banner shown under the transcript while an error is stored.
pub fn print_error_banner(error: &str) {
    eprintln!(
        "{} {error} {}",
        Style::error("Error:"),
        Style::hint("(/dismiss to clear)")
    );
    eprintln!();
}

pub fn print_config(settings: &SessionSettings, endpoint: &str, has_api_key: bool) {
    let model_name = find_model(&settings.model).map_or("", |m| m.name);

    println!("{}", Style::header("Configuration"));
    println!(
        "  {}       {} {}",
        Style::label("model"),
        Style::value(&settings.model),
        Style::secondary(model_name)
    );
    println!(
        "  {}  {}",
        Style::label("max tokens"),
        Style::value(settings.max_tokens)
    );
    println!(
        "  {}      {}",
        Style::label("system"),
        Style::value(&settings.system_prompt)
    );
    println!(
        "  {}    {}",
        Style::label("endpoint"),
        Style::secondary(endpoint)
    );
    println!(
        "  {}     {}",
        Style::label("api key"),
        if has_api_key {
            Style::success("(set)")
        } else {
            Style::warning("(not set)")
        }
    );
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    for (cmd, desc) in SLASH_COMMANDS {
        println!("  {:12}  {}", Style::command(cmd), Style::secondary(desc));
    }
    println!();
    println!(
        "  {}",
        Style::hint("Wait 2-3 seconds between messages to avoid rate limits.")
    );
    println!();
}

pub fn print_system_prompt(prompt: &str) {
    println!("{}", Style::header("System prompt"));
    println!("  {}", Style::value(prompt));
    println!();
}

pub fn print_success(message: &str) {
    println!("{} {message}", Style::success("✓"));
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}
