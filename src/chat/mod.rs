//! Interactive chat mode.
//!
//! Provides a REPL-style interface with slash commands over a conversation session.

/// Slash command parsing and autocomplete.
pub mod command;
mod repl;
mod ui;

pub use repl::ChatRepl;
