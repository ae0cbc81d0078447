use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ResolveOptions;
use crate::conversation::{MAX_TOKENS_MAX, MAX_TOKENS_MIN};

#[derive(Parser, Debug)]
#[command(name = "apollo")]
#[command(about = "Terminal chat client for Claude models")]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Increase diagnostic logging on stderr (-v, -vv)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Request parameters accepted by the chat and ask commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Model identifier (see `apollo models`)
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// System prompt sent with every request
    #[arg(short = 's', long = "system")]
    pub system: Option<String>,

    /// Max-token budget per reply
    #[arg(
        short = 't',
        long,
        value_parser = clap::value_parser!(u32).range(i64::from(MAX_TOKENS_MIN)..=i64::from(MAX_TOKENS_MAX))
    )]
    pub max_tokens: Option<u32>,

    /// API endpoint base URL
    #[arg(short = 'e', long)]
    pub endpoint: Option<String>,
}

impl SessionArgs {
    /// Fills unset fields from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            model: self.model.or(fallback.model),
            system: self.system.or(fallback.system),
            max_tokens: self.max_tokens.or(fallback.max_tokens),
            endpoint: self.endpoint.or(fallback.endpoint),
        }
    }
}

impl From<SessionArgs> for ResolveOptions {
    fn from(args: SessionArgs) -> Self {
        Self {
            model: args.model,
            system_prompt: args.system,
            max_tokens: args.max_tokens,
            endpoint: args.endpoint,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive chat (the default)
    Chat {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Send a single prompt from a file or stdin and print the reply
    Ask {
        /// Prompt file (reads from stdin if not provided)
        file: Option<PathBuf>,

        #[command(flatten)]
        session: SessionArgs,
    },
    /// List the available models
    Models,
    /// Edit default settings
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_chat() {
        let args = Args::try_parse_from(["apollo", "--model", "claude-opus-4-20250514"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.session.model.as_deref(), Some("claude-opus-4-20250514"));
    }

    #[test]
    fn test_max_tokens_range_enforced() {
        assert!(Args::try_parse_from(["apollo", "--max-tokens", "99"]).is_err());
        assert!(Args::try_parse_from(["apollo", "--max-tokens", "8001"]).is_err());

        let args = Args::try_parse_from(["apollo", "--max-tokens", "100"]).unwrap();
        assert_eq!(args.session.max_tokens, Some(100));
    }

    #[test]
    fn test_ask_with_file() {
        let args = Args::try_parse_from(["apollo", "ask", "prompt.txt", "-t", "500"]).unwrap();
        let Some(Command::Ask { file, session }) = args.command else {
            panic!("expected ask");
        };
        assert_eq!(file, Some(PathBuf::from("prompt.txt")));
        assert_eq!(session.max_tokens, Some(500));
    }

    #[test]
    fn test_verbose_counts() {
        let args = Args::try_parse_from(["apollo", "models", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_session_args_or_prefers_self() {
        let sub = SessionArgs {
            model: Some("a".to_string()),
            ..SessionArgs::default()
        };
        let top = SessionArgs {
            model: Some("b".to_string()),
            system: Some("sys".to_string()),
            ..SessionArgs::default()
        };

        let merged = sub.or(top);
        assert_eq!(merged.model.as_deref(), Some("a"));
        assert_eq!(merged.system.as_deref(), Some("sys"));

        let options = ResolveOptions::from(merged);
        assert_eq!(options.system_prompt.as_deref(), Some("sys"));
    }
}
