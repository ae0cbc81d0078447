use inquire::autocompletion::{Autocomplete, Replacement};

// Available slash commands: (command, description)
pub const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/clear", "Clear the conversation"),
    ("/config", "Show current settings"),
    ("/copy", "Copy a message to the clipboard"),
    ("/dismiss", "Dismiss the current error"),
    ("/help", "Show available commands"),
    ("/history", "Show the whole conversation"),
    ("/max-tokens", "Set the max-token budget"),
    ("/model", "Show or select the model"),
    ("/quit", "Exit chat mode"),
    ("/system", "Show or set the system prompt"),
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') || input.contains(char::is_whitespace) {
            return Ok(vec![]);
        }

        Ok(SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        Ok(highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Clear,
    Config,
    /// 1-based position; `None` means the latest message.
    Copy(Option<usize>),
    Dismiss,
    Help,
    History,
    MaxTokens(u32),
    Model(Option<String>),
    System(Option<String>),
    Quit,
    /// A known command with malformed arguments; holds the usage line.
    Usage(&'static str),
    Unknown(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Command(SlashCommand),
    Empty,
}

/// Message text is passed through as typed; only commands are trimmed.
pub fn parse_input(input: &str) -> Input {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Input::Empty;
    }

    trimmed
        .strip_prefix('/')
        .map_or_else(|| Input::Text(input.to_string()), |cmd| Input::Command(parse_slash_command(cmd)))
}

fn parse_slash_command(cmd: &str) -> SlashCommand {
    let (name, rest) = cmd
        .split_once(char::is_whitespace)
        .map_or((cmd, ""), |(name, rest)| (name, rest.trim()));
    let arg = (!rest.is_empty()).then_some(rest);

    match name {
        "clear" => SlashCommand::Clear,
        "config" => SlashCommand::Config,
        "copy" => match arg.map(str::parse::<usize>) {
            None => SlashCommand::Copy(None),
            Some(Ok(n)) if n > 0 => SlashCommand::Copy(Some(n)),
            Some(_) => SlashCommand::Usage("/copy [message number]"),
        },
        "dismiss" => SlashCommand::Dismiss,
        "help" => SlashCommand::Help,
        "history" => SlashCommand::History,
        "max-tokens" => match arg.map(str::parse::<u32>) {
            Some(Ok(n)) => SlashCommand::MaxTokens(n),
            _ => SlashCommand::Usage("/max-tokens <100-8000>"),
        },
        "model" => SlashCommand::Model(arg.map(String::from)),
        "system" => SlashCommand::System(arg.map(String::from)),
        "quit" | "exit" | "q" => SlashCommand::Quit,
        _ => SlashCommand::Unknown(cmd.split_whitespace().collect::<Vec<_>>().join(" ")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn command(input: &str) -> SlashCommand {
        match parse_input(input) {
            Input::Command(cmd) => cmd,
            other => panic!("expected a command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse_input(""), Input::Empty);
        assert_eq!(parse_input("  \t "), Input::Empty);
    }

    #[test]
    fn test_parse_text_input_is_kept_verbatim() {
        assert_eq!(
            parse_input("  What is ownership?  "),
            Input::Text("  What is ownership?  ".to_string())
        );
        assert_eq!(command("  /clear  "), SlashCommand::Clear);
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(command("/clear"), SlashCommand::Clear);
        assert_eq!(command("/config"), SlashCommand::Config);
        assert_eq!(command("/dismiss"), SlashCommand::Dismiss);
        assert_eq!(command("/help"), SlashCommand::Help);
        assert_eq!(command("/history"), SlashCommand::History);
    }

    #[test]
    fn test_parse_quit_aliases() {
        for input in ["/quit", "/exit", "/q"] {
            assert_eq!(command(input), SlashCommand::Quit);
        }
    }

    #[test]
    fn test_parse_copy() {
        assert_eq!(command("/copy"), SlashCommand::Copy(None));
        assert_eq!(command("/copy 3"), SlashCommand::Copy(Some(3)));
        assert!(matches!(command("/copy 0"), SlashCommand::Usage(_)));
        assert!(matches!(command("/copy last"), SlashCommand::Usage(_)));
    }

    #[test]
    fn test_parse_max_tokens() {
        assert_eq!(command("/max-tokens 2000"), SlashCommand::MaxTokens(2000));
        assert!(matches!(command("/max-tokens"), SlashCommand::Usage(_)));
        assert!(matches!(command("/max-tokens lots"), SlashCommand::Usage(_)));
    }

    #[test]
    fn test_parse_model() {
        assert_eq!(command("/model"), SlashCommand::Model(None));
        assert_eq!(
            command("/model claude-opus-4-20250514"),
            SlashCommand::Model(Some("claude-opus-4-20250514".to_string()))
        );
    }

    #[test]
    fn test_parse_system_keeps_inner_spacing() {
        assert_eq!(command("/system"), SlashCommand::System(None));
        assert_eq!(
            command("/system   You are  terse. "),
            SlashCommand::System(Some("You are  terse.".to_string()))
        );
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            command("/frobnicate  now"),
            SlashCommand::Unknown("frobnicate now".to_string())
        );
    }

    #[test]
    fn test_completer_no_suggestions_for_regular_text() {
        let mut completer = SlashCommandCompleter;
        assert!(completer.get_suggestions("hello").unwrap().is_empty());
    }

    #[test]
    fn test_completer_lists_all_for_slash() {
        let mut completer = SlashCommandCompleter;
        let suggestions = completer.get_suggestions("/").unwrap();
        assert_eq!(suggestions.len(), SLASH_COMMANDS.len());
    }

    #[test]
    fn test_completer_filters_by_prefix() {
        let mut completer = SlashCommandCompleter;

        let suggestions = completer.get_suggestions("/c").unwrap();
        assert_eq!(suggestions.len(), 3); // /clear, /config, /copy

        let suggestions = completer.get_suggestions("/m").unwrap();
        assert_eq!(suggestions.len(), 2); // /max-tokens, /model
    }

    #[test]
    fn test_completer_stops_after_arguments() {
        let mut completer = SlashCommandCompleter;
        assert!(completer.get_suggestions("/model claude").unwrap().is_empty());
    }

    #[test]
    fn test_completer_completion() {
        let mut completer = SlashCommandCompleter;
        let suggestion = "/history  Show the whole conversation".to_string();
        let completion = completer.get_completion("/h", Some(suggestion)).unwrap();
        assert_eq!(completion, Some("/history".to_string()));
        assert!(completer.get_completion("/x", None).unwrap().is_none());
    }
}
