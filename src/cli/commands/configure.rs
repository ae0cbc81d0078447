//! Configure command handler for editing default settings.

use anyhow::Result;
use inquire::validator::Validation;
use inquire::{CustomType, CustomUserError, Select, Text};

use crate::api::{DEFAULT_MODEL, MODELS};
use crate::config::{ApolloConfig, ConfigManager};
use crate::conversation::{
    DEFAULT_MAX_TOKENS, DEFAULT_SYSTEM_PROMPT, MAX_TOKENS_MAX, MAX_TOKENS_MIN,
};
use crate::ui::{Style, handle_prompt_cancellation};

/// Runs the configure command.
///
/// With `show`, prints the stored defaults. Otherwise asks for the default
/// model, system prompt and token budget and saves them.
pub fn run_configure(show: bool) -> Result<()> {
    let manager = ConfigManager::new()?;

    if show {
        let config = manager.load()?;
        print_current_defaults(&manager, &config.apollo);
        return Ok(());
    }

    handle_prompt_cancellation(|| run_configure_inner(&manager))
}

fn run_configure_inner(manager: &ConfigManager) -> Result<()> {
    let mut config = manager.load()?;
    print_current_defaults(manager, &config.apollo);

    let model = select_model(config.apollo.model.as_deref())?;
    let system_prompt = Text::new("Default system prompt:")
        .with_default(
            config
                .apollo
                .system_prompt
                .as_deref()
                .unwrap_or(DEFAULT_SYSTEM_PROMPT),
        )
        .prompt()?;
    let max_tokens = CustomType::<u32>::new("Default max tokens:")
        .with_default(config.apollo.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS))
        .with_error_message("Please enter a whole number")
        .with_validator(|value: &u32| -> Result<Validation, CustomUserError> {
            if (MAX_TOKENS_MIN..=MAX_TOKENS_MAX).contains(value) {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid(
                    format!("Must be between {MAX_TOKENS_MIN} and {MAX_TOKENS_MAX}").into(),
                ))
            }
        })
        .prompt()?;

    config.apollo.model = Some(model);
    config.apollo.system_prompt = Some(system_prompt.trim().to_string());
    config.apollo.max_tokens = Some(max_tokens);

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

fn print_current_defaults(manager: &ConfigManager, config: &ApolloConfig) {
    let show = |value: Option<String>| value.map_or_else(|| Style::secondary("(not set)"), Style::value);

    println!(
        "{} {}",
        Style::header("Current defaults"),
        Style::secondary(manager.config_path().display())
    );
    println!("  {}       {}", Style::label("model"), show(config.model.clone()));
    println!(
        "  {}      {}",
        Style::label("system"),
        show(config.system_prompt.clone())
    );
    println!(
        "  {}  {}",
        Style::label("max tokens"),
        show(config.max_tokens.map(|n| n.to_string()))
    );
    println!(
        "  {}    {}",
        Style::label("endpoint"),
        show(config.endpoint.clone())
    );
    println!(
        "  {}     {}",
        Style::label("api key"),
        if config.get_api_key().is_some() {
            Style::success("(set)")
        } else {
            Style::secondary("(not set)")
        }
    );
    println!();
}

fn select_model(default: Option<&str>) -> Result<String> {
    // Options are shown as "id - Name"
    let options: Vec<String> = MODELS
        .iter()
        .map(|m| format!("{} - {}", m.id, m.name))
        .collect();

    let default_id = default.unwrap_or(DEFAULT_MODEL);
    let default_index = MODELS.iter().position(|m| m.id == default_id).unwrap_or(0);

    let selection = Select::new("Default model:", options)
        .with_starting_cursor(default_index)
        .prompt()?;

    let id = selection.split(" - ").next().unwrap_or(&selection);
    Ok(id.to_string())
}
