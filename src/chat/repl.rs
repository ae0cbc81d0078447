use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::ui;
use crate::api::{MessagesApi, print_models};
use crate::clipboard::SystemClipboard;
use crate::conversation::{Session, TurnOutcome};
use crate::ui::{Spinner, Style, is_prompt_cancelled};

/// Interactive front end over one [`Session`].
pub struct ChatRepl<A> {
    session: Session<A>,
    endpoint: String,
    has_api_key: bool,
    clipboard: Option<SystemClipboard>,
}

impl<A: MessagesApi> ChatRepl<A> {
    pub fn new(session: Session<A>, endpoint: String, has_api_key: bool) -> Self {
        Self {
            session,
            endpoint,
            has_api_key,
            clipboard: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_header();
        ui::print_transcript(&self.session.transcript(), None);
        ui::print_empty_state();

        if !self.has_api_key {
            println!(
                "{} No API key configured; requests are sent unauthenticated.\n",
                Style::warning("Warning:")
            );
        }

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkBlue));

        loop {
            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Type a message, /help for commands, Ctrl+C to quit")
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(cmd) => {
                        if !self.handle_command(cmd) {
                            break;
                        }
                    }
                    Input::Text(text) => self.send(text).await,
                },
                Err(e) if is_prompt_cancelled(&e) => {
                    println!();
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    async fn send(&self, text: String) {
        let before = self.session.message_count();
        self.session.set_draft(text);

        let spinner = Spinner::thinking();
        let outcome = self.session.send_draft().await;
        spinner.stop();

        if matches!(outcome, TurnOutcome::Rejected(_)) {
            return;
        }

        // The user's line is already on screen as the answered prompt.
        let transcript = self.session.transcript();
        for (index, message) in transcript.messages().iter().enumerate().skip(before + 1) {
            ui::print_message(index + 1, message, false);
        }

        if let Some(error) = self.session.last_error() {
            ui::print_error_banner(&error);
        }
    }

    fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Clear => {
                self.session.clear();
                ui::print_success("Conversation cleared");
                ui::print_transcript(&self.session.transcript(), None);
                ui::print_empty_state();
            }
            SlashCommand::Config => {
                ui::print_config(&self.session.settings(), &self.endpoint, self.has_api_key);
            }
            SlashCommand::Copy(position) => self.copy(position),
            SlashCommand::Dismiss => {
                self.session.dismiss_error();
                ui::print_success("Error dismissed");
            }
            SlashCommand::Help => ui::print_help(),
            SlashCommand::History => {
                ui::print_transcript(&self.session.transcript(), self.session.copied_index());
            }
            SlashCommand::MaxTokens(value) => match self.session.set_max_tokens(value) {
                Ok(()) => ui::print_success(&format!("Max tokens set to {}", Style::value(value))),
                Err(e) => ui::print_error(&e.to_string()),
            },
            SlashCommand::Model(None) => {
                print_models(Some(&self.session.settings().model));
                println!();
            }
            SlashCommand::Model(Some(model)) => match self.session.set_model(&model) {
                Ok(()) => ui::print_success(&format!("Model set to {}", Style::value(&model))),
                Err(e) => ui::print_error(&e.to_string()),
            },
            SlashCommand::System(None) => {
                ui::print_system_prompt(&self.session.settings().system_prompt);
            }
            SlashCommand::System(Some(prompt)) => {
                self.session.set_system_prompt(prompt);
                ui::print_success("System prompt updated");
            }
            SlashCommand::Quit => return false,
            SlashCommand::Usage(usage) => ui::print_error(&format!("Usage: {usage}")),
            SlashCommand::Unknown(cmd) => ui::print_error(&format!("Unknown command: /{cmd}")),
        }
        true
    }

    fn copy(&mut self, position: Option<usize>) {
        let index = position.map_or_else(
            || self.session.message_count().saturating_sub(1),
            |p| p.saturating_sub(1),
        );

        let mut clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => match SystemClipboard::new() {
                Ok(clipboard) => clipboard,
                Err(e) => {
                    ui::print_error(&e.to_string());
                    return;
                }
            },
        };

        match self.session.copy_message(index, &mut clipboard) {
            Ok(()) => ui::print_success(&format!("Copied message [{}]", index + 1)),
            Err(e) => ui::print_error(&e.to_string()),
        }
        self.clipboard = Some(clipboard);
    }
}
