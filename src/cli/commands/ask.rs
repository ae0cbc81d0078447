use anyhow::{Result, anyhow, bail};
use std::path::PathBuf;

use super::load_resolved_config;
use crate::api::{MessagesClient, UNEXPECTED_FORMAT_MESSAGE};
use crate::cli::SessionArgs;
use crate::conversation::{Session, TurnOutcome};
use crate::input::PromptReader;
use crate::ui::Spinner;

/// Sends one prompt on a fresh session and prints the reply to stdout.
pub async fn run_ask(file: Option<PathBuf>, args: SessionArgs) -> Result<()> {
    let resolved = load_resolved_config(args)?;
    let prompt = PromptReader::read(file.as_deref())?;

    if prompt.trim().is_empty() {
        bail!("Prompt is empty");
    }

    let client = MessagesClient::new(resolved.endpoint, resolved.api_key);
    let session = Session::new(client, resolved.settings);

    let spinner = Spinner::thinking();
    let outcome = session.send_turn(&prompt).await;
    spinner.stop();

    match outcome {
        TurnOutcome::Reply(text) => {
            println!("{text}");
            Ok(())
        }
        TurnOutcome::ApiError(message) | TurnOutcome::ConnectionError(message) => {
            Err(anyhow!(message))
        }
        TurnOutcome::UnexpectedFormat => bail!(UNEXPECTED_FORMAT_MESSAGE),
        TurnOutcome::Rejected(reason) => bail!("Prompt was not sent: {reason:?}"),
    }
}
