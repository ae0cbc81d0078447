use anyhow::Result;
use tracing::info;

use super::load_resolved_config;
use crate::api::MessagesClient;
use crate::chat::ChatRepl;
use crate::cli::SessionArgs;
use crate::conversation::Session;

pub async fn run_chat(args: SessionArgs) -> Result<()> {
    let resolved = load_resolved_config(args)?;
    info!(
        model = %resolved.settings.model,
        endpoint = %resolved.endpoint,
        "starting chat session"
    );

    let client = MessagesClient::new(resolved.endpoint.clone(), resolved.api_key.clone());
    let session = Session::new(client, resolved.settings);
    let mut repl = ChatRepl::new(session, resolved.endpoint, resolved.api_key.is_some());
    repl.run().await
}
