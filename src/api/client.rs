use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use tracing::debug;

use crate::conversation::OutboundMessage;

pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Body of a single Messages API call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<OutboundMessage>,
}

/// The outbound call a session makes once per turn.
///
/// Implementations return the parsed JSON body whatever the HTTP status was.
/// An `Err` means the call itself failed (connection, body not JSON).
pub trait MessagesApi {
    fn create_message(
        &self,
        request: &MessagesRequest,
    ) -> impl Future<Output = Result<Value>> + Send;
}

/// reqwest-backed client for `{endpoint}/v1/messages`.
pub struct MessagesClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl MessagesClient {
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        Self::with_http_client(Client::new(), endpoint, api_key)
    }

    /// Uses a preconfigured reqwest client (proxy, timeouts).
    pub fn with_http_client(
        client: Client,
        endpoint: String,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }

    pub fn url(&self) -> String {
        format!("{}/v1/messages", self.endpoint.trim_end_matches('/'))
    }
}

impl MessagesApi for MessagesClient {
    async fn create_message(&self, request: &MessagesRequest) -> Result<Value> {
        let url = self.url();
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            max_tokens = request.max_tokens,
            "sending messages request"
        );

        let mut http_request = self.client.post(&url).json(request);

        if let Some(api_key) = &self.api_key {
            http_request = http_request
                .header("x-api-key", api_key)
                .header("anthropic-version", ANTHROPIC_VERSION);
        }

        let response = http_request
            .send()
            .await
            .with_context(|| format!("Failed to connect to API endpoint: {url}"))?;

        let status = response.status();
        debug!(%status, "messages response received");

        response
            .json::<Value>()
            .await
            .with_context(|| format!("Failed to parse API response (status {status})"))
    }
}
