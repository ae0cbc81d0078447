//! Role-tagged messages and the append-only transcript.

use serde::{Deserialize, Serialize};

/// Welcome text shown before any user interaction.
pub const SEED_MESSAGE: &str = "🚀 **BETA** - Welcome to Apollo AI! This is an experimental interface \
     with full Claude API access. Features may be unstable.";

/// Prefix marking an assistant entry that carries an error.
pub const WARNING_MARKER: &str = "⚠️";

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Seed,
    Turn,
}

/// A single transcript entry. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    role: Role,
    content: String,
    origin: Origin,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            origin: Origin::Turn,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            origin: Origin::Turn,
        }
    }

    /// An assistant entry carrying an error, prefixed with [`WARNING_MARKER`].
    pub fn warning(error: &str) -> Self {
        Self::assistant(format!("{WARNING_MARKER} {error}"))
    }

    /// The welcome entry. Never sent upstream.
    pub fn seed() -> Self {
        Self {
            role: Role::Assistant,
            content: SEED_MESSAGE.to_string(),
            origin: Origin::Seed,
        }
    }

    pub const fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_seed(&self) -> bool {
        self.origin == Origin::Seed
    }

    pub fn is_warning(&self) -> bool {
        self.role == Role::Assistant && self.content.starts_with(WARNING_MARKER)
    }
}

/// A message as it appears in the outbound request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub role: Role,
    pub content: String,
}

/// Chronological, append-only list of messages that always starts from the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self {
            messages: vec![Message::seed()],
        }
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Drops everything back to the single seed entry.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(Message::seed());
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages to send upstream, in order, without the seed.
    pub fn outbound(&self) -> Vec<OutboundMessage> {
        self.messages
            .iter()
            .filter(|m| !m.is_seed())
            .map(|m| OutboundMessage {
                role: m.role,
                content: m.content.clone(),
            })
            .collect()
    }
}
