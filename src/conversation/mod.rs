//! The conversation session: transcript, request parameters and the send-turn cycle.

mod session;
mod settings;
mod transcript;

pub use session::{COPY_FEEDBACK, Rejection, Session, TurnOutcome};
pub use settings::{
    DEFAULT_MAX_TOKENS, DEFAULT_SYSTEM_PROMPT, DEFAULT_THROTTLE, MAX_TOKENS_MAX, MAX_TOKENS_MIN,
    SessionSettings, validate_max_tokens,
};
pub use transcript::{Message, OutboundMessage, Role, SEED_MESSAGE, Transcript, WARNING_MARKER};
