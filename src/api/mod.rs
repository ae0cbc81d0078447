mod client;
mod models;
mod reply;

pub use client::{DEFAULT_ENDPOINT, MessagesApi, MessagesClient, MessagesRequest};
pub use models::{DEFAULT_MODEL, MODELS, ModelInfo, find_model, print_models, validate_model};
pub use reply::{
    API_FAILURE_MESSAGE, ApiError, ApiReply, RATE_LIMIT_MESSAGE, UNEXPECTED_FORMAT_MESSAGE,
};
