mod reader;

pub use reader::{MAX_PROMPT_SIZE, PromptReader};
