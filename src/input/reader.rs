use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Largest prompt accepted by `apollo ask`.
pub const MAX_PROMPT_SIZE: usize = 1024 * 1024;

/// Reads a one-shot prompt from a file or stdin.
pub struct PromptReader;

impl PromptReader {
    pub fn read(path: Option<&Path>) -> Result<String> {
        match path {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open prompt file: {}", path.display()))?;
                read_limited(file)
                    .with_context(|| format!("Failed to read prompt file: {}", path.display()))
            }
            None => read_limited(io::stdin().lock()).context("Failed to read prompt from stdin"),
        }
    }
}

/// Reads `reader` to the end, refusing more than [`MAX_PROMPT_SIZE`] bytes.
fn read_limited<R: Read>(reader: R) -> Result<String> {
    let mut buffer = Vec::new();
    reader
        .take(MAX_PROMPT_SIZE as u64 + 1)
        .read_to_end(&mut buffer)?;

    if buffer.len() > MAX_PROMPT_SIZE {
        bail!(
            "Prompt exceeds maximum allowed size (1 MB).\n\n\
             Consider trimming the input."
        );
    }

    String::from_utf8(buffer).context("Prompt is not valid UTF-8")
}
