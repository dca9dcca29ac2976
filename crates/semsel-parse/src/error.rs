use std::io;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to run parser `{program}`")]
    Unavailable {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("parser exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("parser output is not a list of [tree, tokens] pairs")]
    Decode(#[from] serde_json::Error),
    #[error("malformed bracket tree at offset {offset}: expected {expected}")]
    Malformed { offset: usize, expected: &'static str },
    #[error("token `{leaf}` does not occur in the text at offset {offset}")]
    Unaligned { leaf: String, offset: usize },
    #[error("offset {offset} is outside the text or not on a character boundary (length {len})")]
    OffsetOutOfBounds { offset: usize, len: usize },
}
