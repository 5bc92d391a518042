use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to open PDF {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("Text backend '{backend}' failed: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },

    #[error("Text backend '{backend}' produced no text")]
    EmptyText { backend: &'static str },

    #[error("Unknown text backend: {0} (expected layout, lopdf or pdf-extract)")]
    UnknownBackend(String),

    #[error("Invalid file pattern: {0}")]
    Pattern(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
