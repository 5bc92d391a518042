use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to load logo {}: {message}", .path.display())]
    Logo { path: PathBuf, message: String },

    #[error("Failed to encode page content: {0}")]
    Content(String),

    #[error("Failed to write PDF: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
