//! Handler error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the blog handler and its file-backed collaborators.
#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Content for {0} not found")]
    ContentNotFound(String),

    #[error("Invalid front matter in `{0}`")]
    FrontMatter(PathBuf, #[source] toml::de::Error),

    #[error("Unterminated front matter in `{0}`")]
    UnterminatedFrontMatter(PathBuf),

    #[error("Post `{0}` has no publish date")]
    MissingDate(PathBuf),
}
