//! Errors raised while loading or validating `blog.toml`.

use crate::url::PatternError;
use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{0}`")]
    Read(PathBuf, #[source] io::Error),

    #[error("malformed config")]
    Parse(#[from] toml::de::Error),

    #[error("[blog.post_format] `{0}` must be a bare file extension such as `md`")]
    PostFormat(String),

    #[error("[blog.archive_urls.{alias}] `{path}` must start with `/`")]
    ArchiveUrl { alias: String, path: String },

    #[error("[blog.post_url] {0}")]
    PostUrl(#[from] PatternError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::Field;

    #[test]
    fn test_archive_url_names_alias_and_path() {
        let err = ConfigError::ArchiveUrl {
            alias: "old".into(),
            path: "history".into(),
        };
        assert_eq!(
            err.to_string(),
            "[blog.archive_urls.old] `history` must start with `/`"
        );
    }

    #[test]
    fn test_post_url_wraps_pattern_error() {
        let err = ConfigError::from(PatternError::MissingField(
            Field::Month,
            "/{year}/{title}".into(),
        ));
        assert_eq!(
            err.to_string(),
            "[blog.post_url] post template `/{year}/{title}` has no `{month}` placeholder"
        );
    }

    #[test]
    fn test_post_format_shows_value() {
        let err = ConfigError::PostFormat(".md".into());
        assert!(err.to_string().starts_with("[blog.post_format] `.md`"));
    }
}
