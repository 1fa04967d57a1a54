//! Site configuration management for `blog.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                           |
//! |-------------|---------------------------------------------------|
//! | `[blog]`    | Posts directory, post format, post/archive URLs   |
//! | `[shared]`  | Attributes shared by every page (static fallback) |
//!
//! # Example
//!
//! ```toml
//! [blog]
//! posts_dir = "posts"
//! post_format = "md"
//! post_url = "/{year}/{month}/{date}-{title}"
//!
//! [blog.archive_urls]
//! all = "/archive"
//!
//! [shared]
//! site_name = "My Blog"
//! ```
//!
//! The config is loaded once at startup and treated as immutable afterwards.

mod blog;
pub mod defaults;
mod error;

pub use blog::BlogConfig;
pub use error::ConfigError;

use crate::{cli::Cli, url::UrlPatterns};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing blog.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site root; relative paths in `[blog]` are resolved against it
    #[serde(skip)]
    pub root: PathBuf,

    /// Blog settings
    #[serde(default)]
    pub blog: BlogConfig,

    /// Attributes shared by every page
    #[serde(default)]
    pub shared: BTreeMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Read(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load configuration for the given CLI invocation.
    ///
    /// A missing config file is not an error: every `[blog]` field has a default.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.config_path = config_path;
        config.update_with_cli(cli);
        config.validate()?;

        Ok(config)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        Self::update_option(&mut self.blog.posts_dir, cli.posts_dir.as_ref());

        let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("./"));
        self.update_path_with_root(&root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve relative paths against the root directory
    fn update_path_with_root(&mut self, root: &Path) {
        self.root = root.to_path_buf();
        if self.blog.posts_dir.is_relative() {
            self.blog.posts_dir = root.join(&self.blog.posts_dir);
        }
    }

    /// Validate configuration.
    ///
    /// The URL templates are compiled here so a broken template is reported
    /// at startup rather than on the first request.
    pub fn validate(&self) -> Result<()> {
        let format = &self.blog.post_format;
        if format.is_empty() || format.starts_with('.') {
            bail!(ConfigError::PostFormat(format.clone()));
        }

        if let Some((alias, path)) = self
            .blog
            .archive_urls
            .iter()
            .find(|(_, path)| !path.starts_with('/'))
        {
            bail!(ConfigError::ArchiveUrl {
                alias: alias.clone(),
                path: path.clone(),
            });
        }

        UrlPatterns::from_config(&self.blog).map_err(ConfigError::PostUrl)?;

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cli::Commands, url::PatternError};

    fn cli(root: Option<&str>, posts_dir: Option<&str>) -> Cli {
        Cli {
            root: root.map(PathBuf::from),
            config: PathBuf::from("blog.toml"),
            posts_dir: posts_dir.map(PathBuf::from),
            command: Commands::Patterns,
        }
    }

    #[test]
    fn test_from_str_with_shared_table() {
        let config = SiteConfig::from_str(
            r#"
            [shared]
            site_name = "My Blog"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.shared.get("site_name"),
            Some(&toml::Value::String("My Blog".into()))
        );
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let err = SiteConfig::from_str("[blog").unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = SiteConfig::from_path(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Read(path, _)) if path.ends_with("here.toml")
        ));
    }

    #[test]
    fn test_load_without_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let config = SiteConfig::load(&cli(Some(root), None)).unwrap();

        assert_eq!(config.blog.posts_dir, dir.path().join("posts"));
        assert_eq!(config.blog.post_format, "md");
    }

    #[test]
    fn test_load_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("blog.toml"),
            "[blog]\nposts_dir = \"articles\"\npost_format = \"markdown\"\n",
        )
        .unwrap();

        let config = SiteConfig::load(&cli(dir.path().to_str(), None)).unwrap();
        assert_eq!(config.blog.posts_dir, dir.path().join("articles"));
        assert_eq!(config.blog.post_format, "markdown");
        assert_eq!(config.config_path, dir.path().join("blog.toml"));
    }

    #[test]
    fn test_cli_posts_dir_override() {
        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(Some("site"), Some("drafts")));

        assert_eq!(config.blog.posts_dir, PathBuf::from("site/drafts"));
        assert_eq!(config.root, PathBuf::from("site"));
    }

    #[test]
    fn test_absolute_posts_dir_kept() {
        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(Some("site"), Some("/srv/posts")));

        assert_eq!(config.blog.posts_dir, PathBuf::from("/srv/posts"));
    }

    #[test]
    fn test_validate_default_config() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_post_format() {
        let mut config = SiteConfig::default();
        config.blog.post_format = String::new();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("post_format"));
    }

    #[test]
    fn test_validate_dotted_post_format() {
        let mut config = SiteConfig::default();
        config.blog.post_format = ".md".into();

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::PostFormat(format)) if format == ".md"
        ));
    }

    #[test]
    fn test_validate_relative_archive_url() {
        let mut config = SiteConfig::default();
        config
            .blog
            .archive_urls
            .insert("all".into(), "archive".into());

        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "[blog.archive_urls.all] `archive` must start with `/`"
        );
    }

    #[test]
    fn test_validate_accepts_braces_in_archive_url() {
        let mut config = SiteConfig::default();
        config.blog.archive_urls.insert("odd".into(), "/a{b}".into());

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_broken_post_url() {
        let mut config = SiteConfig::default();
        config.blog.post_url = "/{year}/{slug}".into();

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::PostUrl(PatternError::UnknownField(name, _))) if name == "slug"
        ));
    }
}
