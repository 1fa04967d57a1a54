//! `[blog]` section configuration.
//!
//! Contains the posts directory, the post file format and the URL templates
//! used to recognize posts and archive listings.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::PathBuf};

/// `[blog]` section in blog.toml.
///
/// # Example
/// ```toml
/// [blog]
/// posts_dir = "posts"
/// post_format = "md"
/// post_url = "/{year}/{month}/{date}-{title}"
///
/// [blog.archive_urls]
/// all = "/archive"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BlogConfig {
    /// Directory holding post files, relative to the site root.
    #[serde(default = "defaults::blog::posts_dir")]
    #[educe(Default = defaults::blog::posts_dir())]
    pub posts_dir: PathBuf,

    /// File extension of post files (without the leading dot).
    #[serde(default = "defaults::blog::post_format")]
    #[educe(Default = defaults::blog::post_format())]
    pub post_format: String,

    /// URL template of a single post.
    /// Placeholders: `{year}`, `{month}`, `{date}`, `{title}`.
    #[serde(default = "defaults::blog::post_url")]
    #[educe(Default = defaults::blog::post_url())]
    pub post_url: String,

    /// Literal archive roots, keyed by alias.
    /// Each path lists every published post.
    #[serde(default = "defaults::blog::archive_urls")]
    #[educe(Default = defaults::blog::archive_urls())]
    pub archive_urls: BTreeMap<String, String>,
}
