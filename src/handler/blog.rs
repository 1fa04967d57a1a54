//! The blog content handler.
//!
//! Flow of one negotiation:
//!
//! ```text
//! normalize ─► classify ─┬─ Post ─────────► get_post ──┐
//!                        ├─ Archive ──────► get_posts ─┼─► shared content ─► NegotiatedContent
//!                        └─ Unrecognized ─► fallback.negotiate_content
//! ```
//!
//! Each collaborator is awaited at most once and the first error ends the
//! negotiation unchanged.

use super::{
    BlogError, ContentNegotiator, ContentParser, FallbackHandler, NegotiatedContent, PostSource,
    RequestContext, SectionSource, SharedContentSource,
};
use crate::{
    config::BlogConfig,
    data::{Attributes, ContentRecord},
    url::{ArchiveFilter, Classification, PostRef, UrlPatterns, normalize_path},
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::PathBuf;

/// Title attached to every archive listing.
const ARCHIVE_TITLE: &str = "Archive";

/// Serves posts and archive listings, delegating every other path.
///
/// Built once at setup; holds no mutable state.
pub struct BlogHandler {
    patterns: UrlPatterns,
    posts_dir: PathBuf,
    post_format: String,
    parser: Box<dyn ContentParser>,
    posts: Box<dyn PostSource>,
    fallback: Box<dyn FallbackHandler>,
}

impl BlogHandler {
    pub fn new(
        config: &BlogConfig,
        parser: Box<dyn ContentParser>,
        posts: Box<dyn PostSource>,
        fallback: Box<dyn FallbackHandler>,
    ) -> Result<Self> {
        Ok(Self {
            patterns: UrlPatterns::from_config(config)?,
            posts_dir: config.posts_dir.clone(),
            post_format: config.post_format.clone(),
            parser,
            posts,
            fallback,
        })
    }

    pub fn patterns(&self) -> &UrlPatterns {
        &self.patterns
    }

    /// Classify a request path, after stripping `/index` and trailing slashes.
    pub fn classify(&self, path: &str) -> Classification {
        self.patterns.classify(normalize_path(path))
    }

    /// File holding a post: `{posts_dir}/{year}-{month}-{date}-{title}.{post_format}`.
    pub fn post_file_path(&self, post: &PostRef) -> PathBuf {
        self.posts_dir.join(format!(
            "{:04}-{:02}-{:02}-{}.{}",
            post.year, post.month, post.date, post.title, self.post_format
        ))
    }

    /// Parse the post behind a post path, body included.
    pub async fn get_post(&self, path: &str) -> Result<ContentRecord> {
        let post = self
            .patterns
            .post_ref(normalize_path(path))
            .ok_or_else(|| BlogError::ContentNotFound(path.to_owned()))?;

        let file = self.post_file_path(&post);
        self.parser.parse_content(&file, true).await
    }

    /// List the published posts behind an archive path.
    ///
    /// Returns `{ "posts": [...] }` and the modification time of the whole
    /// post collection.
    pub async fn get_posts(&self, path: &str) -> Result<(Attributes, DateTime<Utc>)> {
        match self.classify(path) {
            Classification::Archive(filter) => self.archive_posts(&filter).await,
            _ => Err(BlogError::ContentNotFound(path.to_owned()).into()),
        }
    }

    async fn archive_posts(&self, filter: &ArchiveFilter) -> Result<(Attributes, DateTime<Utc>)> {
        let store = self.posts.all_posts().await?;
        let posts = serde_json::to_value(store.query(filter))?;

        let mut content = Attributes::new();
        content.insert("posts".into(), posts);
        Ok((content, store.last_modified()))
    }

    /// Fetch shared content and attach the page-kind attributes.
    async fn complete(
        &self,
        mut content: Attributes,
        last_modified: DateTime<Utc>,
        attributes: &[(&str, Value)],
    ) -> Result<NegotiatedContent> {
        let shared = self.fallback.shared_content().await?;

        for (key, value) in attributes {
            content.insert((*key).to_owned(), value.clone());
        }

        Ok(NegotiatedContent {
            content,
            shared: shared.attributes,
            last_modified: last_modified.max(shared.last_modified),
        })
    }
}

#[async_trait]
impl ContentNegotiator for BlogHandler {
    async fn negotiate_content(
        &self,
        path: &str,
        extension: &str,
        ctx: &RequestContext,
    ) -> Result<NegotiatedContent> {
        match self.classify(path) {
            Classification::Post(_) => {
                let post = self.get_post(path).await?;
                self.complete(
                    post.attributes,
                    post.last_modified,
                    &[("is_post", Value::Bool(true))],
                )
                .await
            }
            Classification::Archive(filter) => {
                let (content, last_modified) = self.archive_posts(&filter).await?;
                self.complete(
                    content,
                    last_modified,
                    &[
                        ("is_post", Value::Bool(false)),
                        ("title", Value::String(ARCHIVE_TITLE.into())),
                    ],
                )
                .await
            }
            Classification::Unrecognized => {
                self.fallback.negotiate_content(path, extension, ctx).await
            }
        }
    }
}

#[async_trait]
impl SectionSource for BlogHandler {
    fn is_section(&self, path: &str) -> bool {
        self.classify(path).is_recognized() || self.fallback.is_section(path)
    }

    async fn get_sections(&self) -> Result<Vec<String>> {
        self.fallback.get_sections().await
    }
}
