//! Content negotiation for blog paths.
//!
//! # Architecture
//!
//! ```text
//!                       ┌──────────────────────────────┐
//!  negotiate_content ──►│ BlogHandler                  │
//!                       │  classify(path)              │
//!                       └──┬──────────┬─────────────┬──┘
//!                   Post   │  Archive │ Unrecognized│
//!                          ▼          ▼             ▼
//!                ContentParser   PostSource     FallbackHandler
//!                          │          │        (negotiate_content)
//!                          └────┬─────┘
//!                               ▼
//!                 SharedContentSource (fallback)
//!                               ▼
//!                       NegotiatedContent
//! ```
//!
//! Every collaborator is a capability trait. The blog handler and the
//! fallback handler both implement [`ContentNegotiator`] and
//! [`SectionSource`]; the classifier's `Unrecognized` branch picks the
//! fallback.

mod blog;
mod error;
pub mod fallback;
pub mod fs;

pub use blog::BlogHandler;
pub use error::BlogError;
pub use fallback::StaticFallback;
pub use fs::{FsContentParser, FsPostSource};

use crate::data::{Attributes, ContentRecord, PostStore};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Request-scoped options passed through to the fallback handler untouched.
pub type RequestContext = Attributes;

/// Result of a successful negotiation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NegotiatedContent {
    /// Page attributes (post fields or archive listing)
    pub content: Attributes,

    /// Attributes common to every page
    pub shared: Attributes,

    /// Latest modification time of everything that went into the page
    pub last_modified: DateTime<Utc>,
}

/// Parses a single content file.
#[async_trait]
pub trait ContentParser: Send + Sync {
    async fn parse_content(&self, path: &Path, parse_body: bool) -> Result<ContentRecord>;
}

/// Supplies every post at once.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn all_posts(&self) -> Result<PostStore>;
}

/// Supplies the attributes shared by every page.
#[async_trait]
pub trait SharedContentSource: Send + Sync {
    async fn shared_content(&self) -> Result<ContentRecord>;
}

/// Decides which paths are sections and lists them.
#[async_trait]
pub trait SectionSource: Send + Sync {
    fn is_section(&self, path: &str) -> bool;

    async fn get_sections(&self) -> Result<Vec<String>>;
}

/// Turns a request path into page content.
#[async_trait]
pub trait ContentNegotiator: Send + Sync {
    async fn negotiate_content(
        &self,
        path: &str,
        extension: &str,
        ctx: &RequestContext,
    ) -> Result<NegotiatedContent>;
}

/// Everything the blog handler needs from the handler it falls back to.
pub trait FallbackHandler: ContentNegotiator + SectionSource + SharedContentSource {}

impl<T> FallbackHandler for T where T: ContentNegotiator + SectionSource + SharedContentSource {}
