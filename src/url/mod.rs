//! Blog URL patterns.
//!
//! # Architecture
//!
//! ```text
//! BlogConfig ──► compile() ──────────► post pattern ─────┐
//!          └──► compile_archive_set() ─► archive patterns ┤
//!                                                          ▼
//!                               classify(path) ──► Post | Archive | Unrecognized
//! ```
//!
//! Patterns are compiled once at setup and only read afterwards.

mod classify;
pub mod pattern;

pub use classify::{ArchiveFilter, Classification, Dimension, PostRef, normalize_path};
pub use pattern::{CompiledPattern, Field, PatternError, compile, compile_archive_set, literal};

use crate::config::BlogConfig;

/// The compiled post pattern and archive patterns of a blog.
#[derive(Debug, Clone)]
pub struct UrlPatterns {
    post: CompiledPattern,
    archives: Vec<CompiledPattern>,
}

impl UrlPatterns {
    pub fn from_config(config: &BlogConfig) -> Result<Self, PatternError> {
        Ok(Self {
            post: compile(&config.post_url)?,
            archives: compile_archive_set(config)?,
        })
    }

    pub fn post(&self) -> &CompiledPattern {
        &self.post
    }

    pub fn archives(&self) -> &[CompiledPattern] {
        &self.archives
    }

    /// Classify a normalized request path.
    pub fn classify(&self, path: &str) -> Classification {
        if let Some(post) = self.post_ref(path) {
            return Classification::Post(post);
        }
        match classify::archive_filter(&self.archives, path) {
            Some(filter) => Classification::Archive(filter),
            None => Classification::Unrecognized,
        }
    }

    /// Decode a path against the post pattern only.
    pub fn post_ref(&self, path: &str) -> Option<PostRef> {
        classify::post_ref(&self.post, path)
    }
}
