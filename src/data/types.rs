//! Data types for posts and parsed content.
//!
//! These types are serialized to JSON when handed to the renderer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Free-form attributes of a page, as produced by a content parser.
pub type Attributes = Map<String, Value>;

/// A blog post.
///
/// Only `tags`, `published_date` and `published` are inspected by archive
/// queries; everything else rides along in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Stable identifier (file stem for file-backed posts)
    pub id: String,

    /// Tags associated with this post
    pub tags: BTreeSet<String>,

    /// Publication date
    pub published_date: NaiveDate,

    /// Unpublished posts never appear in listings
    pub published: bool,

    /// Remaining front matter and body
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Post {
    pub fn new(id: impl Into<String>, published_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            tags: BTreeSet::new(),
            published_date,
            published: true,
            attributes: Attributes::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Output of a content parser: the attributes of one file and its
/// modification time.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRecord {
    pub attributes: Attributes,
    pub last_modified: DateTime<Utc>,
}

impl ContentRecord {
    pub fn new(attributes: Attributes, last_modified: DateTime<Utc>) -> Self {
        Self {
            attributes,
            last_modified,
        }
    }
}
