//! Post collection and archive queries.
//!
//! A [`PostStore`] is a read-only snapshot of every post, in the order the
//! post source produced them, plus the newest modification time of the
//! collection. Archive listings are views over it.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, DateTime, Utc};

use super::types::Post;
use crate::url::ArchiveFilter;

/// Snapshot of all posts.
#[derive(Debug, Clone, PartialEq)]
pub struct PostStore {
    posts: Vec<Post>,
    /// Post id → position in `posts`
    index: HashMap<String, usize>,
    last_modified: DateTime<Utc>,
}

impl PostStore {
    /// Create an empty store.
    pub fn new(last_modified: DateTime<Utc>) -> Self {
        Self {
            posts: Vec::new(),
            index: HashMap::new(),
            last_modified,
        }
    }

    /// Build a store keeping the iteration order of `posts`.
    pub fn from_posts(posts: impl IntoIterator<Item = Post>, last_modified: DateTime<Utc>) -> Self {
        let mut store = Self::new(last_modified);
        for post in posts {
            store.insert(post);
        }
        store
    }

    /// Insert or replace a post.
    ///
    /// A post with a known id replaces the old one in place, so insertion
    /// order reflects first appearance.
    pub fn insert(&mut self, post: Post) {
        match self.index.get(&post.id) {
            Some(&slot) => self.posts[slot] = post,
            None => {
                self.index.insert(post.id.clone(), self.posts.len());
                self.posts.push(post);
            }
        }
    }

    /// Published posts matching the filter, newest first.
    ///
    /// Posts sharing a publish date come out in reverse insertion order:
    /// the listing is a stable ascending sort, reversed.
    pub fn query(&self, filter: &ArchiveFilter) -> Vec<&Post> {
        let mut result: Vec<_> = self
            .posts
            .iter()
            .filter(|post| post.published && matches_filter(post, filter))
            .collect();
        result.sort_by_key(|post| post.published_date);
        result.reverse();
        result
    }

    /// Published post count per tag, sorted by tag name.
    pub fn tags(&self) -> BTreeMap<&str, usize> {
        let mut tags = BTreeMap::new();
        for post in self.posts.iter().filter(|p| p.published) {
            for tag in &post.tags {
                *tags.entry(tag.as_str()).or_default() += 1;
            }
        }
        tags
    }

    pub fn iter(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Post> {
        self.index.get(id).map(|&slot| &self.posts[slot])
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

fn matches_filter(post: &Post, filter: &ArchiveFilter) -> bool {
    let date = post.published_date;
    match *filter {
        ArchiveFilter::All => true,
        ArchiveFilter::Tag { ref tag } => post.has_tag(tag),
        ArchiveFilter::Year { year } => date.year() == year,
        ArchiveFilter::Month { year, month } => date.year() == year && date.month() == month,
        ArchiveFilter::Day { year, month, date: day } => {
            date.year() == year && date.month() == month && date.day() == day
        }
    }
}
