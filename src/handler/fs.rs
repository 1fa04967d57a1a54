//! File-backed content parser and post source.
//!
//! A post file is plain text with optional TOML front matter:
//!
//! ```text
//! +++
//! title = "Hello"
//! date = 2012-02-03
//! tags = ["rust", "life"]
//! +++
//! Body text...
//! ```
//!
//! When `date` is missing, the `YYYY-MM-DD-` prefix of the file name is used.
//! A post's id is its path below the posts directory, without extension and
//! with `/` separators, so equal file names in different folders stay apart.
//!
//! File reads block, so both collaborators run on tokio's blocking pool.

use super::{BlogError, ContentParser, PostSource};
use crate::{
    config::BlogConfig,
    data::{Attributes, ContentRecord, Post, PostStore},
    log,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rayon::prelude::*;
use serde_json::Value;
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};
use tokio::task;
use walkdir::WalkDir;

/// Front matter delimiter line
const FRONT_MATTER_DELIMITER: &str = "+++";

/// Parses content files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsContentParser;

#[async_trait]
impl ContentParser for FsContentParser {
    async fn parse_content(&self, path: &Path, parse_body: bool) -> Result<ContentRecord> {
        let path = path.to_path_buf();
        task::spawn_blocking(move || parse_file(&path, parse_body)).await?
    }
}

/// Loads every post below the posts directory.
#[derive(Debug, Clone)]
pub struct FsPostSource {
    dir: PathBuf,
    format: String,
}

impl FsPostSource {
    pub fn new(config: &BlogConfig) -> Self {
        Self {
            dir: config.posts_dir.clone(),
            format: config.post_format.clone(),
        }
    }

    /// Post files sorted by path, so insertion order is deterministic.
    fn post_files(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| path.extension().is_some_and(|ext| ext == self.format.as_str()))
            .collect()
    }

    fn load(&self) -> Result<PostStore> {
        if !self.dir.is_dir() {
            log!("posts"; "posts directory {} not found", self.dir.display());
            return Ok(PostStore::new(DateTime::<Utc>::UNIX_EPOCH));
        }

        let posts = self
            .post_files()
            .par_iter()
            .map(|path| -> Result<(Post, DateTime<Utc>)> {
                let record = parse_file(path, false)?;
                let last_modified = record.last_modified;
                Ok((post_from_record(&self.dir, path, record)?, last_modified))
            })
            .collect::<Result<Vec<_>>>()?;

        let last_modified = posts
            .iter()
            .map(|(_, modified)| *modified)
            .max()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        log!("posts"; "loaded {} posts from {}", posts.len(), self.dir.display());
        Ok(PostStore::from_posts(
            posts.into_iter().map(|(post, _)| post),
            last_modified,
        ))
    }
}

#[async_trait]
impl PostSource for FsPostSource {
    async fn all_posts(&self) -> Result<PostStore> {
        let source = self.clone();
        task::spawn_blocking(move || source.load()).await?
    }
}

/// Read a content file into a [`ContentRecord`].
///
/// Front matter keys become attributes; with `parse_body` the text after the
/// front matter is stored under `body`.
pub fn parse_file(path: &Path, parse_body: bool) -> Result<ContentRecord> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read `{}`", path.display()))?;
    let modified = fs::metadata(path)
        .and_then(|meta| meta.modified())
        .with_context(|| format!("failed to read modification time of `{}`", path.display()))?;

    let (front_matter, body) = split_front_matter(&text)
        .ok_or_else(|| BlogError::UnterminatedFrontMatter(path.to_path_buf()))?;

    let mut attributes = match front_matter {
        Some(raw) => {
            let table: toml::Table =
                toml::from_str(raw).map_err(|err| BlogError::FrontMatter(path.to_path_buf(), err))?;
            table_to_attributes(table)
        }
        None => Attributes::new(),
    };

    if parse_body {
        attributes.insert("body".into(), Value::String(body.to_owned()));
    }

    Ok(ContentRecord::new(attributes, DateTime::<Utc>::from(modified)))
}

/// Split text into `(front matter, body)`.
///
/// Returns `None` when an opening delimiter is never closed.
fn split_front_matter(text: &str) -> Option<(Option<&str>, &str)> {
    let Some(rest) = text
        .strip_prefix(FRONT_MATTER_DELIMITER)
        .and_then(|rest| rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n")))
    else {
        return Some((None, text));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_DELIMITER {
            let body = &rest[offset + line.len()..];
            return Some((Some(&rest[..offset]), body));
        }
        offset += line.len();
    }
    None
}

/// Build a [`Post`] from a file parsed below `root`.
fn post_from_record(root: &Path, path: &Path, record: ContentRecord) -> Result<Post> {
    let id = post_id(root, path);
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    let mut attributes = record.attributes;

    let published_date = attributes
        .remove("date")
        .and_then(|value| value.as_str().and_then(parse_date))
        .or_else(|| parse_date(&stem))
        .ok_or_else(|| BlogError::MissingDate(path.to_path_buf()))?;

    let tags: BTreeSet<String> = match attributes.remove("tags") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        Some(Value::String(list)) => list
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_owned)
            .collect(),
        _ => BTreeSet::new(),
    };

    let draft = attributes.remove("draft").and_then(|v| v.as_bool());
    let published = attributes
        .remove("published")
        .and_then(|v| v.as_bool())
        .unwrap_or(!draft.unwrap_or(false));

    Ok(Post {
        id,
        tags,
        published_date,
        published,
        attributes,
    })
}

/// `root/life/2012-02-03-notes.md` → `life/2012-02-03-notes`
fn post_id(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .with_extension("")
        .components()
        .map(|part| part.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Parse the leading `YYYY-MM-DD` of a string.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let prefix = s.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Convert a TOML table into JSON attributes.
///
/// TOML datetimes become their string form.
pub fn table_to_attributes(table: toml::Table) -> Attributes {
    table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json(value)))
        .collect()
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(table_to_attributes(table)),
    }
}
