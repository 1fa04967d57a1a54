//! Minimal fallback handler backed by the `[shared]` config table.
//!
//! It owns no sections and no pages of its own: every path it receives is
//! answered with [`BlogError::ContentNotFound`]. Its only real job is to
//! supply the shared attributes merged into blog pages.

use super::{
    BlogError, ContentNegotiator, NegotiatedContent, RequestContext, SectionSource,
    SharedContentSource, fs::table_to_attributes,
};
use crate::{config::SiteConfig, data::ContentRecord, log};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fs;

#[derive(Debug, Clone)]
pub struct StaticFallback {
    shared: ContentRecord,
}

impl StaticFallback {
    /// Shared content comes from `[shared]`; its modification time is the
    /// config file's, or the epoch when there is no config file.
    pub fn new(config: &SiteConfig) -> Self {
        let table = config.shared.clone().into_iter().collect::<toml::Table>();
        let last_modified = fs::metadata(&config.config_path)
            .and_then(|meta| meta.modified())
            .map(DateTime::<Utc>::from)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        Self {
            shared: ContentRecord::new(table_to_attributes(table), last_modified),
        }
    }
}

#[async_trait]
impl ContentNegotiator for StaticFallback {
    async fn negotiate_content(
        &self,
        path: &str,
        extension: &str,
        _ctx: &RequestContext,
    ) -> Result<NegotiatedContent> {
        log!("fallback"; "no content for {path} ({extension})");
        Err(BlogError::ContentNotFound(path.to_owned()).into())
    }
}

#[async_trait]
impl SectionSource for StaticFallback {
    fn is_section(&self, _path: &str) -> bool {
        false
    }

    async fn get_sections(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl SharedContentSource for StaticFallback {
    async fn shared_content(&self) -> Result<ContentRecord> {
        Ok(self.shared.clone())
    }
}
