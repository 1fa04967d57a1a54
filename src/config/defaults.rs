//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [blog] Section Defaults
// ============================================================================

pub mod blog {
    use std::{collections::BTreeMap, path::PathBuf};

    pub fn posts_dir() -> PathBuf {
        "posts".into()
    }

    pub fn post_format() -> String {
        "md".into()
    }

    pub fn post_url() -> String {
        "/{year}/{month}/{date}-{title}".into()
    }

    pub fn archive_urls() -> BTreeMap<String, String> {
        BTreeMap::from([("all".into(), "/archive".into())])
    }
}
