//! Post data shared between the handler and its collaborators.
//!
//! # Architecture
//!
//! ```text
//! PostSource::all_posts() ──► PostStore { posts, last_modified }
//!                                   │
//!                                   ▼
//!                    query(&ArchiveFilter) ──► Vec<&Post> (newest first)
//! ```

mod store;
mod types;

pub use store::PostStore;
pub use types::{Attributes, ContentRecord, Post};
