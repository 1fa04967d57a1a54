//! Blog content handler: post and archive URL classification inside a
//! content delegation pipeline.
//!
//! - [`url`] compiles URL templates and classifies request paths
//! - [`data`] holds posts and answers archive queries
//! - [`handler`] negotiates content for a path, delegating foreign paths
//! - [`config`] loads `blog.toml`

pub mod cli;
pub mod config;
pub mod data;
pub mod handler;
pub mod url;
pub mod utils;
