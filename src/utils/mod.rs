//! Utility modules.

pub mod log;
