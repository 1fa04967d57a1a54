//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Blog path classifier and archive resolver
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Site root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: blog.toml)
    #[arg(short = 'C', long, default_value = "blog.toml")]
    pub config: PathBuf,

    /// Posts directory path (relative to site root)
    #[arg(short, long)]
    pub posts_dir: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Classify a request path as post, archive or foreign
    Classify {
        /// request path, e.g. `/2012/11/19-test-post`
        path: String,
    },

    /// Resolve a request path to its page content
    Resolve {
        /// request path, e.g. `/tag/rust`
        path: String,

        /// requested output format
        #[arg(short, long, default_value = ".html")]
        ext: String,
    },

    /// Print the compiled post and archive patterns
    Patterns,

    /// List tags with their published post count
    Tags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolve_defaults() {
        let cli = Cli::parse_from(["blogpath", "resolve", "/archive"]);

        assert_eq!(cli.config, PathBuf::from("blog.toml"));
        assert!(matches!(
            cli.command,
            Commands::Resolve { ref path, ref ext } if path == "/archive" && ext == ".html"
        ));
    }

    #[test]
    fn test_parse_global_options() {
        let cli = Cli::parse_from([
            "blogpath",
            "--root",
            "site",
            "--posts-dir",
            "articles",
            "-C",
            "custom.toml",
            "classify",
            "/2012/11/19-test-post",
        ]);

        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert_eq!(cli.posts_dir, Some(PathBuf::from("articles")));
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert!(matches!(cli.command, Commands::Classify { .. }));
    }
}
