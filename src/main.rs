//! blogpath - classify blog request paths and resolve their content.
//!
//! Results go to stdout, diagnostics to stderr.

use anyhow::Result;
use blogpath::{
    cli::{Cli, Commands},
    config::SiteConfig,
    handler::{
        BlogHandler, ContentNegotiator, FsContentParser, FsPostSource, PostSource,
        RequestContext, SectionSource, StaticFallback,
    },
    log,
};
use clap::Parser;
use serde::Serialize;
use serde_json::json;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Classify { path } => {
            let handler = build_handler(&config)?;
            print_json(&json!({
                "classification": handler.classify(path),
                "is_section": handler.is_section(path),
            }))
        }
        Commands::Resolve { path, ext } => {
            let handler = build_handler(&config)?;
            let content = handler
                .negotiate_content(path, ext, &RequestContext::new())
                .await?;
            print_json(&content)
        }
        Commands::Patterns => print_patterns(&config),
        Commands::Tags => {
            let store = FsPostSource::new(&config.blog).all_posts().await?;
            let tags = store.tags();
            for (tag, count) in &tags {
                println!("{tag}\t{count}");
            }
            log!("tags"; "{} tags across {} posts", tags.len(), store.len());
            Ok(())
        }
    }
}

/// Wire the blog handler to the file-backed collaborators.
fn build_handler(config: &SiteConfig) -> Result<BlogHandler> {
    BlogHandler::new(
        &config.blog,
        Box::new(FsContentParser),
        Box::new(FsPostSource::new(&config.blog)),
        Box::new(StaticFallback::new(config)),
    )
}

fn print_patterns(config: &SiteConfig) -> Result<()> {
    let handler = build_handler(config)?;
    let patterns = handler.patterns();

    println!("post\t{}", patterns.post().pattern());
    for archive in patterns.archives() {
        let fields: Vec<_> = archive
            .mappings()
            .iter()
            .map(|(field, index)| format!("{field}:{index}"))
            .collect();
        println!("archive\t{}\t[{}]", archive.pattern(), fields.join(", "));
    }
    log!(
        "patterns";
        "{} archive patterns from `{}`",
        patterns.archives().len(),
        config.blog.post_url
    );
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
