//! Agence Blog - command-line front end for the article pipeline
//!
//! Lists, shows and renders the articles of a content directory.

use std::path::PathBuf;
use std::process::ExitCode;

use agence_blog::{
    fetch_article_page, load_all_articles, load_article, render_html, BlogConfig, BlogError,
    DirectoryStore,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "AGENCE_BLOG_CONFIG")]
    config: Option<PathBuf>,

    /// Directory containing the markdown articles
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List articles, newest first
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one article with its related articles
    Show {
        slug: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the sanitized HTML of one article body
    Render { slug: String },
    /// Print the configuration file location
    ConfigPath,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing_subscriber::filter::LevelFilter::DEBUG
    } else {
        tracing_subscriber::filter::LevelFilter::INFO
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(level)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    // Locating the config must work even when it does not parse
    if let Command::ConfigPath = cli.command {
        match cli.config.or_else(BlogConfig::config_path) {
            Some(path) => println!("{}", path.display()),
            None => println!("(no config directory on this platform)"),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = match &cli.config {
        Some(path) => BlogConfig::load_from(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => BlogConfig::load().context("Failed to load config")?,
    };

    let content_dir = cli.content_dir.unwrap_or_else(|| config.content_dir());
    let store = DirectoryStore::open(&content_dir)
        .with_context(|| format!("Failed to open {}", content_dir.display()))?;
    let defaults = &config.defaults;

    match cli.command {
        Command::List { json } => {
            let collection = load_all_articles(&store, defaults).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&collection.articles)?);
            } else {
                for article in &collection {
                    println!(
                        "{:>3}  {:<14} {:<12} {}  [{}]",
                        article.id, article.date, article.category, article.title, article.slug
                    );
                }
            }
            for failure in &collection.failures {
                eprintln!("skipped {}: {}", failure.slug, failure.error);
            }
        }
        Command::Show { slug, json } => match fetch_article_page(&store, defaults, &slug).await {
            Ok(page) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&page)?);
                } else {
                    let article = &page.article;
                    println!("{}", article.title);
                    println!(
                        "{} | {} | {} | {} de lecture",
                        article.category, article.author, article.date, article.read_time
                    );
                    println!("Tags: {}", article.tags.join(", "));
                    println!();
                    println!("{}", article.excerpt);
                    if !page.related.is_empty() {
                        println!();
                        println!("Articles liés:");
                        for related in &page.related {
                            println!("  - {} [{}]", related.title, related.slug);
                        }
                    }
                }
            }
            Err(e) if e.is_not_found() => return Ok(not_found(&slug)),
            Err(e) => return Err(e.into()),
        },
        Command::Render { slug } => match load_article(&store, &slug).await {
            Ok(raw) => println!("{}", render_html(&raw)),
            Err(BlogError::NotFound(_)) => return Ok(not_found(&slug)),
            Err(e) => return Err(e.into()),
        },
        Command::ConfigPath => {}
    }

    Ok(ExitCode::SUCCESS)
}

fn not_found(slug: &str) -> ExitCode {
    eprintln!("Article non trouvé: {}", slug);
    ExitCode::from(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_config_path_ignores_malformed_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ pas du json").unwrap();
        let config = path.to_string_lossy().to_string();

        let cli = Cli::parse_from(["agence-blog", "--config", &config, "config-path"]);
        assert!(run(cli).await.is_ok());

        let cli = Cli::parse_from(["agence-blog", "--config", &config, "list"]);
        assert!(run(cli).await.is_err());
    }
}
