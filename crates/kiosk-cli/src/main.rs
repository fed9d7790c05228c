use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use kiosk_core::search::SearchIndex;
use kiosk_core::{share, JsonFileSource, PostSummary, Source};

mod browser;
mod config;
mod copy_helpers;
mod doctor;
mod theme;

#[derive(Parser)]
#[command(name = "kiosk", version, about = "Terminal browser for a static site's post catalog")]
struct Cli {
    /// Path to the posts catalog (overrides settings.toml)
    #[arg(long, global = true)]
    posts: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive browser
    Browse,
    /// List posts in catalog order
    List {
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Filter posts by search tokens (every token must match)
    Search {
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// Print share links for a page, or copy its URL
    Share {
        url: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        json: bool,
        /// Copy the URL to the clipboard instead of printing links
        #[arg(long)]
        copy: bool,
    },
    /// Check the catalog file and clipboard tooling
    Doctor,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = config::load_settings();
    let posts_path = cli
        .posts
        .unwrap_or_else(|| config::posts_path(&settings));

    match cli.command {
        Commands::Browse => {
            let source = JsonFileSource::new(&posts_path);
            browser::run_browser_default(&source, &settings)?;
        }
        Commands::List { limit, json } => {
            let mut posts = load_catalog(&posts_path)?;
            if let Some(n) = limit {
                posts.truncate(n);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
            } else {
                for p in &posts {
                    print_row(p);
                }
            }
        }
        Commands::Search { query, json } => {
            let index = SearchIndex::new(load_catalog(&posts_path)?);
            let hits: Vec<&PostSummary> = index
                .filter(&query)
                .into_iter()
                .filter_map(|i| index.posts().get(i))
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                for p in hits {
                    print_row(p);
                }
            }
        }
        Commands::Share {
            url,
            title,
            json,
            copy,
        } => {
            if copy {
                copy_helpers::copy_text(&url).context("clipboard write failed")?;
                println!("copied {}", url);
            } else {
                let links = share::share_links(&url, title.as_deref().unwrap_or(""));
                if json {
                    println!("{}", serde_json::to_string_pretty(&links)?);
                } else {
                    println!("x\t{}", links.x);
                    println!("telegram\t{}", links.telegram);
                    println!("linkedin\t{}", links.linkedin);
                }
            }
        }
        Commands::Doctor => doctor::run(&posts_path),
    }

    Ok(())
}

fn load_catalog(path: &std::path::Path) -> Result<Vec<PostSummary>> {
    Ok(JsonFileSource::new(path).load()?)
}

fn print_row(p: &PostSummary) {
    println!("{}\t{}\t{}\t{}", p.date, p.category, p.title, p.url);
}
