//! # Evidencer CLI
//!
//! Command-line access to the crawl-and-extract pipeline, alongside the MCP
//! server mode:
//!
//! - `serve`: expose the tools over MCP stdio
//! - `crawl`: crawl the seed sites of a climate category
//! - `fetch`: crawl a custom start URL one level deep
//! - `search`: drive a website's own search feature per keyword
//! - `evidence`: score paragraphs in a saved HTML file against a query
//! - `categories`: list the supported climate categories
//!
//! Crawl commands print their results as JSON so output can be piped into
//! other tooling.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::{
    EnvFilter, Layer, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

use evidencer::crawler::{self, Category, CrawlerConfig};
use evidencer::{evidence, mcp, search};

#[derive(Parser)]
#[command(author, version, about = "Keyword-driven web crawler and evidence extractor for climate-change research", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the tool set over MCP stdio
    Serve(ServeArgs),

    /// Crawl the seed sites of a climate category
    Crawl(CrawlArgs),

    /// Crawl a custom start URL one level deep
    Fetch(FetchArgs),

    /// Run a website's own search feature for each keyword
    Search(SearchArgs),

    /// Extract evidence paragraphs from a saved HTML file
    Evidence(EvidenceArgs),

    /// List the supported climate categories
    Categories,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Folder crawled pages are saved into
    #[arg(long, default_value = "./resource")]
    resource_dir: PathBuf,
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// Climate category, e.g. 'carbon-emissions'
    #[arg(required = true)]
    category: String,

    /// Keywords to match against page text
    #[arg(required = true)]
    keywords: Vec<String>,

    /// Maximum pages to accept
    #[arg(short = 'p', long, default_value = "5")]
    max_pages: usize,

    /// Folder crawled pages are saved into
    #[arg(long, default_value = "./resource")]
    resource_dir: PathBuf,
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// URL to start crawling from
    #[arg(required = true)]
    url: String,

    /// Keywords to match against page text
    #[arg(required = true)]
    keywords: Vec<String>,

    /// How many discovered links to also visit
    #[arg(short = 'l', long, default_value = "5")]
    max_links: usize,

    /// Folder crawled pages are saved into
    #[arg(long, default_value = "./resource")]
    resource_dir: PathBuf,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Base URL of the website to search
    #[arg(required = true)]
    base_url: String,

    /// Keywords to submit to the site's search feature
    #[arg(required = true)]
    keywords: Vec<String>,

    /// Language code for the search
    #[arg(short, long, default_value = "ko")]
    language: String,

    /// Folder crawled pages are saved into
    #[arg(long, default_value = "./resource")]
    resource_dir: PathBuf,
}

#[derive(Args, Debug)]
struct EvidenceArgs {
    /// Saved HTML file to analyze
    #[arg(required = true)]
    file: PathBuf,

    /// Question or keywords to match paragraphs against
    #[arg(required = true)]
    query: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve(args)) => {
            serve_command(args).await?;
        }
        Some(Commands::Crawl(args)) => {
            crawl_command(args).await?;
        }
        Some(Commands::Fetch(args)) => {
            fetch_command(args).await?;
        }
        Some(Commands::Search(args)) => {
            search_command(args).await?;
        }
        Some(Commands::Evidence(args)) => {
            evidence_command(args).await?;
        }
        Some(Commands::Categories) => {
            for category in Category::ALL {
                println!("{} ({})", category.slug(), category.label());
            }
        }
        None => {
            // If no command is provided, show help
            let _ = Cli::parse_from(["evidencer", "--help"]);
        }
    }

    Ok(())
}

fn init_tracing() {
    // Logs go to stderr; stdout belongs to command output and, in serve
    // mode, to the MCP transport.
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_default_env());

    tracing_subscriber::registry().with(console_layer).init();
}

#[instrument]
async fn serve_command(args: ServeArgs) -> anyhow::Result<()> {
    let config = CrawlerConfig::builder()
        .resource_dir(args.resource_dir)
        .build();

    mcp::run(config).await?;
    Ok(())
}

#[instrument]
async fn crawl_command(args: CrawlArgs) -> anyhow::Result<()> {
    let category = Category::from_str(&args.category)?;
    let config = CrawlerConfig::builder()
        .max_pages(args.max_pages)
        .resource_dir(args.resource_dir)
        .build();
    let fetcher = config.fetcher();
    let store = config.store();

    eprintln!("Crawling category {}...", category);
    let result =
        crawler::crawl_domain(&fetcher, &store, &config, category, &args.keywords).await?;

    eprintln!("Accepted {} pages", result.len());
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[instrument]
async fn fetch_command(args: FetchArgs) -> anyhow::Result<()> {
    let config = CrawlerConfig::builder()
        .max_links(args.max_links)
        .resource_dir(args.resource_dir)
        .build();
    let fetcher = config.fetcher();
    let store = config.store();

    eprintln!("Crawling {}...", args.url);
    let result =
        crawler::crawl_custom(&fetcher, &store, &config, &args.url, &args.keywords).await?;

    eprintln!("Accepted {} pages", result.len());
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[instrument]
async fn search_command(args: SearchArgs) -> anyhow::Result<()> {
    let config = CrawlerConfig::builder()
        .resource_dir(args.resource_dir)
        .build();
    let fetcher = config.fetcher();
    let store = config.store();

    eprintln!("Searching {}...", args.base_url);
    let report = search::crawl_search(
        &fetcher,
        &store,
        &config,
        &args.base_url,
        &args.keywords,
        &args.language,
    )
    .await?;

    eprintln!(
        "Found results for {} of {} keywords",
        report.hits.len(),
        args.keywords.len()
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[instrument]
async fn evidence_command(args: EvidenceArgs) -> anyhow::Result<()> {
    let html = tokio::fs::read_to_string(&args.file).await?;
    let paragraphs = evidence::extract_evidence(&html, &args.query);

    let response = serde_json::json!({
        "evidence_paragraphs": paragraphs,
        "query": args.query,
    });
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
