//! # siteqa CLI Application
//!
//! Command-line interface for building and querying a question-answering
//! corpus from a crawled website.
//!
//! ## Key Components
//!
//! - CLI argument parsing with clap
//! - Subcommands for the two halves of the workflow:
//!   - `build`: crawl a site, process its text and embed the chunks
//!   - `ask`: answer a question against a previously built corpus
//!
//! Both commands are scoped by the URL's domain, so several sites can share
//! one data directory.

mod telemetry;

use std::num::NonZeroU32;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::instrument;
use url::Url;

use siteqa::corpus::{Corpus, DataLayout};
use siteqa::crawler::{Crawler, CrawlerConfig};
use siteqa::model::{embed_chunks, DualRateLimiter};
use siteqa::openai::Client;
use siteqa::processor::{build_records, chunk_records, tokenize_records, ProcessorConfig};
use siteqa::search::{answer_question, AnswerOptions};

#[derive(Parser)]
#[command(author, version, about = "Build and query a Q&A corpus from a crawled website", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Crawl a website and build its embedded corpus
    Build(BuildArgs),

    /// Ask a question against a built corpus
    Ask(AskArgs),
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Root URL to crawl
    #[arg(required = true)]
    url: String,

    /// Data directory holding text and processed artifacts
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Embedding requests per minute
    #[arg(short, long, default_value = "20")]
    rpm: u32,

    /// Embedding tokens per minute
    #[arg(short, long, default_value = "150000")]
    tpm: u32,
}

#[derive(Args, Debug)]
struct AskArgs {
    /// Root URL of the corpus to query
    #[arg(required = true)]
    url: String,

    /// Data directory holding text and processed artifacts
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Question to answer
    #[arg(short, long, required = true)]
    question: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing_subscriber();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Build(args)) => {
            build_command(args).await?;
        }
        Some(Commands::Ask(args)) => {
            ask_command(args).await?;
        }
        None => {
            // If no command is provided, show help
            let _ = Cli::parse_from(["--help"]);
        }
    }

    Ok(())
}

/// The domain a URL's corpus is keyed by
fn domain_of(url: &str) -> anyhow::Result<(Url, String)> {
    let parsed = Url::parse(url)?;
    let domain = parsed
        .host_str()
        .ok_or_else(|| anyhow!("URL {url} has no host"))?
        .to_string();
    Ok((parsed, domain))
}

#[instrument]
async fn build_command(args: BuildArgs) -> anyhow::Result<()> {
    let (seed, domain) = domain_of(&args.url)?;
    let layout = DataLayout::new(&args.path);

    println!("Crawling {}...", args.url);
    let crawler = Crawler::new(CrawlerConfig::default())?;
    let pages = crawler.crawl(&seed, &layout).await?;
    println!("Crawled {} pages", pages.len());

    let rows = build_records(&layout, &domain)?;
    let records = tokenize_records(rows);
    let chunks = chunk_records(&records, &ProcessorConfig::default());
    println!("Prepared {} chunks for embedding", chunks.len());

    let rpm = NonZeroU32::new(args.rpm).ok_or_else(|| anyhow!("rpm must be positive"))?;
    let tpm = NonZeroU32::new(args.tpm).ok_or_else(|| anyhow!("tpm must be positive"))?;
    let limiter = DualRateLimiter::new(rpm, tpm);

    let progress_bar = ProgressBar::new(chunks.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({eta}) {msg}")
            .expect("must parse progress template")
            .progress_chars("##-"),
    );
    progress_bar.set_message("Embedding chunks...");

    let client = Client::from_env();
    let corpus = embed_chunks(&client, &chunks, &limiter, |done| {
        progress_bar.set_position(done as u64);
    })
    .await?;
    progress_bar.finish_with_message("Embedding completed");

    corpus.store(&layout, &domain)?;
    println!("Stored {} embedded chunks for {domain}", corpus.records.len());

    Ok(())
}

#[instrument]
async fn ask_command(args: AskArgs) -> anyhow::Result<()> {
    let (_, domain) = domain_of(&args.url)?;
    let layout = DataLayout::new(&args.path);

    let corpus = Corpus::load(&layout, &domain)?;
    let client = Client::from_env();

    let answer = answer_question(&client, &corpus, &args.question, &AnswerOptions::default()).await;
    if !answer.is_empty() {
        println!("{answer}");
    }

    Ok(())
}
