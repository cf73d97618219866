// UDN news archive scraper
//
// Searches the UDN news portal for a keyword and date range, visits each
// matching article and optionally writes the results to CSV.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use udn_newsscrape::{ConsoleProgress, ScrapeOptions, SearchQuery, SessionConfig, scrape};
use udn_newsscrape::utils::DEFAULT_MAX_ARTICLES;

#[derive(Parser, Debug)]
#[command(name = "udn-newsscrape", version, about = "Scrape UDN news search results")]
struct Cli {
    /// Search keyword
    keyword: String,

    /// Start date (yyyy-mm-dd)
    start_date: String,

    /// End date (yyyy-mm-dd)
    end_date: String,

    /// CSV output file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Pause after the login trigger so you can log in by hand
    #[arg(long)]
    manual: bool,

    /// Maximum result pages to harvest
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Maximum articles to visit
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_ARTICLES)]
    max_articles: usize,

    /// Run the browser without a window
    #[arg(long)]
    headless: bool,

    /// Chromium/Chrome executable to use
    #[arg(long, value_name = "PATH")]
    browser: Option<PathBuf>,

    /// Browser profile directory to reuse between runs
    #[arg(long, value_name = "DIR")]
    profile_dir: Option<PathBuf>,

    /// JSON session configuration file
    #[arg(long, value_name = "JSON")]
    config: Option<PathBuf>,
}

impl Cli {
    fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => SessionConfig::default(),
        };
        if self.headless {
            config = config.with_headless(true);
        }
        if let Some(browser) = &self.browser {
            config = config.with_browser_executable(browser);
        }
        if let Some(dir) = &self.profile_dir {
            config = config.with_user_data_dir(dir);
        }
        Ok(config)
    }

    fn query(&self) -> Result<SearchQuery> {
        let builder = SearchQuery::builder()
            .keyword(&self.keyword)
            .date_range(&self.start_date, &self.end_date)
            .max_articles(self.max_articles);
        let query = match self.max_pages {
            Some(pages) => builder.max_pages(pages).build()?,
            None => builder.build()?,
        };
        Ok(query)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("udn_newsscrape=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.session_config()?;
    let query = cli.query()?;
    let options = ScrapeOptions {
        output: cli.output.clone(),
        manual_login: cli.manual,
    };

    let progress = ConsoleProgress::new();
    let outcome = scrape(&config, query, options, &progress).await?;

    println!("Collected {} articles", outcome.results.len());
    if let Some(path) = &outcome.saved_to {
        println!("Saved to {}", path.display());
    }

    match &outcome.failure {
        Some(e) if outcome.results.is_empty() => {
            eprintln!("Scrape failed: {e}");
            Ok(ExitCode::FAILURE)
        }
        Some(e) => {
            eprintln!("Scrape stopped early: {e}");
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}
