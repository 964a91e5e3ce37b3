//! Site-Survey main entry point
//!
//! This is the command-line interface for the Site-Survey crawler.

use anyhow::Context;
use clap::Parser;
use site_survey::config::{load_config_with_hash, Config};
use site_survey::crawler::{
    crawl_website_with_config, fetch_linkedin_preview_with_config, seeded_queue,
};
use site_survey::output::{render_result, write_output, CrawlStatistics, OutputFormat};
use site_survey::CrawlProgress;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Survey: a bounded, SSRF-safe site crawler
///
/// Crawls a capped number of same-origin pages starting from one URL and
/// prints the extracted text, headlines, metadata and links as JSON or
/// Markdown.
#[derive(Parser, Debug)]
#[command(name = "site-survey")]
#[command(version)]
#[command(about = "A bounded, SSRF-safe site crawler", long_about = None)]
struct Cli {
    /// URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to accept (overrides the config file)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u16).range(0..=500))]
    max_pages: Option<u16>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write the result to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print crawl statistics to stderr when done
    #[arg(long)]
    stats: bool,

    /// Fetch the LinkedIn company page, if one is found, and print its text
    #[arg(long)]
    linkedin_preview: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with_all = ["stats", "linkedin_preview", "output"])]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_configuration(&cli)?;
    config
        .apply_env_overrides()
        .context("Invalid render service environment overrides")?;

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = usize::from(max_pages);
    }

    if cli.dry_run {
        handle_dry_run(&cli, &config)
    } else {
        handle_crawl(&cli, &config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the crawl result.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_survey=info,warn"),
            1 => EnvFilter::new("site_survey=debug,info"),
            2 => EnvFilter::new("site_survey=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn load_configuration(cli: &Cli) -> anyhow::Result<Config> {
    let Some(path) = &cli.config else {
        tracing::debug!("No configuration file given; using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    println!("=== Site-Survey Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Page timeout: {}ms", config.crawler.page_timeout_ms);
    println!("  Pacing: {}ms", config.crawler.pacing_ms);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nRender Fallback:");
    if config.render.is_configured() {
        println!(
            "  Endpoint: {}",
            config.render.endpoint.as_deref().unwrap_or_default()
        );
        println!("  Wait for: {}ms", config.render.wait_for_ms);
        println!("  Timeout: {}ms", config.render.timeout_ms);
    } else {
        println!("  Disabled (no endpoint and API key)");
    }

    let queue = seeded_queue(&cli.url)
        .with_context(|| format!("Cannot crawl {}", cli.url))?;

    println!("\nInitial Queue ({}):", queue.len());
    for (i, url) in queue.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, url);
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would crawl up to {} pages starting from {}",
        config.crawler.max_pages,
        queue.first().map(String::as_str).unwrap_or(&cli.url)
    );

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let mut on_progress = |progress: &CrawlProgress| {
        tracing::debug!(
            "Progress: {} pages crawled, {} discovered, fetching {}",
            progress.crawled,
            progress.discovered,
            progress.current_url
        );
    };

    let report = crawl_website_with_config(
        &cli.url,
        config.crawler.max_pages,
        config,
        Some(&mut on_progress),
    )
    .await
    .context("Failed to start crawl")?;

    let result = &report.result;
    if result.pages.is_empty() && !result.errors.is_empty() {
        tracing::warn!("No pages crawled: {}", result.errors.join("; "));
    }

    let rendered = render_result(result, cli.format).context("Failed to render result")?;
    write_output(&rendered, cli.output.as_deref()).context("Failed to write result")?;

    if cli.stats {
        site_survey::output::print_statistics(&CrawlStatistics::from_report(&report));
    }

    if cli.linkedin_preview {
        let Some(linkedin_url) = &result.linkedin_url else {
            tracing::info!("No LinkedIn company page found");
            return Ok(());
        };
        match fetch_linkedin_preview_with_config(linkedin_url, config).await {
            Some(text) => eprintln!("\n=== LinkedIn Preview ({}) ===\n{}", linkedin_url, text),
            None => tracing::warn!("Could not fetch LinkedIn preview for {}", linkedin_url),
        }
    }

    Ok(())
}
