//! Sumi-Scribe main entry point
//!
//! This is the command-line interface for the Sumi-Scribe site crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use sumi_scribe::config::{load_config_with_hash, Config};
use sumi_scribe::crawler::{run_crawl_with_shutdown, ChromeRenderer, HttpRenderer};
use sumi_scribe::output::{print_report, write_outputs};
use sumi_scribe::ScopeFilter;
use tracing_subscriber::EnvFilter;

/// Sumi-Scribe: a rendering site scribe
///
/// Sumi-Scribe crawls one site breadth-first, renders every page in headless
/// Chromium, and writes the main content of each page as cleaned Markdown.
#[derive(Parser, Debug)]
#[command(name = "sumi-scribe")]
#[command(version)]
#[command(about = "Crawl a site and turn its pages into Markdown", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Fetch pages with plain HTTP instead of rendering them in Chromium
    #[arg(long = "static")]
    static_html: bool,

    /// Override the configured output directory
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.to_string_lossy().into_owned();
    }

    if cli.dry_run {
        return handle_dry_run(&config);
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    spawn_interrupt_listener(Arc::clone(&shutdown));

    let outcome = if cli.static_html {
        tracing::info!("Using static HTTP renderer; JavaScript will not run");
        let renderer = HttpRenderer::new(&config.renderer).context("Failed to build HTTP client")?;
        run_crawl_with_shutdown(&config, &renderer, shutdown)
            .await
            .context("Failed to initialize crawl")?
    } else {
        let renderer = ChromeRenderer::launch(&config.renderer)
            .await
            .context("Failed to start Chromium (use --static to crawl without a browser)")?;
        let outcome = run_crawl_with_shutdown(&config, &renderer, shutdown).await;
        renderer.close().await;
        outcome.context("Failed to initialize crawl")?
    };

    let written = write_outputs(&outcome.documents, &config.output)
        .context("Failed to write crawl output")?;

    if !cli.quiet {
        println!();
        print_report(&outcome, Some(&written));
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_scribe=info,warn"),
            1 => EnvFilter::new("sumi_scribe=debug,info"),
            2 => EnvFilter::new("sumi_scribe=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Sets the shutdown flag on the first Ctrl-C
fn spawn_interrupt_listener(shutdown: Arc<AtomicBool>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::warn!("Interrupt received, finishing current page before stopping");
                shutdown.store(true, Ordering::SeqCst);
            }
            Err(e) => tracing::error!("Failed to listen for Ctrl-C: {}", e),
        }
    });
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let scope = ScopeFilter::from_config(&config.crawler).context("Invalid base URL")?;

    println!("=== Sumi-Scribe Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Scope prefix: {}", scope.base_prefix());
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Request delay: {:.2}s", config.crawler.request_delay);

    println!("\nSeed URLs ({}):", config.crawler.start_paths.len());
    for seed in config.seed_urls() {
        println!("  - {}", seed);
    }

    println!(
        "\nExclude Patterns ({}):",
        scope.exclude_patterns().len()
    );
    for pattern in scope.exclude_patterns() {
        println!("  - {}", pattern);
    }

    println!("\nRenderer:");
    println!("  Navigation timeout: {}s", config.renderer.navigation_timeout);
    println!("  Ready timeout: {}s", config.renderer.ready_timeout);
    println!("  Settle time: {}s", config.renderer.settle_time);
    println!("  Scroll to bottom: {}", config.renderer.scroll_to_bottom);
    println!("  Headless: {}", config.renderer.headless);

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Corpus: {}", config.output.jsonl_file);
    println!("  Markdown files: {}", config.output.markdown_files);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling with {} seed URLs",
        config.crawler.start_paths.len()
    );

    Ok(())
}
