//! MEP-Harvest main entry point
//!
//! This is the command-line interface for the MEP email harvester.

use clap::Parser;
use mep_harvest::batch::harvest;
use mep_harvest::config::load_config_with_hash;
use mep_harvest::output::print_summary;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// MEP-Harvest: a bounded, rate-limited email harvester
///
/// MEP-Harvest discovers the profile pages of all Members of the European
/// Parliament, visits each one under a concurrency cap, a sliding-window
/// rate limit, and a retry policy, and writes the publicly listed contact
/// emails to a flat output file.
#[derive(Parser, Debug)]
#[command(name = "mep-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Harvest publicly listed MEP contact emails", long_about = None)]
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

    /// Validate config and show what would be harvested without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_harvest(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mep_harvest=info,warn"),
            1 => EnvFilter::new("mep_harvest=debug,info"),
            2 => EnvFilter::new("mep_harvest=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &mep_harvest::config::Config) {
    println!("=== MEP-Harvest Dry Run ===\n");

    println!("Fetcher:");
    println!(
        "  Max concurrent sessions: {}",
        config.fetcher.max_concurrent_sessions
    );
    println!("  Max retries per target: {}", config.fetcher.max_retries);
    println!("  Backoff base delay: {}ms", config.fetcher.base_delay_ms);
    println!(
        "  Request timeout: {}s",
        config.fetcher.request_timeout_secs
    );

    println!("\nRate Limit:");
    println!(
        "  {} fetches per {}s trailing window",
        config.rate_limit.max_per_window, config.rate_limit.window_secs
    );

    println!("\nDiscovery:");
    println!("  List URL: {}", config.discovery.list_url);
    println!("  Link selector: {}", config.discovery.link_selector);

    println!("\nExtraction:");
    println!("  Email selector: {}", config.extract.email_selector);
    println!("  Strip prefix: {}", config.extract.strip_prefix);

    println!("\nIdentity:");
    println!("  User agents: {}", config.identity.user_agents.len());
    println!(
        "  Accept-Language values: {}",
        config.identity.accept_languages.len()
    );

    println!("\nOutput:");
    println!("  Emails file: {}", config.output.emails_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main harvest operation
///
/// Per-target fetch failures never fail the process: the run exits 0 as
/// long as discovery and the final write succeed, and failures show up in
/// the summary and the line count only.
async fn handle_harvest(config: mep_harvest::config::Config) -> anyhow::Result<()> {
    let emails_path = config.output.emails_path.clone();

    match harvest(config).await {
        Ok(report) => {
            print_summary(&report);
            println!("\nEmails written to: {}", emails_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest aborted: {}", e);
            Err(e.into())
        }
    }
}
