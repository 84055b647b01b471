use clap::Parser;
use tracing_subscriber::EnvFilter;

use rss_mirror::cli::{Cli, Commands};
use rss_mirror::config::Config;
use rss_mirror::errors::MirrorResult;
use rss_mirror::services::{MirrorService, RunOptions};
use rss_mirror::sources::FeedRegistry;
use rss_mirror::storage::JsonHistoryStore;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> MirrorResult<i32> {
    let cli = Cli::parse();

    let config = Config::from_env()?;
    let registry = FeedRegistry::new(&config)?;

    match cli.command {
        Commands::List => {
            cmd_list(&registry);
            Ok(0)
        }
        Commands::Run {
            sources,
            max_items,
            dry_run,
        } => {
            let options = RunOptions {
                max_items_override: max_items.map(|n| n as usize),
                dry_run,
            };
            cmd_run(&registry, &sources, &options)
        }
    }
}

fn cmd_list(registry: &FeedRegistry) {
    println!("Mirrored feeds:\n");
    for feed in registry.iter() {
        println!("  {:12} -> {}", feed.config.slug, feed.config.title);
        println!("    Kind: {}", feed.source.source_kind());
        println!("    Output: {}", feed.config.output_path.display());
    }
}

fn cmd_run(registry: &FeedRegistry, slugs: &[String], options: &RunOptions) -> MirrorResult<i32> {
    // Unknown slugs abort before anything is fetched
    let selected = registry.select(slugs)?;

    let service = MirrorService::new(JsonHistoryStore::new());
    let report = service.run_all(&selected, options);

    for feed in &report.results {
        match &feed.result {
            Ok(outcome) if !outcome.written => {
                println!("--- {} ---", outcome.slug);
                print!("{}", outcome.document);
            }
            Ok(outcome) => {
                let path = registry
                    .get(&outcome.slug)
                    .map(|f| f.config.output_path.display().to_string())
                    .unwrap_or_default();
                let status = if outcome.inserted { "new entry" } else { "no change" };
                println!(
                    "[{}] Wrote RSS feed to {} ({}, {} items)",
                    outcome.slug, path, status, outcome.retained
                );
            }
            Err(e) => println!("[{}] FAILED: {}", feed.slug, e),
        }
    }

    if report.has_failures() {
        eprintln!(
            "{} of {} feeds mirrored; {} failed.",
            report.succeeded().count(),
            report.results.len(),
            report.failed().count()
        );
        return Ok(1);
    }

    Ok(0)
}
