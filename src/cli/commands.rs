use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rss-mirror")]
#[command(about = "Mirror fragile web sources into stable, self-hosted RSS feeds")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the latest entry of each feed and regenerate its RSS document
    Run {
        /// Only mirror this feed (repeatable); all feeds when omitted
        #[arg(long = "source", value_name = "SLUG")]
        sources: Vec<String>,

        /// Override every selected feed's retention limit
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
        max_items: Option<u64>,

        /// Dry run - print the rendered feeds without writing history or output files
        #[arg(long)]
        dry_run: bool,
    },

    /// List the mirrored feeds
    List,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["rss-mirror", "run"]).unwrap();
        match cli.command {
            Commands::Run {
                sources,
                max_items,
                dry_run,
            } => {
                assert!(sources.is_empty());
                assert_eq!(max_items, None);
                assert!(!dry_run);
            }
            Commands::List => panic!("expected run"),
        }
    }

    #[test]
    fn test_run_collects_repeated_sources() {
        let cli = Cli::try_parse_from([
            "rss-mirror",
            "run",
            "--source",
            "red_theory",
            "--source",
            "journal9",
            "--max-items",
            "5",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Commands::Run {
                sources,
                max_items,
                dry_run,
            } => {
                assert_eq!(sources, vec!["red_theory", "journal9"]);
                assert_eq!(max_items, Some(5));
                assert!(dry_run);
            }
            Commands::List => panic!("expected run"),
        }
    }

    #[test]
    fn test_zero_max_items_rejected() {
        assert!(Cli::try_parse_from(["rss-mirror", "run", "--max-items", "0"]).is_err());
    }
}
