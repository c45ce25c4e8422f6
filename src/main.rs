//! Inspection CLI for the IReader site data pipelines
//!
//! Runs the same fetch/normalize code the site server embeds and prints the
//! resulting models, which makes checksum extraction and registry validation
//! easy to eyeball against the live endpoints.

use clap::{Parser, Subcommand, ValueEnum};

use ireader_site::config::SiteConfig;
use ireader_site::logging::{init_logger, log_error, log_info};
use ireader_site::query::{filter_sources, SortMode, SourceQuery};
use ireader_site::releases::{fetch_releases, ReleaseFeed};
use ireader_site::sources::{available_languages, download_url, fetch_sources};

#[derive(Parser)]
#[command(name = "ireader-site", version, about = "Inspect the IReader site data feeds")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch and print the normalized release feed
    Releases {
        /// Only print the newest N releases
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Fetch, validate and print the source catalogue
    Sources {
        /// Case-insensitive substring match on name, id and language
        #[arg(long)]
        query: Option<String>,
        /// Exact language code filter, e.g. "en"
        #[arg(long)]
        lang: Option<String>,
        /// Sort order
        #[arg(long, value_enum, default_value_t = SortArg::Name)]
        sort: SortArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Name,
    Language,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortMode::Name,
            SortArg::Language => SortMode::Language,
        }
    }
}

fn main() {
    init_logger();
    let cli = Cli::parse();
    let config = SiteConfig::load();

    match cli.command {
        Command::Releases { limit } => print_releases(&config, limit),
        Command::Sources { query, lang, sort } => {
            let query = SourceQuery {
                text: query.unwrap_or_default(),
                language: lang.unwrap_or_default(),
                sort: sort.into(),
            };
            print_sources(&config, &query);
        }
    }
}

fn print_releases(config: &SiteConfig, limit: Option<usize>) {
    match fetch_releases(&config.github_repo, &config.user_agent) {
        ReleaseFeed::Fetched {
            releases,
            updated_at,
        } => {
            if let Some(updated) = updated_at {
                println!("Feed updated: {}", updated);
            }
            if releases.is_empty() {
                println!("No releases published.");
            }
            for release in releases.iter().take(limit.unwrap_or(usize::MAX)) {
                println!("\n{} ({}) #{}", release.name, release.published_at, release.anchor);
                for asset in &release.assets {
                    let sha = asset.sha256.as_deref().unwrap_or("(no checksum published)");
                    println!("  {}  {}  {}", asset.label, asset.size, sha);
                }
            }
        }
        ReleaseFeed::Unavailable => {
            // distinct from an empty feed: GitHub could not be reached
            log_error("Release feed unavailable; showing nothing");
            println!("Release feed is currently unavailable.");
        }
    }
}

fn print_sources(config: &SiteConfig, query: &SourceQuery) {
    let sources = match fetch_sources(&config.sources_index_url, &config.user_agent) {
        Ok(sources) => sources,
        Err(e) => {
            log_error(&format!("Failed to load sources: {}", e));
            eprintln!("Unable to load sources: {}", e);
            std::process::exit(1);
        }
    };

    let matched = filter_sources(&sources, query);
    log_info(&format!(
        "Showing {} of {} sources ({} languages)",
        matched.len(),
        sources.len(),
        available_languages(&sources).len()
    ));

    for source in &matched {
        println!(
            "{} [{}] v{} ({})\n  {}",
            source.name,
            source.lang,
            source.version,
            source.id,
            download_url(source)
        );
    }
}
