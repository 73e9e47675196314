//! # Workbench Search CLI (`wbs`)
//!
//! The `wbs` binary searches a portfolio site's content from the terminal
//! with the same ranking, filtering, and suggestions the site uses.
//!
//! ## Usage
//!
//! ```bash
//! wbs --config ./config/wbs.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `wbs search "<query>"` | Ranked, highlighted, filterable search |
//! | `wbs suggest <partial>` | Title, tag, and technology suggestions |
//! | `wbs facets` | Available filter values |
//! | `wbs get <id>` | Print one item in full |
//! | `wbs sources` | List content sources and their status |
//! | `wbs stats` | Corpus summary |
//! | `wbs recent` | Recent queries |
//! | `wbs completions <shell>` | Shell completion script |
//!
//! ## Examples
//!
//! ```bash
//! # Everything tagged Performance, newest first
//! wbs search "" --tag Performance
//!
//! # Featured Rust projects mentioning caching
//! wbs search caching --type project --tech Rust --featured
//!
//! # Machine-readable output
//! wbs search "core web vitals" --json
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use workbench_search::config;
use workbench_search::get;
use workbench_search::recent;
use workbench_search::search::{self, SearchOptions};
use workbench_search::sources;
use workbench_search::stats;
use workbench_search_core::models::ContentKind;

/// Workbench Search CLI: client-side search and ranking for a portfolio site.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/wbs.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "wbs",
    about = "Workbench Search: full-text search over portfolio projects, articles, and case studies",
    version,
    long_about = "Workbench Search loads a site's JSON content collections and runs weighted, \
    case-insensitive full-text search over them, with faceted filters, highlighted matches, \
    autocomplete suggestions, and a recent-query history."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/wbs.toml`. Content source paths inside it are
    /// resolved relative to the file.
    #[arg(long, global = true, default_value = "./config/wbs.toml")]
    config: PathBuf,

    /// Log search events and index builds to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Search the corpus.
    ///
    /// Matching is literal and case-insensitive. Results are ranked by
    /// weighted field matches, then by date. An empty query lists every
    /// item that passes the filters.
    Search {
        /// Query text. Use "" to browse by filters alone.
        query: String,

        /// Only these content types (repeatable): project, article, case-study.
        #[arg(long = "type", value_name = "TYPE")]
        types: Vec<ContentKind>,

        /// Only these categories (repeatable).
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Only items with any of these tags (repeatable).
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Only items using any of these technologies (repeatable).
        #[arg(long = "tech")]
        technologies: Vec<String>,

        /// Only featured items.
        #[arg(long, conflicts_with = "not_featured")]
        featured: bool,

        /// Only items that are not featured.
        #[arg(long)]
        not_featured: bool,

        /// Only items dated on or after this date (YYYY-MM-DD).
        #[arg(long)]
        since: Option<String>,

        /// Only items dated on or before this date (YYYY-MM-DD).
        #[arg(long)]
        until: Option<String>,

        /// Maximum number of results (default: `search.result_limit`).
        #[arg(long)]
        limit: Option<usize>,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Suggest completions for a partial query.
    Suggest {
        partial: String,

        /// Maximum suggestions (default: `search.suggestion_limit`).
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List the filter values present in the corpus.
    Facets {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print one item by id.
    Get {
        id: String,

        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List configured content sources and whether they load.
    Sources,

    /// Summarize the corpus.
    Stats,

    /// Show recent queries.
    Recent {
        /// Forget all recent queries.
        #[arg(long)]
        clear: bool,
    },

    /// Generate a shell completion script.
    Completions {
        shell: Shell,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "wbs", &mut std::io::stdout());
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config;
    let load = || config::load_config(&config_path);

    match cli.command {
        Commands::Search {
            query,
            types,
            categories,
            tags,
            technologies,
            featured,
            not_featured,
            since,
            until,
            limit,
            json,
        } => {
            let featured = match (featured, not_featured) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let opts = SearchOptions {
                types,
                categories,
                tags,
                technologies,
                featured,
                since,
                until,
                limit,
                json,
            };
            search::run_search(&load()?, &query, &opts)?;
        }
        Commands::Suggest { partial, limit } => {
            search::run_suggest(&load()?, &partial, limit)?;
        }
        Commands::Facets { json } => {
            search::run_facets(&load()?, json)?;
        }
        Commands::Get { id, json } => {
            get::run_get(&load()?, &id, json)?;
        }
        Commands::Sources => {
            sources::list_sources(&load()?)?;
        }
        Commands::Stats => {
            stats::run_stats(&load()?)?;
        }
        Commands::Recent { clear } => {
            recent::run_recent(&load()?, clear)?;
        }
        // Needs no config
        Commands::Completions { shell } => print_completions(shell),
    }

    Ok(())
}
