use std::path::PathBuf;

use anyhow::Context;
use catsearch::catalog::source_for;
use catsearch::{config::Config, similarity, Ranker, SuggestionIndex};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "catsearch", about = "catsearch — fuzzy catalog search and autocomplete")]
struct Cli {
    /// Config file layered over the built-in defaults
    /// (default: ~/.config/catsearch/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log engine decisions to stderr at debug level.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank catalog records against a free-text query.
    Search {
        query: String,
        /// Catalog snapshot (JSON array or JSON Lines); `-` reads stdin.
        #[arg(long, short, default_value = "-")]
        catalog: String,
        /// Minimum similarity for a fuzzy match.
        #[arg(long)]
        threshold: Option<f64>,
        #[arg(long)]
        max_results: Option<usize>,
        /// Only accept verbatim containment of an expanded term.
        #[arg(long)]
        exact: bool,
        /// Print the relevance score next to each name.
        #[arg(long)]
        scores: bool,
        /// Emit results as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Autocomplete a partial query from record names.
    Suggest {
        partial: String,
        #[arg(long, short, default_value = "-")]
        catalog: String,
        #[arg(short = 'n', long)]
        max: Option<usize>,
    },
    /// Print the edit-distance similarity of two strings.
    Similarity { a: String, b: String },
}

#[derive(Serialize)]
struct SearchHit<'a> {
    score: f64,
    pinned: bool,
    #[serde(flatten)]
    record: &'a catsearch::CatalogRecord,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading user config")?,
    };
    tracing::info!(
        config = %cli.config.as_deref().map_or_else(|| "user default".into(), |p| p.display().to_string()),
        pins = config.pins.len(),
        extra_synonyms = config.synonyms.len(),
        "configuration loaded"
    );

    match cli.command {
        Command::Search {
            query,
            catalog,
            threshold,
            max_results,
            exact,
            scores,
            json,
        } => {
            let source = source_for(&catalog);
            let records = source
                .load()
                .with_context(|| format!("loading catalog from {}", source.describe()))?;
            tracing::info!(source = %source.describe(), records = records.len(), "catalog loaded");

            let ranker = Ranker::from_config(&config);
            let mut opts = ranker.default_options();
            if let Some(threshold) = threshold {
                anyhow::ensure!(
                    (0.0..=1.0).contains(&threshold),
                    "--threshold must be within [0, 1], got {threshold}"
                );
                opts.fuzzy_threshold = threshold;
            }
            if let Some(max_results) = max_results {
                opts.max_results = max_results;
            }
            opts.require_exact = exact;

            let results = ranker.search_scored(&records, &query, &opts);
            if json {
                let hits: Vec<SearchHit<'_>> = results
                    .iter()
                    .map(|r| SearchHit {
                        score: r.score,
                        pinned: r.pinned,
                        record: r.record,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                for r in &results {
                    if scores {
                        println!("{:.3}\t{}", r.score, r.record.name);
                    } else {
                        println!("{}", r.record.name);
                    }
                }
            }
        }
        Command::Suggest {
            partial,
            catalog,
            max,
        } => {
            let source = source_for(&catalog);
            let records = source
                .load()
                .with_context(|| format!("loading catalog from {}", source.describe()))?;
            tracing::info!(source = %source.describe(), records = records.len(), "catalog loaded");
            let max = max.unwrap_or(config.suggest.max_suggestions);
            let index = SuggestionIndex::with_config(&records, config.suggest.clone());
            for suggestion in index.suggest(&partial, max) {
                println!("{suggestion}");
            }
        }
        Command::Similarity { a, b } => {
            println!("{:.4}", similarity(&a, &b));
        }
    }

    Ok(())
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}
