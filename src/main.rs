use std::{path::PathBuf, process::ExitCode, time::Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use video_tfidf_recommender::{AnchorSelector, Engine, EngineConfig, EngineError, TrendingFilter};

#[derive(Parser, Debug)]
#[command(name = "video-recommender", version, about = "Recommend, rank and search videos from a CSV corpus")]
struct Cli {
    /// Corpus CSV file
    #[arg(long, env = "RECOMMENDER_DATA", default_value = "data/merged_youtube_data.csv")]
    data: PathBuf,

    /// JSON engine configuration (partial files allowed)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Videos similar to one video
    Recommend {
        #[arg(long, conflicts_with = "title", required_unless_present = "title")]
        id: Option<String>,
        /// case-insensitive title substring
        #[arg(long)]
        title: Option<String>,
        #[arg(short, default_value_t = 10)]
        n: usize,
    },
    /// Videos similar to free text
    Similar {
        #[arg(long)]
        text: String,
        #[arg(short, default_value_t = 10)]
        n: usize,
    },
    /// Most popular videos
    Trending {
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        category: Option<i64>,
        #[arg(short, default_value_t = 20)]
        n: usize,
    },
    /// Videos whose title, tags or channel contain the query
    Search {
        query: String,
        #[arg(short, default_value_t = 20)]
        n: usize,
    },
    /// Full details of one video
    Detail { id: String },
    /// Corpus statistics
    Stats,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let start = Instant::now();
    let engine = Engine::from_path(&cli.data, config)
        .with_context(|| format!("failed to build engine from {}", cli.data.display()))?;
    tracing::info!("startup took {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);

    let (output, code) = match run(&engine, cli.command) {
        Ok(Some(value)) => (json!({ "success": true, "data": value }), ExitCode::SUCCESS),
        Ok(None) => (json!({ "success": false, "error": "Video not found" }), ExitCode::from(1)),
        Err(EngineError::InvalidQuery(msg)) => (json!({ "success": false, "error": msg }), ExitCode::from(2)),
        Err(e) => return Err(e.into()),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}

/// `Ok(None)` means not found
fn run(engine: &Engine, command: Command) -> video_tfidf_recommender::Result<Option<Value>> {
    let value = match command {
        Command::Recommend { id, title, n } => {
            let selector = match (id, title) {
                (Some(id), _) => AnchorSelector::ById(id),
                (None, Some(title)) => AnchorSelector::ByTitle(title),
                (None, None) => return Err(EngineError::invalid_query("either --id or --title is required")),
            };
            if selector.resolve(engine).is_none() {
                return Ok(None);
            }
            let recs: Vec<_> = engine.recommend(&selector, n).iter().map(|r| r.view()).collect();
            serde_json::to_value(recs)
        }
        Command::Similar { text, n } => {
            let recs: Vec<_> = engine.recommend_for_text(&text, n)?.iter().map(|r| r.view()).collect();
            serde_json::to_value(recs)
        }
        Command::Trending { country, category, n } => {
            let filter = TrendingFilter { country, category_id: category };
            let videos: Vec<_> = engine.trending(&filter, n).iter().map(|s| s.view()).collect();
            serde_json::to_value(videos)
        }
        Command::Search { query, n } => {
            let videos: Vec<_> = engine.search(&query, n)?.iter().map(|s| s.view()).collect();
            serde_json::to_value(videos)
        }
        Command::Detail { id } => match engine.detail(&id) {
            Some(view) => serde_json::to_value(view),
            None => return Ok(None),
        },
        Command::Stats => serde_json::to_value(engine.stats()),
    };
    Ok(Some(value?))
}
