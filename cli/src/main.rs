//! CLI entrypoint for quiz-quorum
//!
//! Wires the provider adapters, answer cache and use case together and
//! exposes the `ask` and `cache` commands.

mod output;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use output::ConsoleFormatter;
use quiz_application::{
    AnswerCache, CompletionPort, EvaluateMode, EvaluateQuestionUseCase, ProviderGateway,
};
use quiz_domain::ProviderSlot;
use quiz_infrastructure::providers::OPENAI_BASE_URL;
use quiz_infrastructure::{
    ConfigLoader, FileConfig, GeminiAdapter, JsonFileStore, OpenAiCompatAdapter,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "quiz-quorum",
    version,
    about = "Multiple-choice quiz answering with multi-provider consensus"
)]
struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Explicit config file path
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ignore config files and use built-in defaults
    #[arg(long, global = true)]
    no_config: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer a multiple-choice question
    Ask {
        /// The question text
        question: String,

        /// An answer option, in order; repeat 2 to 4 times
        #[arg(short = 'o', long = "option", required = true)]
        options: Vec<String>,

        /// "single" asks only the primary provider, "multi" asks all
        /// three and reconciles
        #[arg(long, default_value = "multi")]
        mode: EvaluateMode,

        /// Emit the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or manage the answer cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Show per-provider entry counts
    Stats {
        /// Emit the counts as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write all in-memory entries to disk now
    Flush,
    /// Drop all cached answers and delete the cache documents
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };
    config.validate().context("invalid configuration")?;

    let cache_dir = config
        .cache
        .dir
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(ConfigLoader::default_cache_dir);

    let store = Arc::new(JsonFileStore::new(&cache_dir)?);
    let cache = AnswerCache::load(store, config.cache.capacity).await;
    info!("Using cache directory {}", cache_dir.display());

    match cli.command {
        Command::Ask {
            question,
            options,
            mode,
            json,
        } => {
            let gateways = build_gateways(&config, &cache);
            let use_case = EvaluateQuestionUseCase::new(gateways);

            let evaluation = use_case.evaluate(question, options, mode).await?;

            if json {
                println!("{}", ConsoleFormatter::format_json(&evaluation));
            } else {
                println!("{}", ConsoleFormatter::format(&evaluation));
            }
        }
        Command::Cache { action } => match action {
            CacheAction::Stats { json } => {
                let stats = cache.stats();
                if json {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                } else {
                    println!("{}", ConsoleFormatter::format_stats(&stats));
                }
            }
            CacheAction::Flush => {
                cache.flush().await;
                println!("Cache flushed");
            }
            CacheAction::Clear => {
                cache.clear().await;
                println!("Cache cleared");
            }
        },
    }

    cache.shutdown().await;
    Ok(())
}

/// Build one gateway per provider slot, in slot priority order.
///
/// The first and third slots speak the OpenAI-compatible protocol with
/// different base URLs; the second speaks Gemini generateContent. All
/// three share one HTTP client.
fn build_gateways(config: &FileConfig, cache: &Arc<AnswerCache>) -> Vec<Arc<ProviderGateway>> {
    let client = reqwest::Client::new();
    let providers = &config.providers;

    let first: Arc<dyn CompletionPort> = Arc::new(OpenAiCompatAdapter::new(
        client.clone(),
        providers.first.model.clone(),
        providers
            .first
            .base_url
            .clone()
            .unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
        providers.first.api_key_env.clone(),
    ));

    let second: Arc<dyn CompletionPort> = Arc::new(GeminiAdapter::new(
        client.clone(),
        providers.second.model.clone(),
        providers.second.api_key_env.clone(),
    ));

    let third: Arc<dyn CompletionPort> = Arc::new(OpenAiCompatAdapter::new(
        client,
        providers.third.model.clone(),
        providers
            .third
            .base_url
            .clone()
            .unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
        providers.third.api_key_env.clone(),
    ));

    vec![
        Arc::new(ProviderGateway::new(
            ProviderSlot::First,
            first,
            Arc::clone(cache),
        )),
        Arc::new(ProviderGateway::new(
            ProviderSlot::Second,
            second,
            Arc::clone(cache),
        )),
        Arc::new(ProviderGateway::new(
            ProviderSlot::Third,
            third,
            Arc::clone(cache),
        )),
    ]
}
