//! `deck`: generate analysis slide decks from the terminal

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use deck_catalog::TopicCatalog;
use deck_core::{export_deck, DeckBuilder, DeckConfig, SlideView, ViewOptions};
use deck_model::ChartStyle;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "deck")]
#[command(about = "Turn predefined traffic analysis topics into slides", version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available topics
    Topics,
    /// Check the analysis service connection
    Check,
    /// Generate a deck
    Generate(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Topic id or display name (repeatable; defaults from config)
    #[arg(short, long = "topic")]
    topics: Vec<String>,

    /// Refinement as `topic_id=text` (repeatable)
    #[arg(short, long = "refine", value_parser = parse_refinement)]
    refinements: Vec<(String, String)>,

    /// Write the JSON export here
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use demo data only
    #[arg(long)]
    offline: bool,

    /// Analysis service endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Chart style: modern, classic or minimal
    #[arg(long)]
    style: Option<ChartStyle>,

    /// Hide generated queries
    #[arg(long)]
    no_sql: bool,

    /// Hide source, confidence and request metadata
    #[arg(long)]
    no_metadata: bool,
}

fn parse_refinement(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((id, text)) if !id.trim().is_empty() => Ok((id.trim().to_string(), text.to_string())),
        _ => Err(format!("expected topic_id=text, got `{raw}`")),
    }
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<DeckConfig> {
    match path {
        Some(path) => DeckConfig::load(path).with_context(|| format!("loading {}", path.display())),
        None => Ok(DeckConfig::default()),
    }
}

fn list_topics() {
    for topic in TopicCatalog::builtin().list_topics() {
        println!(
            "{:<22} {:<22} {:?} [{}]",
            topic.id,
            topic.display_name,
            topic.default_chart_hint,
            topic.column_names().join(", ")
        );
    }
}

async fn check(config: &DeckConfig) -> Result<()> {
    let builder = DeckBuilder::new(config)?;
    println!("Analysis service: {}", builder.check_connection().await);
    Ok(())
}

async fn generate(mut config: DeckConfig, args: GenerateArgs) -> Result<()> {
    if let Some(endpoint) = args.endpoint {
        config = config.with_remote_endpoint(endpoint);
    }
    if args.offline {
        config = config.offline();
    }
    if let Some(style) = args.style {
        config = config.with_chart_style(style);
    }
    if args.no_sql {
        config = config.with_sql_display(false);
    }
    if args.no_metadata {
        config = config.with_metadata(false);
    }
    config.validate()?;

    let catalog = TopicCatalog::builtin();
    let requested = if args.topics.is_empty() {
        config.default_topics.clone()
    } else {
        args.topics
    };
    // Display names resolve to ids; anything else is passed through and
    // reported as an unknown topic.
    let topic_ids: Vec<String> = requested
        .into_iter()
        .map(|name| catalog.lookup(&name).map_or(name, |topic| topic.id.clone()))
        .collect();
    let refinements: BTreeMap<String, String> = args.refinements.into_iter().collect();

    let builder = DeckBuilder::new(&config)?;
    let deck = tokio::select! {
        deck = builder.generate_deck(&topic_ids, &refinements) => deck,
        _ = tokio::signal::ctrl_c() => bail!("interrupted"),
    };

    let options = ViewOptions::from(&config);
    for (idx, slide) in deck.slides.iter().enumerate() {
        println!("{}", SlideView::new(slide, idx + 1, options));
    }
    for failure in &deck.failures {
        eprintln!("error: {failure}");
    }
    println!("{}", deck.summary());

    if let Some(path) = args.output {
        let bytes = export_deck(&deck.slides)?;
        std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
        println!("Exported {} slides to {}", deck.len(), path.display());
    }

    if deck.is_empty() && !deck.failures.is_empty() {
        bail!("no slides generated");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = load_config(cli.config.as_ref())?;
    match cli.command {
        Command::Topics => list_topics(),
        Command::Check => check(&config).await?,
        Command::Generate(args) => generate(config, args).await?,
    }
    Ok(())
}
