use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use configuration::ConfigArgs;
use data_loader::SeriesLoader;
use recommender::{parse_millis, MetricsIndex, QueryService, RankedAsset};
use std::sync::Arc;

/// The main entry point for the crypto recommender.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load RECOMMENDER__* overrides from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config_or_default(&cli.config_args.config)
        .with_context(|| format!("loading {}", cli.config_args.config.display()))?;
    let _log_guard = configuration::init_tracing(&config.logging)?;

    // Every command needs the index, so it is built up front. A load failure ends here.
    let loader = SeriesLoader::from_settings(&config.data)?;
    let index = MetricsIndex::load(&loader)
        .await
        .with_context(|| format!("building index from {}", loader.prices_dir().display()))?;
    let service = Arc::new(QueryService::new(index));

    // Execute the appropriate command
    match cli.command {
        Commands::Serve => web_server::serve(service, loader, &config).await?,
        Commands::Summary(args) => handle_summary(&service, &args.symbol)?,
        Commands::Rank => handle_rank(&service),
        Commands::Highest(args) => handle_highest(&service, &args.millis)?,
        Commands::Symbols => {
            for symbol in service.known_symbols() {
                println!("{}", symbol);
            }
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Descriptive statistics and normalized-range ranking over historical crypto prices.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config_args: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the query API over HTTP.
    Serve,
    /// Print the oldest/newest/min/max prices of one asset.
    Summary(SummaryArgs),
    /// Print every asset ranked by normalized range, highest first.
    Rank,
    /// Print the asset with the highest normalized range on a given UTC day.
    Highest(HighestArgs),
    /// List the known asset symbols.
    Symbols,
}

#[derive(Parser)]
struct SummaryArgs {
    /// The asset symbol (e.g., "XRP").
    #[arg(long)]
    symbol: String,
}

#[derive(Parser)]
struct HighestArgs {
    /// Any instant within the day, in milliseconds since the Unix epoch.
    #[arg(long, allow_negative_numbers = true)]
    millis: String,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_summary(service: &QueryService, symbol: &str) -> anyhow::Result<()> {
    let summary = service.asset_summary(symbol)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn handle_rank(service: &QueryService) {
    println!("{}", ranking_table(&service.ranked_by_normalized_range()));
}

fn handle_highest(service: &QueryService, millis: &str) -> anyhow::Result<()> {
    let leader = service.highest_normalized_range_for_date(parse_millis(millis)?)?;
    println!(
        "{} had the highest normalized range on {}: {}",
        leader.symbol, leader.date, leader.normalized_range
    );
    Ok(())
}

/// Renders the ranking with one row per asset; undefined ranges show as "n/a".
fn ranking_table(ranked: &[RankedAsset]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["#", "Asset", "Normalized Range"]);

    for (position, row) in ranked.iter().enumerate() {
        let range = row
            .normalized_range
            .map(|r| r.round_dp(6).normalize().to_string())
            .unwrap_or_else(|| "n/a".to_string());
        table.add_row(vec![
            Cell::new(position + 1),
            Cell::new(&row.symbol),
            Cell::new(range).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}
