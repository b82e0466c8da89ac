//! Hobart CLI binary.
//!
//! Runs a scoring pass over a stats snapshot and writes the factor table and
//! both baskets.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use hobart::{BasketOrdering, PassOutput, PipelineConfig, run_indexed_pass, run_pass};
use hobart_data::{IndexHoldings, PriceBar, assemble_records, read_price_bars, read_stats_csv};
use hobart_factors::{Category, factors_by_category};
use hobart_output::{DirectoryStore, Environment, ExportFormat};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hobart")]
#[command(about = "Hobart: multi-factor equity ranking", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a universe and write the factor table and baskets
    Score {
        /// Per-stock statistics CSV
        #[arg(long)]
        stats: PathBuf,

        /// Daily price history CSV
        #[arg(long)]
        prices: Option<PathBuf>,

        /// Index holdings CSV restricting the universe
        #[arg(long)]
        holdings: Option<PathBuf>,

        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Environment tag (PRODUCTION, STAGING or DEV)
        #[arg(long)]
        env: Option<String>,

        /// Computation date as YYYYMMDD
        #[arg(long)]
        date: Option<String>,

        /// Stocks per basket
        #[arg(long)]
        basket_size: Option<usize>,

        /// Index holdings considered
        #[arg(long)]
        universe_cap: Option<usize>,

        /// Basket ordering (lowest-first or highest-first)
        #[arg(long)]
        ordering: Option<String>,

        /// Output directory
        #[arg(long)]
        out: PathBuf,

        /// Output format (csv, json or pretty-json)
        #[arg(long, default_value = "csv")]
        format: String,
    },

    /// List the ranked factors by category
    Factors,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Score {
            stats,
            prices,
            holdings,
            config,
            env,
            date,
            basket_size,
            universe_cap,
            ordering,
            out,
            format,
        } => {
            let mut config = config.map_or_else(
                || Ok(PipelineConfig::default()),
                |path| PipelineConfig::from_json_file(&path),
            )?;
            if let Some(env) = env {
                config.environment = env.parse::<Environment>()?;
            }
            if let Some(date) = date {
                config.as_of = NaiveDate::parse_from_str(&date, "%Y%m%d")?;
            }
            if let Some(size) = basket_size {
                config.basket_size = size;
            }
            if let Some(cap) = universe_cap {
                config.universe_cap = Some(cap);
            }
            if let Some(ordering) = ordering {
                config.basket_ordering = ordering.parse::<BasketOrdering>()?;
            }
            let format = parse_format(&format)?;

            let output = score(&stats, prices.as_deref(), holdings.as_deref(), &config)?;
            let store = DirectoryStore::new(&out)?;
            let locations = output.persist(&store, format)?;

            print_summary(&output);
            for location in locations {
                println!("  wrote {}", location);
            }
        }
        Commands::Factors => list_factors(),
    }

    Ok(())
}

fn parse_format(format: &str) -> Result<ExportFormat, Box<dyn std::error::Error>> {
    match format.to_lowercase().as_str() {
        "csv" => Ok(ExportFormat::Csv),
        "json" => Ok(ExportFormat::Json),
        "pretty-json" | "pretty_json" => Ok(ExportFormat::PrettyJson),
        other => Err(format!("unknown output format: {}", other).into()),
    }
}

fn score(
    stats: &Path,
    prices: Option<&Path>,
    holdings: Option<&Path>,
    config: &PipelineConfig,
) -> Result<PassOutput, Box<dyn std::error::Error>> {
    let stats = read_stats_csv(File::open(stats)?)?;
    let bars: Vec<PriceBar> = match prices {
        Some(path) => read_price_bars(File::open(path)?)?,
        None => Vec::new(),
    };
    info!(stats = stats.len(), bars = bars.len(), "loaded inputs");

    let records = assemble_records(&stats, &bars)?;
    let output = match holdings {
        Some(path) => {
            let holdings = IndexHoldings::parse(&fs::read_to_string(path)?)?;
            run_indexed_pass(&records, &holdings, config)?
        }
        None => run_pass(&records, config)?,
    };
    Ok(output)
}

fn print_summary(output: &PassOutput) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!(
        "║{:^62}║",
        format!(
            "HOBART {} {}",
            output.config.environment,
            output.config.as_of.format("%Y-%m-%d")
        )
    );
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Universe: {} stocks", output.scored.len());
    println!("Ordering: {}", output.config.basket_ordering);
    if !output.degenerate().is_empty() {
        let names: Vec<&str> = output.degenerate().iter().map(|f| f.name()).collect();
        println!("Undefined z-scores: {}", names.join(", "));
    }

    for (title, stocks) in [
        ("Top basket", &output.baskets.top),
        ("Bottom basket", &output.baskets.bottom),
    ] {
        println!("\n{} ({})", title, stocks.len());
        println!("─────────────────────────────");
        for stock in stocks.iter().take(10) {
            println!("  {:<8} {:>8.3}", stock.symbol, stock.final_score);
        }
        if stocks.len() > 10 {
            println!("  ... {} more", stocks.len() - 10);
        }
    }
    println!();
}

fn list_factors() {
    println!("\nRanked factors (rank 1 is best)\n");
    for category in Category::ALL {
        println!("{}", category.name().to_uppercase());
        for info in factors_by_category(category) {
            let direction = if info.smaller_is_better {
                "smaller is better"
            } else {
                "larger is better"
            };
            println!("  {:<18} {:<18} {}", info.name, direction, info.description);
        }
        println!();
    }
}
