mod analysis;
mod api;
mod config;
mod error;
mod fetcher;
mod payload;
mod report;
mod types;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::analysis::MarketAnalyzer;
use crate::api::health::HealthState;
use crate::api::{router, ApiState};
use crate::config::{Config, DEFAULT_REPORT_ZIP_CODES};
use crate::error::Result;
use crate::fetcher::RentcastClient;
use crate::report::Report;
use crate::types::{HistoryRange, ZipCode};

#[derive(Parser, Debug)]
#[command(name = "market-trends")]
#[command(about = "Real-estate market trend analysis by zip code")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Analyze zip codes and print a report
    Report {
        /// 5-digit zip codes (default: 90210 10001 30309)
        zip_codes: Vec<String>,

        /// Months of history to request, 1-60 (default: HISTORY_RANGE)
        #[arg(long)]
        history_range: Option<i64>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cfg).await,
        Command::Report {
            zip_codes,
            history_range,
        } => run_report(cfg, zip_codes, history_range).await,
    };

    if let Err(e) = result {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn serve(cfg: Config) -> Result<()> {
    let client = RentcastClient::new(&cfg)?;
    let state = ApiState {
        analyzer: Arc::new(MarketAnalyzer::new(client)),
        health: Arc::new(HealthState::new()),
        default_history_range: cfg.history_range,
    };

    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn run_report(cfg: Config, zip_codes: Vec<String>, history_range: Option<i64>) -> Result<()> {
    let history_range = match history_range {
        Some(months) => HistoryRange::new(months)?,
        None => cfg.history_range,
    };

    let requested: Vec<&str> = if zip_codes.is_empty() {
        DEFAULT_REPORT_ZIP_CODES.to_vec()
    } else {
        zip_codes.iter().map(String::as_str).collect()
    };
    let zip_codes = requested
        .iter()
        .map(|z| z.parse::<ZipCode>())
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let analyzer = MarketAnalyzer::new(RentcastClient::new(&cfg)?);
    info!(
        "Analyzing {} zip codes over {} months",
        zip_codes.len(),
        history_range.months()
    );

    for zip_code in &zip_codes {
        let outcome = analyzer.analyze_market_trends(zip_code, history_range).await;
        print!("{}", Report(&outcome));
    }

    Ok(())
}
