mod cli;
mod error;
mod export;
mod output;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stresswatch_core::{
    ComparativeRunner, CompositeAggregator, DateRange, HistoryProvider, ReqwestHttpClient,
    StressConfig, TradingDate, YahooHistory, DEFAULT_LOOKBACK_DAYS,
};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let range = resolve_range(&cli)?;

    tracing::info!(start = %range.start(), end = %range.end(), "evaluating stress index");

    let source = if cli.offline {
        YahooHistory::default()
    } else {
        YahooHistory::with_http_client(Arc::new(ReqwestHttpClient::new()))
            .with_timeout_ms(cli.timeout_ms)
    };

    let provider = HistoryProvider::new(Arc::new(source));
    let aggregator = CompositeAggregator::new(StressConfig::default_markets());
    let runner = ComparativeRunner::new(aggregator);

    let pair = runner.compare_to_previous_session(&provider, &range).await;

    output::render(&pair, &range, cli.format, cli.pretty)?;

    if !cli.no_export {
        export::write_csv(&cli.output, &pair.current)?;
        tracing::info!(path = %cli.output, "results saved");
    }

    Ok(())
}

fn resolve_range(cli: &Cli) -> Result<DateRange, CliError> {
    let end = match &cli.end_date {
        Some(raw) => TradingDate::parse(raw)?,
        None => TradingDate::yesterday_utc(),
    };

    let start = match &cli.start_date {
        Some(raw) => TradingDate::parse(raw)?,
        None => end.minus_days(DEFAULT_LOOKBACK_DAYS),
    };

    DateRange::new(start, end).map_err(CliError::from)
}
