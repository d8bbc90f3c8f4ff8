use serde::Serialize;
use stresswatch_core::{ComparativePair, ComponentScore, DateRange, TradingDate};

use crate::cli::OutputFormat;
use crate::error::CliError;

/// JSON report shape; field order is the published contract.
#[derive(Debug, Serialize)]
struct StressReport<'a> {
    start_date: TradingDate,
    end_date: TradingDate,
    composite: f64,
    components: &'a [ComponentScore],
    previous_session: TradingDate,
    previous_composite: f64,
    delta: f64,
}

pub fn render(
    pair: &ComparativePair,
    range: &DateRange,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => render_table(pair),
        OutputFormat::Json => render_json(pair, range, pretty)?,
    }

    Ok(())
}

fn render_table(pair: &ComparativePair) {
    for component in &pair.current.components {
        println!("{:<30}: {:.2}", component.name, component.score);
    }
    println!(
        "Composite Market Stress Index: {:.2}",
        pair.current.composite
    );

    let previous_label = format!("Previous session ({})", pair.previous_session);
    println!("{:<30}: {:.2}", previous_label, pair.previous.composite);
    println!("{:<30}: {:+.2}", "Day-over-day change", pair.delta());
}

fn render_json(pair: &ComparativePair, range: &DateRange, pretty: bool) -> Result<(), CliError> {
    let report = StressReport {
        start_date: range.start(),
        end_date: range.end(),
        composite: pair.current.composite,
        components: &pair.current.components,
        previous_session: pair.previous_session,
        previous_composite: pair.previous.composite,
        delta: pair.delta(),
    };

    let payload = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{payload}");

    Ok(())
}
