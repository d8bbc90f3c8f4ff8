//! CLI argument definitions for stresswatch.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--end-date` | yesterday (UTC) | End of the evaluation window |
//! | `--start-date` | end − 3 years | Start of the evaluation window |
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--output` | `market_stress_data.csv` | CSV artifact path |
//! | `--no-export` | `false` | Skip writing the CSV artifact |
//! | `--offline` | `false` | Use the deterministic offline data source |
//! | `--timeout-ms` | `10000` | Per-request HTTP timeout in ms |

use clap::{Parser, ValueEnum};

/// Composite market stress index over eight macro instruments.
///
/// Scores each instrument's recent rolling volatility against its own
/// trailing history, combines the scores with fixed desk weights, and
/// reports the composite next to the previous session's value.
#[derive(Debug, Parser)]
#[command(
    name = "stresswatch",
    author,
    version,
    about = "Composite market stress index tracker"
)]
pub struct Cli {
    /// End date of the evaluation window (YYYY-MM-DD). Defaults to
    /// yesterday, the most recent complete session.
    #[arg(long)]
    pub end_date: Option<String>,

    /// Start date of the evaluation window (YYYY-MM-DD). Defaults to a
    /// three-year lookback from the end date.
    #[arg(long)]
    pub start_date: Option<String>,

    /// Output format for results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// Path of the exported CSV artifact.
    #[arg(long, default_value = "market_stress_data.csv")]
    pub output: String,

    /// Skip the CSV export.
    #[arg(long, default_value_t = false)]
    pub no_export: bool,

    /// Run against the deterministic offline data source (no network).
    #[arg(long, default_value_t = false)]
    pub offline: bool,

    /// Per-request HTTP timeout budget in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text breakdown for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}
