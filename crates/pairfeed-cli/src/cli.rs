//! CLI argument definitions for pairfeed.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `windows` | List performance window literals |
//! | `encode` | Emit one NDJSON pair event |
//! | `describe` | Print a diagnostic line per event of a stream |
//! | `validate` | Check a stream and print a summary |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--log-level` | `warn` | Log filter used when `RUST_LOG` is unset |
//!
//! # Examples
//!
//! ```bash
//! pairfeed encode vwap --pair btcusd --vwap 42.50 --timestamp 2024-01-01T00:00:00Z >> feed.ndjson
//! pairfeed validate --input feed.ndjson --pretty
//! RUST_LOG=debug pairfeed describe < feed.ndjson
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Inspect and produce pair update streams.
#[derive(Debug, Parser)]
#[command(
    name = "pairfeed",
    author,
    version,
    about = "Inspect and produce pair update streams"
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log filter directive used when RUST_LOG is not set (e.g. `debug`, `pairfeed_core=trace`).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every supported performance window.
    Windows,

    /// Encode a single update as one NDJSON line.
    ///
    /// # Examples
    ///
    ///   pairfeed encode performance --pair btcusd --window 1w --performance -2.5
    Encode(EncodeArgs),

    /// Print `<pair> <update>` for every event of a stream.
    Describe(InputArgs),

    /// Validate a stream: every line decodes and timestamps never go backwards.
    Validate(InputArgs),
}

/// Stream input selection.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// NDJSON file to read; stdin when omitted.
    #[arg(long)]
    pub input: Option<PathBuf>,
}

/// Arguments for the `encode` command group.
#[derive(Debug, Args)]
pub struct EncodeArgs {
    #[command(subcommand)]
    pub update: EncodeCommand,
}

/// Update kinds accepted by `encode`.
#[derive(Debug, Subcommand)]
pub enum EncodeCommand {
    /// Volume weighted average price update.
    Vwap(VwapArgs),
    /// Performance update for a window.
    Performance(PerformanceArgs),
    /// Trendline point for a window.
    Trendline(TrendlineArgs),
}

#[derive(Debug, Args)]
pub struct VwapArgs {
    #[arg(long)]
    pub pair: String,

    /// Decimal VWAP, e.g. 42.50.
    #[arg(long, allow_hyphen_values = true)]
    pub vwap: String,

    /// RFC3339 timestamp; current time when omitted.
    #[arg(long)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Args)]
pub struct PerformanceArgs {
    #[arg(long)]
    pub pair: String,

    /// One of 24h, 1w, 1m, 3m, 6m, ytd, 1y, 2y, 3y, 4y, 5y.
    #[arg(long)]
    pub window: String,

    /// Signed decimal performance.
    #[arg(long, allow_hyphen_values = true)]
    pub performance: String,
}

#[derive(Debug, Args)]
pub struct TrendlineArgs {
    #[arg(long)]
    pub pair: String,

    #[arg(long)]
    pub window: String,

    /// RFC3339 timestamp; current time when omitted.
    #[arg(long)]
    pub timestamp: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub price: String,

    #[arg(long, allow_hyphen_values = true)]
    pub volume: String,
}
