use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about = "Stock market dashboard in the terminal", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// JSON settings file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend root URL; overrides the settings file and MARKET_DASHBOARD_API_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List companies, optionally filtered by name, symbol or sector.
    Companies {
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Current price snapshot for a symbol.
    Quote { symbol: String },

    /// Next-day prediction for a symbol.
    Prediction { symbol: String },

    /// Raw historical records for a symbol.
    History {
        symbol: String,

        /// One of 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y.
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Chart model (labels + series) for a symbol, as JSON.
    Chart {
        symbol: String,

        #[arg(short, long)]
        period: Option<String>,

        /// Leave out the moving-average lines.
        #[arg(long)]
        no_indicators: bool,
    },

    /// Major market indices.
    Summary,

    /// Full dashboard view for one company: quote, prediction and chart.
    Show {
        symbol: String,

        #[arg(short, long)]
        period: Option<String>,
    },
}
