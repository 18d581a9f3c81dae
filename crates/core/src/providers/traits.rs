use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::company::Company;
use crate::models::history::{HistoricalSeries, Period};
use crate::models::market::MarketSummary;
use crate::models::prediction::Prediction;
use crate::models::quote::StockQuote;

/// Source of everything the dashboard displays.
///
/// The HTTP implementation talks to the dashboard backend; tests plug in
/// in-memory implementations. Services only ever see this trait.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Full company directory.
    async fn get_companies(&self) -> Result<Vec<Company>, CoreError>;

    /// Current-price snapshot for one symbol.
    async fn get_quote(&self, symbol: &str) -> Result<StockQuote, CoreError>;

    /// Next-day forecast. May legitimately fail for symbols without enough data.
    async fn get_prediction(&self, symbol: &str) -> Result<Prediction, CoreError>;

    /// Daily records over `period`, ascending by date.
    async fn get_history(&self, symbol: &str, period: Period) -> Result<HistoricalSeries, CoreError>;

    /// Snapshot of the major market indices.
    async fn get_market_summary(&self) -> Result<MarketSummary, CoreError>;
}
