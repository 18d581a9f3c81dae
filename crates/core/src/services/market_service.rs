use crate::errors::CoreError;
use crate::models::company::Company;
use crate::models::dashboard::RequestTag;
use crate::models::history::{HistoricalSeries, Period};
use crate::models::market::MarketSummary;
use crate::models::prediction::Prediction;
use crate::models::quote::StockQuote;
use crate::providers::traits::MarketDataProvider;

/// Responses for one company selection, tagged with the selection they were
/// requested for.
#[derive(Debug)]
pub struct SelectionResponse {
    pub tag: RequestTag,
    pub quote: Result<StockQuote, CoreError>,
    /// `None` when the prediction could not be fetched.
    pub prediction: Option<Prediction>,
}

/// Response to one history request, tagged with the chart generation it was
/// requested for.
#[derive(Debug)]
pub struct HistoryResponse {
    pub tag: RequestTag,
    pub result: Result<HistoricalSeries, CoreError>,
}

/// Fetches dashboard data through a `MarketDataProvider`.
///
/// Failure policy:
/// - Company list, quote and history failures are returned to the caller,
///   which shows them with a retry control.
/// - Prediction failures are downgraded to `PartialUnavailable`, logged,
///   and never block the rest of the view.
pub struct MarketService {
    provider: Box<dyn MarketDataProvider>,
}

impl MarketService {
    pub fn new(provider: Box<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn companies(&self) -> Result<Vec<Company>, CoreError> {
        self.provider.get_companies().await
    }

    pub async fn quote(&self, symbol: &str) -> Result<StockQuote, CoreError> {
        self.provider.get_quote(symbol).await
    }

    /// Fetch a prediction; any failure becomes `PartialUnavailable`.
    pub async fn prediction(&self, symbol: &str) -> Result<Prediction, CoreError> {
        self.provider
            .get_prediction(symbol)
            .await
            .map_err(|e| match e {
                CoreError::PartialUnavailable { .. } => e,
                other => CoreError::PartialUnavailable {
                    symbol: symbol.to_uppercase(),
                    reason: other.to_string(),
                },
            })
    }

    /// Fetch a prediction, logging and swallowing any failure.
    pub async fn prediction_if_available(&self, symbol: &str) -> Option<Prediction> {
        match self.prediction(symbol).await {
            Ok(prediction) => Some(prediction),
            Err(e) => {
                log::warn!("{e}");
                None
            }
        }
    }

    pub async fn history(&self, symbol: &str, period: Period) -> Result<HistoricalSeries, CoreError> {
        self.provider.get_history(symbol, period).await
    }

    pub async fn market_summary(&self) -> Result<MarketSummary, CoreError> {
        self.provider.get_market_summary().await
    }

    /// Fetch quote and prediction for a selection concurrently.
    pub async fn fetch_selection(&self, tag: RequestTag, symbol: &str) -> SelectionResponse {
        log::debug!("Fetching quote and prediction for {symbol} (selection {tag})");
        let (quote, prediction) =
            futures::join!(self.quote(symbol), self.prediction_if_available(symbol));
        SelectionResponse {
            tag,
            quote,
            prediction,
        }
    }

    /// Fetch history for a chart request.
    pub async fn fetch_history(&self, tag: RequestTag, symbol: &str, period: Period) -> HistoryResponse {
        log::debug!("Fetching {period} history for {symbol} (chart {tag})");
        HistoryResponse {
            tag,
            result: self.history(symbol, period).await,
        }
    }
}
