use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::MarketDataProvider;
use crate::errors::CoreError;
use crate::models::company::{Company, CompanyList};
use crate::models::history::{HistoricalSeries, Period, DAILY_INTERVAL};
use crate::models::market::MarketSummary;
use crate::models::prediction::Prediction;
use crate::models::quote::StockQuote;
use crate::models::settings::Settings;

/// REST client for the dashboard backend.
///
/// - **Endpoints**: `/api/companies`, `/api/stock/{symbol}`,
///   `/api/prediction/{symbol}`, `/api/history/{symbol}`, `/api/market-summary`
/// - **No retries**: a failed request surfaces immediately; retrying is the
///   caller's decision.
///
/// Symbols are upper-cased before they are placed in a path.
pub struct DashboardApiProvider {
    client: Client,
    base_url: String,
}

impl DashboardApiProvider {
    pub fn new(settings: &Settings) -> Result<Self, CoreError> {
        settings.validate()?;

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        let client = builder
            .build()
            .map_err(|e| CoreError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url().to_string(),
        })
    }

    /// Absolute URL for an API path such as `/api/companies`.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Normalise a ticker for use in a path segment.
    ///
    /// Accepts letters, digits and the punctuation real tickers use
    /// (`.`, `-`, `^`, `=`); anything else would change the path structure.
    pub fn normalize_symbol(symbol: &str) -> Result<String, CoreError> {
        let trimmed = symbol.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation("Symbol must not be empty".into()));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='))
        {
            return Err(CoreError::Validation(format!(
                "Invalid symbol '{symbol}': only letters, digits, '.', '-', '^' and '=' are allowed"
            )));
        }
        Ok(trimmed.to_uppercase())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CoreError> {
        let url = self.endpoint_url(path);
        log::debug!("GET {url} {query:?}");

        let resp = self.client.get(&url).query(query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::HttpStatus {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            CoreError::Deserialization(format!("Failed to parse response from {path}: {e}"))
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for DashboardApiProvider {
    fn name(&self) -> &str {
        "Dashboard API"
    }

    async fn get_companies(&self) -> Result<Vec<Company>, CoreError> {
        let list: CompanyList = self.get_json("/api/companies", &[]).await?;
        Ok(list.companies)
    }

    async fn get_quote(&self, symbol: &str) -> Result<StockQuote, CoreError> {
        let symbol = Self::normalize_symbol(symbol)?;
        self.get_json(&format!("/api/stock/{symbol}"), &[]).await
    }

    async fn get_prediction(&self, symbol: &str) -> Result<Prediction, CoreError> {
        let symbol = Self::normalize_symbol(symbol)?;
        let prediction: Prediction = self
            .get_json(&format!("/api/prediction/{symbol}"), &[])
            .await?;
        prediction.validate()?;
        Ok(prediction)
    }

    async fn get_history(&self, symbol: &str, period: Period) -> Result<HistoricalSeries, CoreError> {
        let symbol = Self::normalize_symbol(symbol)?;
        let series: HistoricalSeries = self
            .get_json(
                &format!("/api/history/{symbol}"),
                &[("period", period.as_str()), ("interval", DAILY_INTERVAL)],
            )
            .await?;
        series.check_ordering()?;
        Ok(series)
    }

    async fn get_market_summary(&self) -> Result<MarketSummary, CoreError> {
        self.get_json("/api/market-summary", &[]).await
    }
}
