use serde::{Deserialize, Serialize};

/// Current-price snapshot returned by `GET /api/stock/{symbol}`.
///
/// Fundamentals that the backend reads from an optional info block
/// (`market_cap`, `pe_ratio`, `dividend_yield`) may be `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub previous_close: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub avg_volume: u64,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    /// Fraction, not percent (0.0051 = 0.51%).
    #[serde(default)]
    pub dividend_yield: Option<f64>,
    pub week_52_high: f64,
    pub week_52_low: f64,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl StockQuote {
    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }

    /// P/E when one was reported. The backend sends `0` for a missing ratio.
    pub fn reported_pe_ratio(&self) -> Option<f64> {
        self.pe_ratio.filter(|pe| *pe > 0.0)
    }

    /// Dividend yield when the company pays one.
    pub fn reported_dividend_yield(&self) -> Option<f64> {
        self.dividend_yield.filter(|y| *y > 0.0)
    }

    /// Where the current price sits inside the 52-week range, as a fraction
    /// clamped to `[0, 1]`. `None` when the range is empty or inverted.
    pub fn week_52_position(&self) -> Option<f64> {
        let span = self.week_52_high - self.week_52_low;
        if !span.is_finite() || span <= 0.0 {
            return None;
        }
        Some(((self.current_price - self.week_52_low) / span).clamp(0.0, 1.0))
    }
}
