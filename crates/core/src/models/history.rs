use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Sampling interval requested from `/api/history`. The dashboard only ever
/// asks for daily bars.
pub const DAILY_INTERVAL: &str = "1d";

/// Time span of a historical-data request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[default]
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
}

impl Period {
    /// All accepted periods, shortest first.
    pub const ALL: [Period; 7] = [
        Period::FiveDays,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::TwoYears,
        Period::FiveYears,
    ];

    /// Query-string value (`5d`, `1mo`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
        }
    }

    /// Label shown in the period selector.
    pub fn display_name(&self) -> &'static str {
        match self {
            Period::FiveDays => "5 Days",
            Period::OneMonth => "1 Month",
            Period::ThreeMonths => "3 Months",
            Period::SixMonths => "6 Months",
            Period::OneYear => "1 Year",
            Period::TwoYears => "2 Years",
            Period::FiveYears => "5 Years",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Period::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown period '{s}': expected one of 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y"
                ))
            })
    }
}

/// Moving-average indicators the backend may attach to a daily record.
///
/// Declaration order is the canonical chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Indicator {
    Ma5,
    Ma20,
    Ma50,
}

impl Indicator {
    /// Canonical order: MA5, MA20, MA50.
    pub const ALL: [Indicator; 3] = [Indicator::Ma5, Indicator::Ma20, Indicator::Ma50];

    pub fn label(&self) -> &'static str {
        match self {
            Indicator::Ma5 => "MA5",
            Indicator::Ma20 => "MA20",
            Indicator::Ma50 => "MA50",
        }
    }

    /// Trailing window length in trading days.
    pub fn window(&self) -> usize {
        match self {
            Indicator::Ma5 => 5,
            Indicator::Ma20 => 20,
            Indicator::Ma50 => 50,
        }
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One trading day as returned by `/api/history/{symbol}`.
///
/// Indicator fields are `None` both when the key is missing and when the
/// backend sends `null` (not enough trailing history for the window).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "Volume")]
    pub volume: f64,

    #[serde(rename = "MA5", default, skip_serializing_if = "Option::is_none")]
    pub ma5: Option<f64>,
    #[serde(rename = "MA20", default, skip_serializing_if = "Option::is_none")]
    pub ma20: Option<f64>,
    #[serde(rename = "MA50", default, skip_serializing_if = "Option::is_none")]
    pub ma50: Option<f64>,

    // Oscillators and bands are carried through but not charted.
    #[serde(rename = "RSI", default, skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(rename = "MACD", default, skip_serializing_if = "Option::is_none")]
    pub macd: Option<f64>,
    #[serde(rename = "Signal", default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<f64>,
    #[serde(rename = "BB_Upper", default, skip_serializing_if = "Option::is_none")]
    pub bb_upper: Option<f64>,
    #[serde(rename = "BB_Lower", default, skip_serializing_if = "Option::is_none")]
    pub bb_lower: Option<f64>,
}

impl DailyRecord {
    /// A record with prices only and no indicators.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            ma5: None,
            ma20: None,
            ma50: None,
            rsi: None,
            macd: None,
            signal: None,
            bb_upper: None,
            bb_lower: None,
        }
    }

    /// Value of a moving-average indicator on this day, if the backend computed one.
    pub fn indicator(&self, indicator: Indicator) -> Option<f64> {
        match indicator {
            Indicator::Ma5 => self.ma5,
            Indicator::Ma20 => self.ma20,
            Indicator::Ma50 => self.ma50,
        }
    }

    /// Builder-style setter used when constructing records by hand.
    #[must_use]
    pub fn with_indicator(mut self, indicator: Indicator, value: f64) -> Self {
        match indicator {
            Indicator::Ma5 => self.ma5 = Some(value),
            Indicator::Ma20 => self.ma20 = Some(value),
            Indicator::Ma50 => self.ma50 = Some(value),
        }
        self
    }
}

/// Summary block of a history response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub total_points: usize,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub highest_price: f64,
    pub lowest_price: f64,
    pub avg_volume: f64,
}

impl HistorySummary {
    /// Compute the summary the backend would send for `data`.
    pub fn from_records(data: &[DailyRecord]) -> Self {
        if data.is_empty() {
            return Self {
                total_points: 0,
                start_date: None,
                end_date: None,
                highest_price: 0.0,
                lowest_price: 0.0,
                avg_volume: 0.0,
            };
        }

        let highest_price = data.iter().map(|r| r.high).fold(f64::MIN, f64::max);
        let lowest_price = data.iter().map(|r| r.low).fold(f64::MAX, f64::min);
        let avg_volume = data.iter().map(|r| r.volume).sum::<f64>() / data.len() as f64;

        Self {
            total_points: data.len(),
            start_date: data.first().map(|r| r.date),
            end_date: data.last().map(|r| r.date),
            highest_price,
            lowest_price,
            avg_volume,
        }
    }
}

/// Result of one `/api/history/{symbol}` fetch.
///
/// Immutable once received; a period or symbol change replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    pub symbol: String,
    /// Echoed by the backend, which may coerce an unknown period to `1y`.
    pub period: String,
    pub interval: String,
    pub data: Vec<DailyRecord>,
    pub summary: HistorySummary,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HistoricalSeries {
    /// Build a series locally (tests, fixtures), computing its summary.
    pub fn new(symbol: impl Into<String>, period: Period, data: Vec<DailyRecord>) -> Self {
        let summary = HistorySummary::from_records(&data);
        Self {
            symbol: symbol.into().to_uppercase(),
            period: period.as_str().to_string(),
            interval: DAILY_INTERVAL.to_string(),
            data,
            summary,
            timestamp: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check that dates are strictly ascending (which also rules out duplicates).
    pub fn check_ordering(&self) -> Result<(), CoreError> {
        for pair in self.data.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(CoreError::InvalidResponse(format!(
                    "History for {} is not strictly ascending: {} followed by {}",
                    self.symbol, pair[0].date, pair[1].date
                )));
            }
        }
        Ok(())
    }
}
