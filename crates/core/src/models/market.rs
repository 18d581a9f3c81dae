use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::prediction::Tone;

/// Direction of an index over the last session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexStatus {
    Up,
    Down,
}

impl std::fmt::Display for IndexStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexStatus::Up => write!(f, "up"),
            IndexStatus::Down => write!(f, "down"),
        }
    }
}

/// Snapshot of one market index (S&P 500, NASDAQ, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketIndex {
    pub symbol: String,
    pub current: f64,
    pub change: f64,
    pub change_percent: f64,
    pub status: IndexStatus,
}

/// Body of `GET /api/market-summary`.
///
/// Keyed by index display name. A `BTreeMap` gives a stable iteration order
/// for rendering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketSummary {
    pub market_summary: BTreeMap<String, MarketIndex>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl MarketSummary {
    pub fn advancing(&self) -> usize {
        self.count_with(IndexStatus::Up)
    }

    pub fn declining(&self) -> usize {
        self.count_with(IndexStatus::Down)
    }

    pub fn is_empty(&self) -> bool {
        self.market_summary.is_empty()
    }

    /// Overall direction: whichever of advancing/declining is larger wins,
    /// a tie (including no indices at all) is mixed.
    pub fn sentiment(&self) -> MarketSentiment {
        MarketSentiment::from_counts(self.advancing(), self.declining())
    }

    fn count_with(&self, status: IndexStatus) -> usize {
        self.market_summary
            .values()
            .filter(|i| i.status == status)
            .count()
    }
}

/// Overall market direction derived from index statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketSentiment {
    Bullish,
    Bearish,
    Mixed,
}

impl MarketSentiment {
    pub fn from_counts(advancing: usize, declining: usize) -> Self {
        match advancing.cmp(&declining) {
            std::cmp::Ordering::Greater => MarketSentiment::Bullish,
            std::cmp::Ordering::Less => MarketSentiment::Bearish,
            std::cmp::Ordering::Equal => MarketSentiment::Mixed,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            MarketSentiment::Bullish => Tone::Success,
            MarketSentiment::Bearish => Tone::Danger,
            MarketSentiment::Mixed => Tone::Warning,
        }
    }
}

impl std::fmt::Display for MarketSentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketSentiment::Bullish => write!(f, "Bull Market"),
            MarketSentiment::Bearish => write!(f, "Bear Market"),
            MarketSentiment::Mixed => write!(f, "Mixed Market"),
        }
    }
}
