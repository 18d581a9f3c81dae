use serde::{Deserialize, Serialize};

/// A listed company the dashboard can display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Company {
    /// Ticker symbol, uppercased (e.g., "AAPL")
    pub symbol: String,

    /// Display name (e.g., "Apple Inc.")
    pub name: String,

    /// Sector label (e.g., "Technology")
    pub sector: String,
}

impl Company {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        sector: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            name: name.into(),
            sector: sector.into(),
        }
    }

    /// Case-insensitive substring match over name, symbol and sector.
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.symbol.to_lowercase().contains(needle)
            || self.sector.to_lowercase().contains(needle)
    }
}

/// Body of `GET /api/companies`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyList {
    pub companies: Vec<Company>,
    #[serde(default)]
    pub total: Option<usize>,
    #[serde(default)]
    pub timestamp: Option<String>,
}
