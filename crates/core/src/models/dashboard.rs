use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::chart::ChartModel;
use crate::models::company::Company;
use crate::models::history::{HistoricalSeries, Period};
use crate::models::market::MarketSummary;
use crate::models::prediction::Prediction;
use crate::models::quote::StockQuote;

/// Generation number a request was issued under.
///
/// A response is applied only if its tag still equals the current
/// generation of its kind; anything older was superseded by a newer
/// selection or period change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestTag(pub u64);

impl std::fmt::Display for RequestTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display state of one asynchronously loaded value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Loadable<T> {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Ready(T),
    /// The fetch succeeded but there is nothing to show.
    Empty,
    /// The fetch failed; the message is shown next to a retry control.
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Immutable snapshot of everything the dashboard renders.
///
/// Produced by `DashboardService::reduce`; a new snapshot is built for every
/// event and the previous one is never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub companies: Loadable<Vec<Company>>,
    pub search_query: String,
    pub selected: Option<Company>,
    pub quote: Loadable<StockQuote>,
    /// `None` both before loading and when the prediction is unavailable.
    pub prediction: Option<Prediction>,
    /// Last successfully fetched series; kept so an indicator toggle can
    /// rebuild the chart without refetching.
    pub history: Option<HistoricalSeries>,
    pub chart: Loadable<ChartModel>,
    pub period: Period,
    pub show_technical_indicators: bool,
    pub market_summary: Option<MarketSummary>,
    pub(crate) selection_generation: u64,
    pub(crate) chart_generation: u64,
}

impl DashboardState {
    pub fn new(period: Period, show_technical_indicators: bool) -> Self {
        Self {
            companies: Loadable::Idle,
            search_query: String::new(),
            selected: None,
            quote: Loadable::Idle,
            prediction: None,
            history: None,
            chart: Loadable::Idle,
            period,
            show_technical_indicators,
            market_summary: None,
            selection_generation: 0,
            chart_generation: 0,
        }
    }

    /// Tag for quote/prediction requests issued for the current selection.
    pub fn selection_tag(&self) -> RequestTag {
        RequestTag(self.selection_generation)
    }

    /// Tag for a history request issued for the current symbol and period.
    pub fn chart_tag(&self) -> RequestTag {
        RequestTag(self.chart_generation)
    }

    /// Companies matching the current search query (all of them for a blank query).
    pub fn filtered_companies(&self) -> Vec<&Company> {
        match &self.companies {
            Loadable::Ready(companies) => {
                crate::services::company_service::CompanyService::filter(companies, &self.search_query)
            }
            _ => Vec::new(),
        }
    }

    /// The quote is what gates the main panel; chart loading is shown inside it.
    pub fn is_loading(&self) -> bool {
        self.quote.is_loading()
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(Period::default(), true)
    }
}

/// Everything that can happen to the dashboard: user actions and fetch
/// completions. Completions carry the tag their request was issued with.
#[derive(Debug)]
pub enum DashboardEvent {
    CompaniesRequested,
    CompaniesLoaded(Result<Vec<Company>, CoreError>),
    SearchChanged(String),
    CompanySelected(Company),
    QuoteLoaded {
        tag: RequestTag,
        result: Result<StockQuote, CoreError>,
    },
    PredictionLoaded {
        tag: RequestTag,
        prediction: Option<Prediction>,
    },
    PeriodChanged(Period),
    ChartRequested,
    HistoryLoaded {
        tag: RequestTag,
        result: Result<HistoricalSeries, CoreError>,
    },
    IndicatorsToggled(bool),
    MarketSummaryLoaded(Option<MarketSummary>),
}
