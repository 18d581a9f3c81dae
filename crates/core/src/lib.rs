pub mod errors;
pub mod format;
pub mod models;
pub mod providers;
pub mod services;

use models::{
    chart::ChartModel,
    company::Company,
    dashboard::{DashboardEvent, DashboardState, Loadable, RequestTag},
    history::{HistoricalSeries, Period},
    settings::Settings,
};
use providers::{dashboard_api::DashboardApiProvider, traits::MarketDataProvider};
use services::{
    chart_service::{ChartOptions, ChartService},
    company_service::CompanyService,
    dashboard_service::DashboardService,
    market_service::{HistoryResponse, MarketService, SelectionResponse},
};

use errors::CoreError;

/// Main entry point for the market dashboard core library.
/// Holds the current view-state snapshot and all services needed to advance it.
#[must_use]
pub struct MarketDashboard {
    settings: Settings,
    market_service: MarketService,
    chart_service: ChartService,
    dashboard_service: DashboardService,
    state: DashboardState,
}

impl std::fmt::Debug for MarketDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketDashboard")
            .field("provider", &self.market_service.provider_name())
            .field("settings", &self.settings)
            .field("selected", &self.state.selected.as_ref().map(|c| &c.symbol))
            .field("period", &self.state.period)
            .finish()
    }
}

impl MarketDashboard {
    /// Create a dashboard that talks to the backend named in `settings`.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        let provider = DashboardApiProvider::new(&settings)?;
        Ok(Self::with_provider(settings, Box::new(provider)))
    }

    /// Create a dashboard over any data provider.
    pub fn with_provider(settings: Settings, provider: Box<dyn MarketDataProvider>) -> Self {
        let state = DashboardState::new(settings.default_period, settings.show_technical_indicators);
        Self {
            settings,
            market_service: MarketService::new(provider),
            chart_service: ChartService::new(),
            dashboard_service: DashboardService::new(),
            state,
        }
    }

    /// Current view-state snapshot.
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Direct access to the fetch layer, for callers that drive requests
    /// themselves and feed the tagged responses back through
    /// `apply_selection_response` / `apply_history_response`.
    pub fn market_service(&self) -> &MarketService {
        &self.market_service
    }

    // ── Company Directory ───────────────────────────────────────────

    /// Fetch the company list.
    pub async fn load_companies(&mut self) -> &DashboardState {
        self.dispatch(DashboardEvent::CompaniesRequested);
        let result = self.market_service.companies().await;
        self.dispatch(DashboardEvent::CompaniesLoaded(result))
    }

    /// Update the company search query.
    pub fn search(&mut self, query: impl Into<String>) -> &DashboardState {
        self.dispatch(DashboardEvent::SearchChanged(query.into()))
    }

    // ── Selection ───────────────────────────────────────────────────

    /// Record a new selection and return the tags its requests must carry:
    /// `(selection, chart)`. Any response still in flight for an earlier
    /// selection will be discarded when it arrives.
    pub fn begin_selection(&mut self, company: Company) -> (RequestTag, RequestTag) {
        self.dispatch(DashboardEvent::CompanySelected(company));
        (self.state.selection_tag(), self.state.chart_tag())
    }

    /// Select a company and load its quote, prediction and chart.
    ///
    /// All three requests run concurrently. A prediction failure leaves
    /// `prediction` empty without affecting the rest.
    pub async fn select_company(&mut self, company: Company) -> &DashboardState {
        let symbol = company.symbol.clone();
        let period = self.state.period;
        let (selection_tag, chart_tag) = self.begin_selection(company);

        let (selection, history) = futures::join!(
            self.market_service.fetch_selection(selection_tag, &symbol),
            self.market_service.fetch_history(chart_tag, &symbol, period),
        );

        self.apply_selection_response(selection);
        self.apply_history_response(history)
    }

    /// Select a company from the loaded directory by symbol.
    pub async fn select_symbol(&mut self, symbol: &str) -> Result<&DashboardState, CoreError> {
        let company = match &self.state.companies {
            Loadable::Ready(companies) => {
                CompanyService::find_by_symbol(companies, symbol).cloned()
            }
            _ => None,
        }
        .ok_or_else(|| CoreError::Validation(format!("Unknown company symbol '{symbol}'")))?;

        Ok(self.select_company(company).await)
    }

    /// Re-issue every request for the current selection (manual retry).
    pub async fn retry_selection(&mut self) -> &DashboardState {
        match self.state.selected.clone() {
            Some(company) => self.select_company(company).await,
            None => &self.state,
        }
    }

    pub fn apply_selection_response(&mut self, response: SelectionResponse) -> &DashboardState {
        self.state = self.dashboard_service.apply_selection(&self.state, response);
        &self.state
    }

    pub fn apply_history_response(&mut self, response: HistoryResponse) -> &DashboardState {
        self.state = self.dashboard_service.apply_history(&self.state, response);
        &self.state
    }

    // ── Chart ───────────────────────────────────────────────────────

    /// Change the chart period and refetch history for the current selection.
    pub async fn set_period(&mut self, period: Period) -> &DashboardState {
        self.dispatch(DashboardEvent::PeriodChanged(period));
        self.fetch_current_history().await
    }

    /// Refetch history for the current selection and period (manual retry).
    pub async fn refresh_chart(&mut self) -> &DashboardState {
        self.dispatch(DashboardEvent::ChartRequested);
        self.fetch_current_history().await
    }

    /// Show or hide moving-average lines. Rebuilds the chart from the
    /// already fetched series; no request is made.
    pub fn set_show_technical_indicators(&mut self, show: bool) -> &DashboardState {
        self.dispatch(DashboardEvent::IndicatorsToggled(show))
    }

    /// Fetch history and assemble a chart in one go, outside the view state.
    pub async fn fetch_chart(&self, symbol: &str, period: Period) -> Result<ChartModel, CoreError> {
        let series = self.market_service.history(symbol, period).await?;
        self.build_chart(&series)
    }

    /// Assemble a chart for `series` with the configured indicator setting.
    pub fn build_chart(&self, series: &HistoricalSeries) -> Result<ChartModel, CoreError> {
        let options = ChartOptions {
            show_technical_indicators: self.state.show_technical_indicators,
        };
        self.chart_service.build_chart(series, options)
    }

    // ── Market Summary ──────────────────────────────────────────────

    /// Fetch the index summary. A failure is logged and leaves the summary
    /// hidden; it never produces a user-visible error.
    pub async fn load_market_summary(&mut self) -> &DashboardState {
        let summary = match self.market_service.market_summary().await {
            Ok(summary) => Some(summary),
            Err(e) => {
                log::error!("Error fetching market summary: {e}");
                None
            }
        };
        self.dispatch(DashboardEvent::MarketSummaryLoaded(summary))
    }

    // ── Internal ────────────────────────────────────────────────────

    async fn fetch_current_history(&mut self) -> &DashboardState {
        let Some(symbol) = self.state.selected.as_ref().map(|c| c.symbol.clone()) else {
            return &self.state;
        };
        let response = self
            .market_service
            .fetch_history(self.state.chart_tag(), &symbol, self.state.period)
            .await;
        self.apply_history_response(response)
    }

    fn dispatch(&mut self, event: DashboardEvent) -> &DashboardState {
        self.state = self.dashboard_service.reduce(&self.state, event);
        &self.state
    }
}
