use crate::errors::CoreError;
use crate::models::chart::ChartModel;
use crate::models::dashboard::{DashboardEvent, DashboardState, Loadable, RequestTag};
use crate::models::history::HistoricalSeries;
use crate::services::chart_service::{ChartOptions, ChartService};
use crate::services::market_service::{HistoryResponse, SelectionResponse};

pub const COMPANIES_ERROR: &str = "Failed to load companies";
pub const QUOTE_ERROR: &str = "Failed to fetch stock data. Please try again.";
pub const CHART_ERROR: &str = "Failed to load chart data";

/// Produces the next `DashboardState` for every event.
///
/// Stale completions are dropped here: a quote, prediction or history
/// response is applied only if its tag matches the current generation.
/// Selecting a company advances both generations; changing the period or
/// retrying the chart advances only the chart generation.
pub struct DashboardService {
    chart_service: ChartService,
}

impl DashboardService {
    pub fn new() -> Self {
        Self {
            chart_service: ChartService::new(),
        }
    }

    pub fn reduce(&self, state: &DashboardState, event: DashboardEvent) -> DashboardState {
        let mut next = state.clone();

        match event {
            DashboardEvent::CompaniesRequested => {
                next.companies = Loadable::Loading;
            }
            DashboardEvent::CompaniesLoaded(Ok(companies)) => {
                next.companies = Loadable::Ready(companies);
            }
            DashboardEvent::CompaniesLoaded(Err(e)) => {
                log::error!("Error fetching companies: {e}");
                next.companies = Loadable::Failed(COMPANIES_ERROR.to_string());
            }
            DashboardEvent::SearchChanged(query) => {
                next.search_query = query;
            }
            DashboardEvent::CompanySelected(company) => {
                next.selection_generation += 1;
                next.chart_generation += 1;
                next.selected = Some(company);
                next.quote = Loadable::Loading;
                next.prediction = None;
                next.history = None;
                next.chart = Loadable::Loading;
            }
            DashboardEvent::QuoteLoaded { tag, result } => {
                if Self::is_stale("quote", tag, state.selection_tag()) {
                    return next;
                }
                next.quote = match result {
                    Ok(quote) => Loadable::Ready(quote),
                    Err(e) => {
                        log::error!("Error fetching stock data: {e}");
                        Loadable::Failed(QUOTE_ERROR.to_string())
                    }
                };
            }
            DashboardEvent::PredictionLoaded { tag, prediction } => {
                if Self::is_stale("prediction", tag, state.selection_tag()) {
                    return next;
                }
                next.prediction = prediction;
            }
            DashboardEvent::PeriodChanged(period) => {
                next.period = period;
                if next.selected.is_some() {
                    Self::restart_chart(&mut next);
                }
            }
            DashboardEvent::ChartRequested => {
                if next.selected.is_some() {
                    Self::restart_chart(&mut next);
                }
            }
            DashboardEvent::HistoryLoaded { tag, result } => {
                if Self::is_stale("history", tag, state.chart_tag()) {
                    return next;
                }
                match result {
                    Ok(series) => {
                        next.chart = self.chart_for(&series, next.show_technical_indicators);
                        next.history = Some(series);
                    }
                    Err(e) => {
                        log::error!("Error fetching historical data: {e}");
                        next.history = None;
                        next.chart = Loadable::Failed(CHART_ERROR.to_string());
                    }
                }
            }
            DashboardEvent::IndicatorsToggled(show) => {
                next.show_technical_indicators = show;
                if let Some(series) = &state.history {
                    next.chart = self.chart_for(series, show);
                }
            }
            DashboardEvent::MarketSummaryLoaded(summary) => {
                next.market_summary = summary;
            }
        }

        next
    }

    /// Apply both halves of a selection response.
    pub fn apply_selection(&self, state: &DashboardState, response: SelectionResponse) -> DashboardState {
        let state = self.reduce(
            state,
            DashboardEvent::QuoteLoaded {
                tag: response.tag,
                result: response.quote,
            },
        );
        self.reduce(
            &state,
            DashboardEvent::PredictionLoaded {
                tag: response.tag,
                prediction: response.prediction,
            },
        )
    }

    pub fn apply_history(&self, state: &DashboardState, response: HistoryResponse) -> DashboardState {
        self.reduce(
            state,
            DashboardEvent::HistoryLoaded {
                tag: response.tag,
                result: response.result,
            },
        )
    }

    fn chart_for(
        &self,
        series: &HistoricalSeries,
        show_technical_indicators: bool,
    ) -> Loadable<ChartModel> {
        let options = ChartOptions {
            show_technical_indicators,
        };
        match self.chart_service.build_chart(series, options) {
            Ok(model) => Loadable::Ready(model),
            Err(CoreError::EmptyDataset { .. }) => Loadable::Empty,
            Err(e) => {
                log::error!("Error building chart: {e}");
                Loadable::Failed(CHART_ERROR.to_string())
            }
        }
    }

    fn restart_chart(state: &mut DashboardState) {
        state.chart_generation += 1;
        state.history = None;
        state.chart = Loadable::Loading;
    }

    fn is_stale(kind: &str, tag: RequestTag, current: RequestTag) -> bool {
        if tag != current {
            log::debug!("Discarding stale {kind} response {tag} (current {current})");
            return true;
        }
        false
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}
