use crate::errors::CoreError;
use crate::models::chart::{ChartModel, ChartSeries, SeriesStyle};
use crate::models::history::{HistoricalSeries, Indicator};

/// Label of the primary price line.
pub const PRICE_SERIES_LABEL: &str = "Stock Price";

const PRICE_COLOR: &str = "#3b82f6";
const PRICE_FILL: &str = "rgba(59, 130, 246, 0.1)";
const LINE_TENSION: f64 = 0.1;

/// Sequences projected out of a `HistoricalSeries`.
///
/// `labels` and `prices` are index-aligned with the source records.
/// Indicator sequences hold only the values that were present, so they may
/// be shorter and are not aligned with `labels`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedSeries {
    pub labels: Vec<String>,
    pub prices: Vec<f64>,
    /// One entry per indicator, in canonical order.
    pub indicators: Vec<(Indicator, Vec<f64>)>,
}

impl ExtractedSeries {
    pub fn indicator(&self, indicator: Indicator) -> &[f64] {
        self.indicators
            .iter()
            .find(|(i, _)| *i == indicator)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }
}

/// Options that change how a chart is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub show_technical_indicators: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            show_technical_indicators: true,
        }
    }
}

/// Turns historical-data responses into renderable chart models.
///
/// The pipeline has two steps:
/// 1. `extract` projects records into labels, close prices and the present
///    values of each moving average.
/// 2. `assemble` orders and styles those sequences, dropping indicator lines
///    that have no values or are switched off.
///
/// The model is rebuilt from scratch on every call.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Extract labels, prices and indicator values from a series.
    ///
    /// Fails with `EmptyDataset` when the series has no records.
    pub fn extract(&self, series: &HistoricalSeries) -> Result<ExtractedSeries, CoreError> {
        if series.data.is_empty() {
            return Err(CoreError::EmptyDataset {
                symbol: series.symbol.clone(),
            });
        }

        let labels = series.data.iter().map(|r| r.date.to_string()).collect();
        let prices = series.data.iter().map(|r| r.close).collect();

        let indicators = Indicator::ALL
            .into_iter()
            .map(|indicator| {
                let values = series
                    .data
                    .iter()
                    .filter_map(|r| r.indicator(indicator))
                    .collect();
                (indicator, values)
            })
            .collect();

        Ok(ExtractedSeries {
            labels,
            prices,
            indicators,
        })
    }

    /// Assemble a chart from extracted sequences. Never fails.
    pub fn assemble(&self, extracted: ExtractedSeries, options: ChartOptions) -> ChartModel {
        let mut datasets = Vec::with_capacity(1 + Indicator::ALL.len());
        datasets.push(ChartSeries {
            label: PRICE_SERIES_LABEL.to_string(),
            data: extracted.prices,
            style: Self::price_style(),
        });

        if options.show_technical_indicators {
            // `extracted.indicators` is already canonical, but sort anyway so
            // hand-built inputs cannot reorder the legend.
            let mut indicators = extracted.indicators;
            indicators.sort_by_key(|(indicator, _)| *indicator);
            indicators.dedup_by_key(|(indicator, _)| *indicator);

            for (indicator, values) in indicators {
                if values.is_empty() {
                    continue;
                }
                datasets.push(ChartSeries {
                    label: indicator.label().to_string(),
                    data: values,
                    style: Self::indicator_style(indicator),
                });
            }
        }

        ChartModel {
            labels: extracted.labels,
            datasets,
        }
    }

    /// Extract and assemble in one step.
    pub fn build_chart(
        &self,
        series: &HistoricalSeries,
        options: ChartOptions,
    ) -> Result<ChartModel, CoreError> {
        let extracted = self.extract(series)?;
        Ok(self.assemble(extracted, options))
    }

    /// Stroke colour of an indicator line. Stable across renders.
    pub fn indicator_color(indicator: Indicator) -> &'static str {
        match indicator {
            Indicator::Ma5 => "#10b981",
            Indicator::Ma20 => "#f59e0b",
            Indicator::Ma50 => "#8b5cf6",
        }
    }

    fn price_style() -> SeriesStyle {
        SeriesStyle {
            border_color: PRICE_COLOR.to_string(),
            background_color: PRICE_FILL.to_string(),
            fill: true,
            tension: LINE_TENSION,
            point_radius: 0.0,
            point_hover_radius: Some(6.0),
            point_hover_background_color: Some(PRICE_COLOR.to_string()),
            point_hover_border_color: Some("#ffffff".to_string()),
            point_hover_border_width: Some(2.0),
            border_width: None,
        }
    }

    fn indicator_style(indicator: Indicator) -> SeriesStyle {
        SeriesStyle {
            border_color: Self::indicator_color(indicator).to_string(),
            background_color: "transparent".to_string(),
            fill: false,
            tension: LINE_TENSION,
            point_radius: 0.0,
            point_hover_radius: None,
            point_hover_background_color: None,
            point_hover_border_color: None,
            point_hover_border_width: None,
            border_width: Some(1.0),
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
