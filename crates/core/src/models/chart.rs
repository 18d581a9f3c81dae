use serde::{Deserialize, Serialize};

/// Fixed visual attributes of one chart line.
///
/// Field names serialize in camelCase so a `ChartModel` can be handed to a
/// Chart.js-style renderer unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStyle {
    /// Stroke colour (e.g., "#3b82f6")
    pub border_color: String,

    /// Area fill colour, or "transparent"
    pub background_color: String,

    /// Whether the area under the line is filled
    pub fill: bool,

    /// Bezier curve tension
    pub tension: f64,

    /// Marker radius when not hovered (0 = hidden)
    pub point_radius: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_radius: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_background_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_border_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_border_width: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
}

/// One renderable line. Identity is the label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(flatten)]
    pub style: SeriesStyle,
}

/// Assembled chart: date labels plus ordered series.
///
/// The first series is always the price line; indicator lines follow in
/// MA5, MA20, MA50 order and only when they have at least one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartModel {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartSeries>,
}

impl ChartModel {
    /// The price series. Always present in a model built by `ChartService`.
    pub fn primary(&self) -> Option<&ChartSeries> {
        self.datasets.first()
    }

    /// Look up a series by label.
    pub fn series(&self, label: &str) -> Option<&ChartSeries> {
        self.datasets.iter().find(|s| s.label == label)
    }

    pub fn series_labels(&self) -> Vec<&str> {
        self.datasets.iter().map(|s| s.label.as_str()).collect()
    }
}
