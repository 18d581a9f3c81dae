use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Metadata describing the model that produced a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub algorithm: String,
    pub features_used: Vec<String>,
    pub training_data_points: String,
    pub last_updated: String,
}

/// Next-day point forecast returned by `GET /api/prediction/{symbol}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub symbol: String,
    pub current_price: f64,
    pub predicted_price: f64,
    pub predicted_change: f64,
    pub predicted_change_percent: f64,
    /// Model confidence in `[0, 1]`.
    pub confidence: f64,
    pub prediction_date: String,
    pub model_info: ModelInfo,
    #[serde(default)]
    pub disclaimer: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Prediction {
    pub fn is_up(&self) -> bool {
        self.predicted_change >= 0.0
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.confidence)
    }

    /// Confidence as a whole percentage, for the confidence bar.
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    /// Reject predictions whose confidence lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(CoreError::InvalidResponse(format!(
                "Prediction for {} has confidence {} outside [0, 1]",
                self.symbol, self.confidence
            )));
        }
        Ok(())
    }
}

/// Human label bucket for a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ConfidenceLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            ConfidenceLevel::VeryHigh
        } else if score >= 0.7 {
            ConfidenceLevel::High
        } else if score >= 0.6 {
            ConfidenceLevel::Moderate
        } else if score >= 0.5 {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::VeryLow
        }
    }

    /// Badge colour family. Only three tones exist, so High and VeryHigh share one.
    pub fn tone(&self) -> Tone {
        match self {
            ConfidenceLevel::VeryHigh | ConfidenceLevel::High => Tone::Success,
            ConfidenceLevel::Moderate | ConfidenceLevel::Low => Tone::Warning,
            ConfidenceLevel::VeryLow => Tone::Danger,
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceLevel::VeryHigh => write!(f, "Very High"),
            ConfidenceLevel::High => write!(f, "High"),
            ConfidenceLevel::Moderate => write!(f, "Moderate"),
            ConfidenceLevel::Low => write!(f, "Low"),
            ConfidenceLevel::VeryLow => write!(f, "Very Low"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Warning,
    Danger,
}
