use thiserror::Error;

/// Unified error type for the entire market-dashboard-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request to {path} failed with HTTP status {status}")]
    HttpStatus { path: String, status: u16 },

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    // ── Data availability ───────────────────────────────────────────
    #[error("No chart data available for {symbol}")]
    EmptyDataset { symbol: String },

    #[error("Prediction unavailable for {symbol}: {reason}")]
    PartialUnavailable { symbol: String, reason: String },

    // ── Caller input / configuration ────────────────────────────────
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// `true` for failures of the fetch itself: transport errors and non-OK
    /// statuses. These are the ones the dashboard shows with a retry control.
    #[must_use]
    pub fn is_network_failure(&self) -> bool {
        matches!(self, CoreError::Network(_) | CoreError::HttpStatus { .. })
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL; drop the query string
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        if e.is_decode() {
            CoreError::Deserialization(sanitized)
        } else {
            CoreError::Network(sanitized)
        }
    }
}
