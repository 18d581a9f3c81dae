pub mod traits;

// API provider implementations
pub mod dashboard_api;
