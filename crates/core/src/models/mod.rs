pub mod chart;
pub mod company;
pub mod dashboard;
pub mod history;
pub mod market;
pub mod prediction;
pub mod quote;
pub mod settings;
