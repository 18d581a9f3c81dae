use anyhow::{bail, Result};
use clap::Parser;
use market_dashboard_core::format::{
    format_compact, format_currency, format_number, format_percentage, format_timestamp,
};
use market_dashboard_core::models::company::Company;
use market_dashboard_core::models::dashboard::{DashboardState, Loadable};
use market_dashboard_core::models::history::Period;
use market_dashboard_core::models::settings::Settings;
use market_dashboard_core::services::company_service::CompanyService;
use market_dashboard_core::MarketDashboard;

mod cli;

const API_URL_ENV: &str = "MARKET_DASHBOARD_API_URL";

fn preprocess() {
    // grant access to .env
    dotenv::dotenv().ok();

    // initialise logger
    env_logger::init();
}

/// Settings file, then environment, then command-line flags.
fn resolve_settings(cli: &cli::Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from_file(path)?,
        None => Settings::default(),
    };
    if let Ok(url) = std::env::var(API_URL_ENV) {
        settings.api_base_url = url;
    }
    if let Some(url) = &cli.base_url {
        settings.api_base_url = url.clone();
    }
    if let Some(timeout) = cli.timeout {
        settings.request_timeout_secs = timeout;
    }
    settings.validate()?;
    Ok(settings)
}

fn parse_period(period: Option<&str>, settings: &Settings) -> Result<Period> {
    Ok(match period {
        Some(p) => p.parse()?,
        None => settings.default_period,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    preprocess();
    let cli = cli::Cli::parse();
    log::debug!("Command line input recorded: {cli:#?}");

    let settings = resolve_settings(&cli)?;
    log::info!("Using backend at {}", settings.base_url());

    match &cli.command {
        cli::Commands::Companies { search } => {
            let mut dashboard = MarketDashboard::new(settings)?;
            dashboard.load_companies().await;
            if let Some(query) = search {
                dashboard.search(query.as_str());
            }
            let state = dashboard.state();
            if let Some(message) = state.companies.error() {
                bail!("{message}");
            }
            let companies = state.filtered_companies();
            println!("Companies ({})", companies.len());
            for company in companies {
                println!("  {:<6} {:<32} {}", company.symbol, company.name, company.sector);
            }
        }

        cli::Commands::Quote { symbol } => {
            let dashboard = MarketDashboard::new(settings)?;
            let quote = dashboard.market_service().quote(symbol).await?;
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }

        cli::Commands::Prediction { symbol } => {
            let dashboard = MarketDashboard::new(settings)?;
            match dashboard.market_service().prediction(symbol).await {
                Ok(prediction) => println!("{}", serde_json::to_string_pretty(&prediction)?),
                Err(e) => {
                    log::warn!("{e}");
                    println!("No prediction available for {}", symbol.to_uppercase());
                }
            }
        }

        cli::Commands::History { symbol, period } => {
            let period = parse_period(period.as_deref(), &settings)?;
            let dashboard = MarketDashboard::new(settings)?;
            let series = dashboard.market_service().history(symbol, period).await?;
            println!("{}", serde_json::to_string_pretty(&series)?);
        }

        cli::Commands::Chart {
            symbol,
            period,
            no_indicators,
        } => {
            let period = parse_period(period.as_deref(), &settings)?;
            let mut dashboard = MarketDashboard::new(settings)?;
            dashboard.set_show_technical_indicators(!no_indicators);
            let chart = dashboard.fetch_chart(symbol, period).await?;
            println!("{}", serde_json::to_string_pretty(&chart)?);
        }

        cli::Commands::Summary => {
            let mut dashboard = MarketDashboard::new(settings)?;
            dashboard.load_market_summary().await;
            print_market_summary(dashboard.state());
        }

        cli::Commands::Show { symbol, period } => {
            let period = parse_period(period.as_deref(), &settings)?;
            let mut dashboard = MarketDashboard::new(settings)?;
            dashboard.set_period(period).await;
            dashboard.load_companies().await;

            let company = dashboard
                .state()
                .companies
                .ready()
                .and_then(|companies| CompanyService::find_by_symbol(companies, symbol))
                .cloned()
                .unwrap_or_else(|| Company::new(symbol.as_str(), symbol.to_uppercase(), "Unknown"));

            let state = dashboard.select_company(company).await;
            print_selection(state);
        }
    }

    Ok(())
}

fn print_market_summary(state: &DashboardState) {
    let Some(summary) = &state.market_summary else {
        println!("Market summary unavailable");
        return;
    };
    for (name, index) in &summary.market_summary {
        println!(
            "  {:<14} {:>12} {:>10} ({}) {}",
            name,
            format_number(index.current),
            format_number(index.change),
            format_percentage(index.change_percent),
            index.status,
        );
    }
    println!(
        "  {}  Advancing: {}  Declining: {}",
        summary.sentiment(),
        summary.advancing(),
        summary.declining()
    );
    if let Some(ts) = &summary.timestamp {
        println!("  Last updated: {}", format_timestamp(ts));
    }
}

fn print_selection(state: &DashboardState) {
    let Some(company) = &state.selected else {
        return;
    };
    println!("{} ({}) - {}", company.name, company.symbol, company.sector);

    match &state.quote {
        Loadable::Ready(quote) => {
            println!(
                "  Price        {} {} ({})",
                format_currency(quote.current_price),
                format_currency(quote.change),
                format_percentage(quote.change_percent)
            );
            println!("  Prev. close  {}", format_currency(quote.previous_close));
            println!(
                "  Market cap   {}",
                quote.market_cap.map(format_compact).unwrap_or_else(|| "N/A".into())
            );
            println!(
                "  P/E          {}",
                quote
                    .reported_pe_ratio()
                    .map(|pe| format!("{pe:.2}"))
                    .unwrap_or_else(|| "N/A".into())
            );
            println!(
                "  Volume       {} (avg {})",
                format_compact(quote.volume as f64),
                format_compact(quote.avg_volume as f64)
            );
            println!(
                "  Dividend     {}",
                quote
                    .reported_dividend_yield()
                    .map(|y| format!("{:.2}%", y * 100.0))
                    .unwrap_or_else(|| "N/A".into())
            );
            println!(
                "  52-week      {} - {}{}",
                format_currency(quote.week_52_low),
                format_currency(quote.week_52_high),
                quote
                    .week_52_position()
                    .map(|p| format!(" ({:.0}% of range)", p * 100.0))
                    .unwrap_or_default()
            );
        }
        Loadable::Failed(message) => println!("  {message}"),
        _ => {}
    }

    match &state.prediction {
        Some(prediction) => println!(
            "  Prediction   {} on {} ({}), {} confidence ({}%)",
            format_currency(prediction.predicted_price),
            prediction.prediction_date,
            format_percentage(prediction.predicted_change_percent),
            prediction.confidence_level(),
            prediction.confidence_percent()
        ),
        None => println!("  Prediction   not available"),
    }

    match &state.chart {
        Loadable::Ready(chart) => {
            println!(
                "  Chart        {} points over {}; series: {}",
                chart.labels.len(),
                state.period.display_name(),
                chart.series_labels().join(", ")
            );
        }
        Loadable::Empty => println!("  No chart data available"),
        Loadable::Failed(message) => println!("  {message}"),
        _ => {}
    }
}
