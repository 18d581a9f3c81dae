// ═══════════════════════════════════════════════════════════════════
// Model Tests — wire formats, periods, quotes, predictions, settings
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use market_dashboard_core::errors::CoreError;
use market_dashboard_core::models::company::{Company, CompanyList};
use market_dashboard_core::models::dashboard::{DashboardState, Loadable, RequestTag};
use market_dashboard_core::models::history::{
    DailyRecord, HistoricalSeries, HistorySummary, Indicator, Period,
};
use market_dashboard_core::models::market::{IndexStatus, MarketSentiment, MarketSummary};
use market_dashboard_core::models::prediction::{ConfidenceLevel, Prediction, Tone};
use market_dashboard_core::models::quote::StockQuote;
use market_dashboard_core::models::settings::Settings;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

const HISTORY_JSON: &str = r#"{
    "symbol": "AAPL",
    "period": "1mo",
    "interval": "1d",
    "data": [
        {"Date": "2024-01-15", "Open": 182.1, "High": 184.0, "Low": 181.5, "Close": 183.2, "Volume": 51234000,
         "MA5": null, "MA20": null, "MA50": null, "RSI": null},
        {"Date": "2024-01-16", "Open": 183.0, "High": 185.5, "Low": 182.9, "Close": 185.1, "Volume": 48000000,
         "MA5": 183.9, "MA20": null},
        {"Date": "2024-01-17", "Open": 185.0, "High": 186.0, "Low": 184.0, "Close": 184.4, "Volume": 45000000,
         "MA5": 184.2, "MACD": 0.51, "Signal": 0.4, "BB_Upper": 190.0, "BB_Lower": 178.0}
    ],
    "summary": {
        "total_points": 3,
        "start_date": "2024-01-15",
        "end_date": "2024-01-17",
        "highest_price": 186.0,
        "lowest_price": 181.5,
        "avg_volume": 48078000.0
    },
    "timestamp": "2024-01-17T21:00:00.123456"
}"#;

const PREDICTION_JSON: &str = r#"{
    "symbol": "MSFT",
    "current_price": 400.0,
    "predicted_price": 404.5,
    "predicted_change": 4.5,
    "predicted_change_percent": 1.13,
    "confidence": 0.75,
    "prediction_date": "2024-01-18",
    "model_info": {
        "algorithm": "Random Forest",
        "features_used": ["Open", "High", "Low", "Close", "Volume", "MA5", "MA20", "MA50", "RSI", "MACD"],
        "training_data_points": "2 years of historical data",
        "last_updated": "2024-01-17T21:00:00"
    },
    "disclaimer": "This prediction is for educational purposes only.",
    "timestamp": "2024-01-17T21:00:00"
}"#;

// ═══════════════════════════════════════════════════════════════════
//  Period
// ═══════════════════════════════════════════════════════════════════

mod period {
    use super::*;

    #[test]
    fn query_values() {
        let values: Vec<&str> = Period::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(values, vec!["5d", "1mo", "3mo", "6mo", "1y", "2y", "5y"]);
    }

    #[test]
    fn default_is_one_year() {
        assert_eq!(Period::default(), Period::OneYear);
    }

    #[test]
    fn parses_every_value_and_ignores_case() {
        for p in Period::ALL {
            assert_eq!(p.as_str().parse::<Period>().unwrap(), p);
        }
        assert_eq!(" 3MO ".parse::<Period>().unwrap(), Period::ThreeMonths);
    }

    #[test]
    fn rejects_unknown_period() {
        for bad in ["10y", "max", "ytd", "", "1d"] {
            let err = bad.parse::<Period>().unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)), "{bad} should be rejected");
        }
    }

    #[test]
    fn display_matches_query_value() {
        assert_eq!(Period::SixMonths.to_string(), "6mo");
        assert_eq!(Period::FiveDays.display_name(), "5 Days");
    }

    #[test]
    fn serde_uses_query_value() {
        assert_eq!(serde_json::to_string(&Period::TwoYears).unwrap(), "\"2y\"");
        let p: Period = serde_json::from_str("\"1mo\"").unwrap();
        assert_eq!(p, Period::OneMonth);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Indicator / DailyRecord
// ═══════════════════════════════════════════════════════════════════

mod daily_record {
    use super::*;

    #[test]
    fn indicator_labels_and_windows() {
        assert_eq!(Indicator::Ma5.label(), "MA5");
        assert_eq!(Indicator::Ma20.to_string(), "MA20");
        assert_eq!(Indicator::Ma50.window(), 50);
        assert!(Indicator::Ma5 < Indicator::Ma20 && Indicator::Ma20 < Indicator::Ma50);
    }

    #[test]
    fn null_and_missing_indicators_are_absent() {
        let series: HistoricalSeries = serde_json::from_str(HISTORY_JSON).unwrap();
        let first = &series.data[0];
        assert_eq!(first.indicator(Indicator::Ma5), None);
        assert_eq!(first.indicator(Indicator::Ma50), None);
        assert_eq!(first.macd, None);

        let second = &series.data[1];
        assert_eq!(second.indicator(Indicator::Ma5), Some(183.9));
        assert_eq!(second.indicator(Indicator::Ma20), None);
    }

    #[test]
    fn wire_field_names_are_capitalised() {
        let series: HistoricalSeries = serde_json::from_str(HISTORY_JSON).unwrap();
        let r = &series.data[2];
        assert_eq!(r.date, d(2024, 1, 17));
        assert_eq!(r.open, 185.0);
        assert_eq!(r.close, 184.4);
        assert_eq!(r.volume, 45_000_000.0);
        assert_eq!(r.bb_upper, Some(190.0));
        assert_eq!(r.signal, Some(0.4));
    }

    #[test]
    fn serializing_omits_absent_indicators() {
        let r = DailyRecord::new(d(2024, 1, 2), 1.0, 2.0, 0.5, 1.5, 10.0).with_indicator(Indicator::Ma5, 1.2);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["Date"], "2024-01-02");
        assert_eq!(json["MA5"], 1.2);
        assert!(json.get("MA20").is_none());
    }

    #[test]
    fn bad_date_is_rejected() {
        let json = r#"{"Date": "15/01/2024", "Open": 1, "High": 1, "Low": 1, "Close": 1, "Volume": 1}"#;
        assert!(serde_json::from_str::<DailyRecord>(json).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  HistoricalSeries
// ═══════════════════════════════════════════════════════════════════

mod historical_series {
    use super::*;

    #[test]
    fn deserializes_full_response() {
        let series: HistoricalSeries = serde_json::from_str(HISTORY_JSON).unwrap();
        assert_eq!(series.symbol, "AAPL");
        assert_eq!(series.period, "1mo");
        assert_eq!(series.interval, "1d");
        assert_eq!(series.len(), 3);
        assert_eq!(series.summary.total_points, 3);
        assert_eq!(series.summary.start_date, Some(d(2024, 1, 15)));
        assert_eq!(series.summary.highest_price, 186.0);
        assert!(series.check_ordering().is_ok());
    }

    #[test]
    fn empty_response_with_null_dates() {
        let json = r#"{"symbol": "X", "period": "1y", "interval": "1d", "data": [],
            "summary": {"total_points": 0, "start_date": null, "end_date": null,
                        "highest_price": 0, "lowest_price": 0, "avg_volume": 0}}"#;
        let series: HistoricalSeries = serde_json::from_str(json).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.summary.start_date, None);
        assert_eq!(series.timestamp, None);
    }

    #[test]
    fn new_uppercases_symbol_and_computes_summary() {
        let data = vec![
            DailyRecord::new(d(2024, 1, 2), 10.0, 12.0, 9.0, 11.0, 100.0),
            DailyRecord::new(d(2024, 1, 3), 11.0, 13.0, 10.0, 12.0, 300.0),
        ];
        let series = HistoricalSeries::new("msft", Period::FiveDays, data);
        assert_eq!(series.symbol, "MSFT");
        assert_eq!(series.period, "5d");
        assert_eq!(series.interval, "1d");
        assert_eq!(series.summary.highest_price, 13.0);
        assert_eq!(series.summary.lowest_price, 9.0);
        assert_eq!(series.summary.avg_volume, 200.0);
        assert_eq!(series.summary.end_date, Some(d(2024, 1, 3)));
    }

    #[test]
    fn summary_of_nothing_is_zeroed() {
        let summary = HistorySummary::from_records(&[]);
        assert_eq!(summary.total_points, 0);
        assert_eq!(summary.start_date, None);
        assert_eq!(summary.avg_volume, 0.0);
    }

    #[test]
    fn unordered_dates_are_rejected() {
        let data = vec![
            DailyRecord::new(d(2024, 1, 3), 1.0, 1.0, 1.0, 1.0, 1.0),
            DailyRecord::new(d(2024, 1, 2), 1.0, 1.0, 1.0, 1.0, 1.0),
        ];
        let err = HistoricalSeries::new("A", Period::OneYear, data).check_ordering().unwrap_err();
        assert!(matches!(err, CoreError::InvalidResponse(_)));
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let data = vec![
            DailyRecord::new(d(2024, 1, 2), 1.0, 1.0, 1.0, 1.0, 1.0),
            DailyRecord::new(d(2024, 1, 2), 2.0, 2.0, 2.0, 2.0, 2.0),
        ];
        assert!(HistoricalSeries::new("A", Period::OneYear, data).check_ordering().is_err());
    }

    #[test]
    fn single_record_is_ordered() {
        let data = vec![DailyRecord::new(d(2024, 1, 2), 1.0, 1.0, 1.0, 1.0, 1.0)];
        assert!(HistoricalSeries::new("A", Period::OneYear, data).check_ordering().is_ok());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Company
// ═══════════════════════════════════════════════════════════════════

mod company {
    use super::*;

    #[test]
    fn new_uppercases_symbol() {
        let c = Company::new("aapl", "Apple Inc.", "Technology");
        assert_eq!(c.symbol, "AAPL");
        assert_eq!(c.name, "Apple Inc.");
    }

    #[test]
    fn company_list_with_and_without_metadata() {
        let full = r#"{"companies": [{"symbol": "AAPL", "name": "Apple Inc.", "sector": "Technology"}],
                       "total": 1, "timestamp": "2024-01-17T21:00:00"}"#;
        let list: CompanyList = serde_json::from_str(full).unwrap();
        assert_eq!(list.companies.len(), 1);
        assert_eq!(list.total, Some(1));

        let bare: CompanyList = serde_json::from_str(r#"{"companies": []}"#).unwrap();
        assert!(bare.companies.is_empty());
        assert_eq!(bare.total, None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  StockQuote
// ═══════════════════════════════════════════════════════════════════

mod quote {
    use super::*;

    fn quote_json(low: f64, high: f64, price: f64) -> String {
        format!(
            r#"{{"symbol": "AAPL", "name": "Apple Inc.", "current_price": {price}, "previous_close": 180.0,
                "change": -1.5, "change_percent": -0.83, "volume": 50000000, "avg_volume": 55000000,
                "market_cap": 2900000000000, "pe_ratio": null, "dividend_yield": 0.0051,
                "week_52_high": {high}, "week_52_low": {low}, "sector": "Technology",
                "industry": "Consumer Electronics", "timestamp": "2024-01-17T21:00:00"}}"#
        )
    }

    #[test]
    fn deserializes_with_null_fundamentals() {
        let q: StockQuote = serde_json::from_str(&quote_json(120.0, 200.0, 178.5)).unwrap();
        assert_eq!(q.symbol, "AAPL");
        assert_eq!(q.pe_ratio, None);
        assert_eq!(q.market_cap, Some(2.9e12));
        assert_eq!(q.volume, 50_000_000);
        assert!(!q.is_up());
    }

    #[test]
    fn week_52_position_is_fraction_of_range() {
        let q: StockQuote = serde_json::from_str(&quote_json(100.0, 200.0, 150.0)).unwrap();
        assert_eq!(q.week_52_position(), Some(0.5));
    }

    #[test]
    fn week_52_position_clamps_outside_range() {
        let q: StockQuote = serde_json::from_str(&quote_json(100.0, 200.0, 250.0)).unwrap();
        assert_eq!(q.week_52_position(), Some(1.0));
    }

    #[test]
    fn week_52_position_none_for_flat_range() {
        let q: StockQuote = serde_json::from_str(&quote_json(150.0, 150.0, 150.0)).unwrap();
        assert_eq!(q.week_52_position(), None);
    }

    #[test]
    fn zero_pe_ratio_counts_as_not_reported() {
        let mut q: StockQuote = serde_json::from_str(&quote_json(100.0, 200.0, 150.0)).unwrap();
        assert_eq!(q.reported_pe_ratio(), None);

        q.pe_ratio = Some(0.0);
        assert_eq!(q.reported_pe_ratio(), None);

        q.pe_ratio = Some(28.4);
        assert_eq!(q.reported_pe_ratio(), Some(28.4));
    }

    #[test]
    fn zero_dividend_yield_counts_as_not_reported() {
        let mut q: StockQuote = serde_json::from_str(&quote_json(100.0, 200.0, 150.0)).unwrap();
        assert_eq!(q.reported_dividend_yield(), Some(0.0051));

        q.dividend_yield = Some(0.0);
        assert_eq!(q.reported_dividend_yield(), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Prediction
// ═══════════════════════════════════════════════════════════════════

mod prediction {
    use super::*;

    #[test]
    fn deserializes_and_validates() {
        let p: Prediction = serde_json::from_str(PREDICTION_JSON).unwrap();
        assert_eq!(p.symbol, "MSFT");
        assert_eq!(p.model_info.algorithm, "Random Forest");
        assert_eq!(p.model_info.features_used.len(), 10);
        assert!(p.is_up());
        assert!(p.validate().is_ok());
        assert_eq!(p.confidence_percent(), 75);
        assert_eq!(p.confidence_level(), ConfidenceLevel::High);
    }

    #[test]
    fn confidence_outside_unit_interval_is_invalid() {
        let mut p: Prediction = serde_json::from_str(PREDICTION_JSON).unwrap();
        p.confidence = 1.2;
        assert!(matches!(p.validate(), Err(CoreError::InvalidResponse(_))));
        p.confidence = -0.1;
        assert!(p.validate().is_err());
    }

    #[test]
    fn confidence_level_boundaries() {
        assert_eq!(ConfidenceLevel::from_score(0.95), ConfidenceLevel::VeryHigh);
        assert_eq!(ConfidenceLevel::from_score(0.8), ConfidenceLevel::VeryHigh);
        assert_eq!(ConfidenceLevel::from_score(0.79), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.7), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.6), ConfidenceLevel::Moderate);
        assert_eq!(ConfidenceLevel::from_score(0.5), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(0.49), ConfidenceLevel::VeryLow);
    }

    #[test]
    fn confidence_labels() {
        assert_eq!(ConfidenceLevel::VeryHigh.to_string(), "Very High");
        assert_eq!(ConfidenceLevel::Moderate.to_string(), "Moderate");
        assert_eq!(ConfidenceLevel::VeryLow.to_string(), "Very Low");
    }

    #[test]
    fn confidence_tones() {
        assert_eq!(ConfidenceLevel::from_score(0.75).tone(), Tone::Success);
        assert_eq!(ConfidenceLevel::from_score(0.65).tone(), Tone::Warning);
        assert_eq!(ConfidenceLevel::from_score(0.55).tone(), Tone::Warning);
        assert_eq!(ConfidenceLevel::from_score(0.3).tone(), Tone::Danger);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  MarketSummary
// ═══════════════════════════════════════════════════════════════════

mod market_summary {
    use super::*;

    const SUMMARY_JSON: &str = r#"{
        "market_summary": {
            "S&P 500": {"symbol": "^GSPC", "current": 4780.2, "change": 12.5, "change_percent": 0.26, "status": "up"},
            "Dow Jones": {"symbol": "^DJI", "current": 37500.0, "change": -50.1, "change_percent": -0.13, "status": "down"},
            "NASDAQ": {"symbol": "^IXIC", "current": 15000.0, "change": 0.0, "change_percent": 0.0, "status": "up"}
        },
        "timestamp": "2024-01-17T21:00:00"
    }"#;

    #[test]
    fn deserializes_and_counts() {
        let s: MarketSummary = serde_json::from_str(SUMMARY_JSON).unwrap();
        assert_eq!(s.market_summary.len(), 3);
        assert_eq!(s.advancing(), 2);
        assert_eq!(s.declining(), 1);
        assert_eq!(s.market_summary["Dow Jones"].status, IndexStatus::Down);
    }

    #[test]
    fn iteration_order_is_sorted_by_name() {
        let s: MarketSummary = serde_json::from_str(SUMMARY_JSON).unwrap();
        let names: Vec<&str> = s.market_summary.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Dow Jones", "NASDAQ", "S&P 500"]);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let json = r#"{"market_summary": {"X": {"symbol": "X", "current": 1, "change": 0,
                       "change_percent": 0, "status": "flat"}}}"#;
        assert!(serde_json::from_str::<MarketSummary>(json).is_err());
    }

    #[test]
    fn more_advancing_than_declining_is_bullish() {
        let s: MarketSummary = serde_json::from_str(SUMMARY_JSON).unwrap();
        assert_eq!(s.sentiment(), MarketSentiment::Bullish);
        assert_eq!(s.sentiment().to_string(), "Bull Market");
        assert_eq!(s.sentiment().tone(), Tone::Success);
    }

    #[test]
    fn more_declining_is_bearish() {
        assert_eq!(MarketSentiment::from_counts(1, 3), MarketSentiment::Bearish);
        assert_eq!(MarketSentiment::Bearish.to_string(), "Bear Market");
        assert_eq!(MarketSentiment::Bearish.tone(), Tone::Danger);
    }

    #[test]
    fn tie_is_mixed() {
        let json = r#"{"market_summary": {
            "A": {"symbol": "A", "current": 1, "change": 1, "change_percent": 1, "status": "up"},
            "B": {"symbol": "B", "current": 1, "change": -1, "change_percent": -1, "status": "down"}
        }}"#;
        let s: MarketSummary = serde_json::from_str(json).unwrap();
        assert_eq!(s.sentiment(), MarketSentiment::Mixed);
        assert_eq!(s.sentiment().to_string(), "Mixed Market");
        assert_eq!(s.sentiment().tone(), Tone::Warning);
    }

    #[test]
    fn empty_summary() {
        let s: MarketSummary = serde_json::from_str(r#"{"market_summary": {}}"#).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.advancing(), 0);
        assert_eq!(s.sentiment(), MarketSentiment::Mixed);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.api_base_url, "http://localhost:8000");
        assert_eq!(s.request_timeout_secs, 30);
        assert_eq!(s.default_period, Period::OneYear);
        assert!(s.show_technical_indicators);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{"default_period": "3mo"}"#).unwrap();
        assert_eq!(s.default_period, Period::ThreeMonths);
        assert_eq!(s.request_timeout_secs, 30);
    }

    #[test]
    fn base_url_strips_trailing_slash() {
        let s = Settings::from_json(r#"{"api_base_url": "https://dash.example.com/"}"#).unwrap();
        assert_eq!(s.base_url(), "https://dash.example.com");
    }

    #[test]
    fn rejects_non_http_url() {
        let err = Settings::from_json(r#"{"api_base_url": "ftp://x"}"#).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(Settings::from_json(r#"{"request_timeout_secs": 0}"#).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(Settings::from_json("{"), Err(CoreError::Config(_))));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = Settings::load_from_file("/definitely/not/here/settings.json").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Dashboard state
// ═══════════════════════════════════════════════════════════════════

mod dashboard_state {
    use super::*;

    #[test]
    fn fresh_state_is_idle() {
        let s = DashboardState::default();
        assert_eq!(s.companies, Loadable::Idle);
        assert_eq!(s.chart, Loadable::Idle);
        assert!(s.selected.is_none());
        assert!(!s.is_loading());
        assert_eq!(s.selection_tag(), RequestTag(0));
        assert_eq!(s.chart_tag(), RequestTag(0));
    }

    #[test]
    fn loadable_accessors() {
        let ready: Loadable<u32> = Loadable::Ready(3);
        assert_eq!(ready.ready(), Some(&3));
        assert_eq!(ready.error(), None);

        let failed: Loadable<u32> = Loadable::Failed("boom".into());
        assert_eq!(failed.error(), Some("boom"));
        assert!(Loadable::<u32>::Loading.is_loading());
        assert_eq!(Loadable::<u32>::Empty.ready(), None);
    }

    #[test]
    fn filtered_companies_empty_until_loaded() {
        assert!(DashboardState::default().filtered_companies().is_empty());
    }

    #[test]
    fn request_tag_display() {
        assert_eq!(RequestTag(7).to_string(), "#7");
    }
}
