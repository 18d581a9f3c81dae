//! Display formatting for prices, percentages, volumes and timestamps.
//!
//! All output is en-US: `,` groups thousands and `.` is the decimal point.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

const TIMESTAMP_DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

/// `1234.5` → `"$1,234.50"`, `-3.2` → `"-$3.20"`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let body = group_fixed(value.abs(), 2);
    if value < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}

/// Two decimals with thousands separators: `12345.678` → `"12,345.68"`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let body = group_fixed(value.abs(), 2);
    if value < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{body}")
    } else {
        body
    }
}

/// Signed percentage with two decimals: `1.234` → `"+1.23%"`, `-0.5` → `"-0.50%"`.
pub fn format_percentage(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.2}%")
    } else {
        format!("{value:.2}%")
    }
}

/// Compact magnitude for market caps and volumes:
/// `2.5e12` → `"2.50T"`, `3_400_000.0` → `"3.40M"`, `999.0` → `"999"`.
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    const SCALES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    for (scale, suffix) in SCALES {
        if value >= scale {
            return format!("{:.2}{suffix}", value / scale);
        }
    }

    // Small values: up to three decimals, trailing zeros dropped.
    let fixed = group_fixed(value.abs(), 3);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    };
    if value < 0.0 && trimmed != "0" {
        format!("-{trimmed}")
    } else {
        trimmed
    }
}

/// Render an ISO-8601 timestamp in local time.
///
/// Timestamps with an offset are converted; naive ones are taken as local
/// wall time. Input that does not parse is returned unchanged.
pub fn format_timestamp(timestamp: &str) -> String {
    let trimmed = timestamp.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.with_timezone(&Local).format(TIMESTAMP_DISPLAY).to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        if let Some(local) = Local.from_local_datetime(&naive).earliest() {
            return local.format(TIMESTAMP_DISPLAY).to_string();
        }
        return naive.format(TIMESTAMP_DISPLAY).to_string();
    }
    timestamp.to_string()
}

/// Fixed-point rendering of a non-negative value with grouped integer digits.
fn group_fixed(value: f64, decimals: usize) -> String {
    let fixed = format!("{value:.decimals$}");
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{grouped}.{frac}"),
        None => grouped,
    }
}
