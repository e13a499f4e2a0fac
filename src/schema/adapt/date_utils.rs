//! Module for handling date parsing and formatting.

use chrono::NaiveDate;

use crate::schema::adapt::types::DateFormatConfig;

/// Render a date with the configured default format
#[must_use]
pub fn format_date(date: NaiveDate, config: &DateFormatConfig) -> String {
    date.format(&config.default_format).to_string()
}

/// Parse a date string, trying the default format and then each fallback
#[must_use]
pub fn parse_date_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    std::iter::once(&config.default_format)
        .chain(&config.fallback_formats)
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}
