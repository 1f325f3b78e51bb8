use chrono::{DateTime, NaiveDate, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y %H:%M").to_string()
}

/// Render a server `YYYY-MM-DD` date for display; other strings pass through.
#[must_use]
pub fn format_reading_date(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_or_else(|_| date.to_string(), |day| day.format("%A, %b %-d").to_string())
}
