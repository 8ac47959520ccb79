use chrono::{DateTime, Utc};

#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%d %b %Y").to_string()
}
