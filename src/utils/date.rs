// Date parsing and formatting for exercise dates.
// Dates travel as `YYYY-MM-DD` (midnight UTC) or RFC 3339 and are rendered
// in the short human form "Mon Jan 15 2023".

use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson;

const DISPLAY_FORMAT: &str = "%a %b %d %Y";

/// Parses a caller supplied date. Surrounding whitespace is ignored.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn to_display(date: DateTime<Utc>) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

pub fn to_bson(date: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(date.timestamp_millis())
}

pub fn from_bson(date: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(date.timestamp_millis()).unwrap_or_default()
}

/// Formats a stored date for responses
pub fn bson_to_display(date: bson::DateTime) -> String {
    to_display(from_bson(date))
}
