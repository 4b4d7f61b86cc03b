use chrono::{DateTime, FixedOffset, Utc, Weekday};

/// Jira export timestamps after the weekday, e.g. `2 Jan 2006 15:04:05 -0700`.
const JIRA_TIMESTAMP_FORMAT: &str = "%d %b %Y %H:%M:%S %z";

/// Parse an export timestamp such as `Mon, 2 Jan 2006 15:04:05 -0700`.
///
/// The weekday must be a weekday name but is not checked against the date. Anything
/// unreadable becomes "now" so a bad date never stops a migration.
pub fn parse_jira_timestamp(value: &str) -> DateTime<Utc> {
    match parse_with_weekday(value) {
        Some(t) => t.with_timezone(&Utc),
        None => {
            tracing::debug!(value, "unparsable timestamp, using current time");
            Utc::now()
        }
    }
}

fn parse_with_weekday(value: &str) -> Option<DateTime<FixedOffset>> {
    let (weekday, rest) = value.split_once(", ")?;
    weekday.parse::<Weekday>().ok()?;
    DateTime::parse_from_str(rest, JIRA_TIMESTAMP_FORMAT).ok()
}
