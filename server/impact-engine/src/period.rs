//! Calendar bucket keys and timestamp parsing.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::types::Granularity;

/// Bucket key for a timestamp (UTC):
/// day `YYYY-MM-DD`, week `<iso year>-<iso week>`, month `YYYY-MM`, year `YYYY`.
///
/// Weeks follow ISO-8601: a week belongs to the year of its Thursday, so
/// 2024-01-01 (a Monday) is `2024-1` and 2024-12-30 is `2025-1`.
pub fn bucket_key(ts: &DateTime<Utc>, granularity: Granularity) -> String {
  match granularity {
    Granularity::Day => ts.format("%Y-%m-%d").to_string(),
    Granularity::Week => {
      let week = ts.iso_week();
      format!("{}-{}", week.year(), week.week())
    }
    Granularity::Month => ts.format("%Y-%m").to_string(),
    Granularity::Year => ts.format("%Y").to_string(),
  }
}

/// Parse RFC 3339, or a bare `YYYY-MM-DD` taken as midnight UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Some(dt.with_timezone(&Utc));
  }
  let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
  Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
