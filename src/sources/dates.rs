use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::errors::{MirrorError, MirrorResult};

/// Zone that date-only strings from Irish sources are anchored to
pub const SOURCE_ZONE: Tz = chrono_tz::Europe::Dublin;

pub const DAY_MONTH_YEAR: &str = "%d %B %Y";
pub const ISO_DATE: &str = "%Y-%m-%d";

pub fn now() -> DateTime<FixedOffset> {
    Utc::now().into()
}

/// RFC 2822 timestamp as used in RSS `pubDate`
pub fn parse_rfc2822(raw: &str) -> MirrorResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(raw.trim())
        .map_err(|e| MirrorError::DateParse(format!("{}: {}", raw, e)))
}

/// Date-only text, trying each format in order, at local midnight in `zone`
pub fn parse_local_date(
    raw: &str,
    formats: &[&str],
    zone: Tz,
) -> MirrorResult<DateTime<FixedOffset>> {
    let cleaned = raw.trim();

    let date = formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(cleaned, format).ok())
        .ok_or_else(|| MirrorError::DateParse(format!("'{}' matches none of {:?}", raw, formats)))?;

    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| MirrorError::DateParse(raw.to_string()))?;

    let local = zone
        .from_local_datetime(&midnight)
        .earliest()
        .ok_or_else(|| MirrorError::DateParse(format!("'{}' does not exist in {}", raw, zone)))?;

    Ok(local.with_timezone(&local.offset().fix()))
}

/// Substitute the current time for a date that failed to parse
pub fn or_now(parsed: MirrorResult<DateTime<FixedOffset>>) -> DateTime<FixedOffset> {
    parsed.unwrap_or_else(|e| {
        warn!(error = %e, "Using current time for unparsable date");
        now()
    })
}
