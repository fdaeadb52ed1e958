//! Schedule strings (`todoTime`) as the list document stores them.
//!
//! Times are kept as plain local-format strings, not timestamps: day
//! precision is `YYYY-MM-DD`, minute precision is `YYYY-MM-DD HH:MM`.
//! Inputs may also arrive as RFC 3339; everything is normalized on write.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub const DAY_FORMAT: &str = "%Y-%m-%d";
pub const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parses the formats accepted for schedule values.
pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    for format in [MINUTE_FORMAT, "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, DAY_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// True when the value parses and carries a clock time.
pub fn has_minutes(raw: &str) -> bool {
    parse(raw).is_some() && raw.contains(':')
}

/// Normalizes a schedule value to minute precision, `None` if unparseable.
pub fn normalize(raw: &str) -> Option<String> {
    parse(raw).map(|dt| dt.format(MINUTE_FORMAT).to_string())
}

/// Create-time normalization: a parseable input becomes minute precision,
/// anything else falls back to today's date.
pub fn normalize_or_today(raw: Option<&str>, now: DateTime<Utc>) -> String {
    raw.and_then(normalize)
        .unwrap_or_else(|| now.format(DAY_FORMAT).to_string())
}

/// Compares two schedule values at day precision, or minute precision when
/// `minutes` is set. Unparseable values never compare equal.
pub fn dates_equal(a: &str, b: &str, minutes: bool) -> bool {
    let format = if minutes { MINUTE_FORMAT } else { DAY_FORMAT };
    match (parse(a), parse(b)) {
        (Some(a), Some(b)) => {
            a.format(format).to_string() == b.format(format).to_string()
        }
        _ => false,
    }
}
