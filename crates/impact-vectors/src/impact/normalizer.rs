use super::record::FieldValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
// %B also accepts abbreviated month names when parsing.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

/// Collapses one raw field onto a comparable number.
///
/// Absent values and text that is neither numeric nor a date read as `0`.
/// Dates become the milliseconds elapsed between them and `now`, so older
/// dates weigh more.
pub fn normalize(value: Option<&FieldValue>, now: DateTime<Utc>) -> f64 {
    match value {
        None => 0.0,
        Some(FieldValue::Number(number)) if number.is_finite() => *number,
        Some(FieldValue::Number(_)) => 0.0,
        Some(FieldValue::Boolean(flag)) => f64::from(u8::from(*flag)),
        Some(FieldValue::Text(text)) => normalize_text(text, now),
    }
}

fn normalize_text(text: &str, now: DateTime<Utc>) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    if let Some(number) = parse_finite(trimmed) {
        return number;
    }

    match parse_datetime(trimmed) {
        Some(instant) => elapsed_millis(instant, now),
        None => 0.0,
    }
}

fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|number| number.is_finite())
}

pub(crate) fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}

fn elapsed_millis(instant: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    now.signed_duration_since(instant).num_milliseconds() as f64
}
