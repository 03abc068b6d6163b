use chrono::{DateTime, NaiveDate, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Accepts RFC 3339 instants or bare `YYYY-MM-DD` dates (midnight UTC).
pub(crate) fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("failed to parse '{raw}' as RFC 3339 or YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rfc3339_with_offset() {
        let instant = parse_instant("2024-01-11T02:00:00+02:00").expect("valid instant");
        assert_eq!(
            instant,
            Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).single().expect("valid")
        );
    }

    #[test]
    fn parses_plain_dates_as_midnight_utc() {
        let instant = parse_instant(" 2024-01-11 ").expect("valid date");
        assert_eq!(
            instant,
            Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).single().expect("valid")
        );
    }

    #[test]
    fn rejects_free_text() {
        let err = parse_instant("next week").expect_err("not a date");
        assert!(err.contains("next week"));
    }
}
