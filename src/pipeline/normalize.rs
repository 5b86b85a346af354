//! Date parsing and year derivation
//!
//! Malformed dates never stop the pipeline. They become `None` and the
//! record carries on without them.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use tracing::debug;

use super::TrialRecord;
use crate::source::{DateValue, RawTrial};

/// Full-date formats, tried in order
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%B %d %Y", "%Y%m%d"];

/// Timestamp formats; only the date part is kept
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a date-like value, returning `None` for anything unusable
pub fn parse_date(value: &DateValue) -> Option<NaiveDate> {
    match value {
        DateValue::Missing => None,
        DateValue::Date(date) => Some(*date),
        DateValue::Text(text) => parse_date_str(text),
    }
}

/// Parse a date string with multiple format attempts
pub fn parse_date_str(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.date());
        }
    }

    // Bare year: January 1st
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().ok().and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1));
    }

    // "2015-03" and "March 2015": chrono needs a day, so supply one
    let (pinned, format) = match s.split_once(' ') {
        Some((month, year)) => (format!("{month} 1 {year}"), "%B %d %Y"),
        None => (format!("{s}-01"), "%Y-%m-%d"),
    };
    NaiveDate::parse_from_str(&pinned, format).ok()
}

/// Calendar year of a date, propagating absence
pub fn year_of(date: Option<NaiveDate>) -> Option<i32> {
    date.map(|d| d.year())
}

pub fn normalize(raw: RawTrial) -> TrialRecord {
    let start_date = parse_date(&raw.start_date);
    let completion_date = parse_date(&raw.completion_date);
    let primary_completion_date = parse_date(&raw.primary_completion_date);

    TrialRecord {
        id: raw.id,
        title: raw.title,
        start_date,
        completion_date,
        primary_completion_date,
        status: raw.status,
        phase: raw.phase,
        enrollment: raw.enrollment,
        intervention_type: raw.intervention_type,
        condition: raw.condition,
        sponsor: raw.sponsor,
        start_year: year_of(start_date),
        completion_year: year_of(completion_date),
    }
}

pub fn normalize_all(rows: Vec<RawTrial>) -> Vec<TrialRecord> {
    let mut coerced = 0usize;

    let records: Vec<TrialRecord> = rows
        .into_iter()
        .map(|raw| {
            coerced += [
                &raw.start_date,
                &raw.completion_date,
                &raw.primary_completion_date,
            ]
            .into_iter()
            .filter(|v| is_coerced(v))
            .count();
            normalize(raw)
        })
        .collect();

    if coerced > 0 {
        debug!(coerced, "unparseable dates coerced to absent");
    }
    records
}

// Text that was present but did not parse
fn is_coerced(value: &DateValue) -> bool {
    matches!(value, DateValue::Text(s) if !s.trim().is_empty() && parse_date_str(s).is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_date_str("2015-03-01"), Some(ymd(2015, 3, 1)));
        assert_eq!(parse_date_str(" 2015/03/01 "), Some(ymd(2015, 3, 1)));
    }

    #[test]
    fn test_parse_month_precision() {
        assert_eq!(parse_date_str("2015-03"), Some(ymd(2015, 3, 1)));
        assert_eq!(parse_date_str("March 2015"), Some(ymd(2015, 3, 1)));
        assert_eq!(parse_date_str("March 14, 2015"), Some(ymd(2015, 3, 14)));
    }

    #[test]
    fn test_parse_timestamps_keep_date() {
        assert_eq!(parse_date_str("2015-03-01 10:30:00"), Some(ymd(2015, 3, 1)));
        assert_eq!(parse_date_str("2015-03-01T10:30:00Z"), Some(ymd(2015, 3, 1)));
        assert_eq!(parse_date_str("2015-03-01 10:30"), Some(ymd(2015, 3, 1)));
    }

    #[test]
    fn test_parse_year_only_and_no_comma() {
        assert_eq!(parse_date_str("2015"), Some(ymd(2015, 1, 1)));
        assert_eq!(parse_date_str("March 14 2015"), Some(ymd(2015, 3, 14)));
        assert_eq!(parse_date_str("201"), None);
    }

    #[test]
    fn test_garbage_becomes_absent() {
        assert_eq!(parse_date_str(""), None);
        assert_eq!(parse_date_str("not a date"), None);
        assert_eq!(parse_date_str("2015-13-45"), None);
        assert_eq!(parse_date(&DateValue::Missing), None);
    }

    #[test]
    fn test_native_date_passes_through() {
        let date = ymd(2020, 2, 29);
        assert_eq!(parse_date(&DateValue::Date(date)), Some(date));
    }

    #[test]
    fn test_normalize_derives_years() {
        let raw = RawTrial {
            id: "NCT1".into(),
            start_date: DateValue::Text("2015-03-01".into()),
            completion_date: DateValue::Text("garbage".into()),
            primary_completion_date: ymd(2017, 1, 1).into(),
            ..Default::default()
        };

        let record = normalize(raw);
        assert_eq!(record.start_year, Some(2015));
        assert_eq!(record.completion_date, None);
        assert_eq!(record.completion_year, None);
        assert_eq!(record.primary_completion_date, Some(ymd(2017, 1, 1)));
    }

    #[test]
    fn test_year_is_deterministic() {
        let date = Some(ymd(1999, 12, 31));
        assert_eq!(year_of(date), year_of(date));
        assert_eq!(year_of(None), None);
    }
}
