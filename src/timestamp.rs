//! Detection and parsing of ISO-8601-like timestamps at the start of a line.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use regex::Regex;
use regex::bytes::Regex as BytesRegex;

use crate::error::TimestampParseError;

pub type Timestamp = DateTime<FixedOffset>;

/// `YYYY-MM-DDTHH:MM:SS`, an optional non-blank suffix, then whitespace.
/// Group 1 is the text that gets rewritten.
static LINE_PREFIX: LazyLock<BytesRegex> = LazyLock::new(|| {
    BytesRegex::new(r"^(?-u)(\d{4}-\d\d-\d\dT\d\d:\d\d:\d\d(\S*))\s")
        .expect("line prefix pattern compiles")
});

/// Optional fraction, then optional zone (`Z`, numeric, or a name). Always
/// matches, possibly empty.
static SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[.,]([0-9]+))?(?:([Zz])|([+-])([0-9]{2})(?::?([0-9]{2}))?|([A-Za-z]+))?")
        .expect("suffix pattern compiles")
});

/// Zone names understood after the seconds, with their offset in hours.
const NAMED_ZONES: &[(&str, i32)] = &[
    ("UT", 0),
    ("UTC", 0),
    ("GMT", 0),
    ("EST", -5),
    ("EDT", -4),
    ("CST", -6),
    ("CDT", -5),
    ("MST", -7),
    ("MDT", -6),
    ("PST", -8),
    ("PDT", -7),
];

const BASE_LEN: usize = "YYYY-MM-DDTHH:MM:SS".len();
const BASE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
/// Hour 24 is midnight at the end of the day.
const END_OF_DAY: &str = "24:00:00";

/// Naive layouts accepted for range bounds, interpreted as UTC.
const NAIVE_BOUND_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A timestamp found at the start of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadingTimestamp {
    /// Byte length of the matched text (date-time plus suffix, without the
    /// trailing whitespace).
    pub len: usize,
    pub value: Timestamp,
}

/// Returns the byte length of the timestamp-looking prefix of `line`, if any.
pub fn match_prefix(line: &[u8]) -> Option<usize> {
    LINE_PREFIX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.end())
}

/// Finds and parses a leading timestamp. `Ok(None)` means the line has no
/// timestamp-looking prefix; `Err` means it has one that does not parse.
pub fn find_leading(line: &[u8]) -> Result<Option<LeadingTimestamp>, TimestampParseError> {
    let Some(len) = match_prefix(line) else {
        return Ok(None);
    };
    let text = std::str::from_utf8(&line[..len]).map_err(|_| TimestampParseError::Encoding)?;
    let value = parse_iso(text)?;
    Ok(Some(LeadingTimestamp { len, value }))
}

/// Parses `YYYY-MM-DDTHH:MM:SS` followed by an optional fraction and zone.
/// Characters after a numeric zone are ignored. No zone means UTC; an
/// unknown zone name is an error.
pub fn parse_iso(text: &str) -> Result<Timestamp, TimestampParseError> {
    if text.len() < BASE_LEN || !text.is_char_boundary(BASE_LEN) {
        return Err(TimestampParseError::Format(text.to_string()));
    }
    let (base, suffix) = text.split_at(BASE_LEN);
    let mut naive = parse_base(base).ok_or_else(|| TimestampParseError::Format(text.to_string()))?;

    let mut offset_secs = 0i32;
    if let Some(caps) = SUFFIX.captures(suffix) {
        if let Some(frac) = caps.get(1) {
            naive = naive
                .with_nanosecond(fraction_to_nanos(frac.as_str()))
                .ok_or_else(|| TimestampParseError::Format(text.to_string()))?;
        }
        if let (Some(sign), Some(hours)) = (caps.get(3), caps.get(4)) {
            let hours: i32 = hours.as_str().parse().unwrap_or_default();
            let minutes: i32 = caps
                .get(5)
                .map(|m| m.as_str().parse().unwrap_or_default())
                .unwrap_or(0);
            if minutes > 59 {
                return Err(TimestampParseError::Offset(suffix.to_string()));
            }
            offset_secs = hours * 3600 + minutes * 60;
            if sign.as_str() == "-" {
                offset_secs = -offset_secs;
            }
        }
        if let Some(name) = caps.get(6) {
            offset_secs = named_zone_offset(name.as_str())
                .ok_or_else(|| TimestampParseError::Zone(name.as_str().to_string()))?;
        }
    }

    let offset = FixedOffset::east_opt(offset_secs)
        .ok_or_else(|| TimestampParseError::Offset(suffix.to_string()))?;
    naive
        .and_local_timezone(offset)
        .single()
        .ok_or_else(|| TimestampParseError::Format(text.to_string()))
}

/// Parses a user-supplied range bound. Accepts RFC 3339, the line timestamp
/// grammar, a few naive layouts (taken as UTC), a bare date (midnight UTC)
/// and RFC 2822.
pub fn parse_bound(text: &str) -> Result<Timestamp, TimestampParseError> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(ts);
    }
    if let Ok(ts) = parse_iso(text) {
        return Ok(ts);
    }
    for format in NAIVE_BOUND_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc().fixed_offset());
    }
    DateTime::parse_from_rfc2822(text)
        .map_err(|_| TimestampParseError::Format(text.to_string()))
}

/// `%Y-%m-%dT%H:%M:%S`, also accepting `24:00:00` as the next midnight.
fn parse_base(base: &str) -> Option<NaiveDateTime> {
    match base.strip_suffix(END_OF_DAY) {
        Some(date) => NaiveDateTime::parse_from_str(&format!("{date}00:00:00"), BASE_FORMAT)
            .ok()?
            .checked_add_signed(TimeDelta::days(1)),
        None => NaiveDateTime::parse_from_str(base, BASE_FORMAT).ok(),
    }
}

/// Offset in seconds for a zone name, case-insensitive.
fn named_zone_offset(name: &str) -> Option<i32> {
    NAMED_ZONES
        .iter()
        .find(|(zone, _)| zone.eq_ignore_ascii_case(name))
        .map(|(_, hours)| hours * 3600)
}

fn fraction_to_nanos(digits: &str) -> u32 {
    let mut nanos = 0u32;
    for (i, b) in digits.bytes().take(9).enumerate() {
        nanos += u32::from(b - b'0') * 10u32.pow(8 - i as u32);
    }
    nanos
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Utc};

    #[test]
    fn matches_prefix_up_to_whitespace() {
        assert_eq!(match_prefix(b"2017-02-01T10:42:17+0000 hello\n"), Some(24));
        assert_eq!(match_prefix(b"2017-02-01T10:42:17 hello"), Some(19));
        assert_eq!(match_prefix(b"2017-02-01T10:42:17\n"), Some(19));
    }

    #[test]
    fn prefix_requires_trailing_whitespace_and_anchor() {
        assert_eq!(match_prefix(b"2017-02-01T10:42:17"), None);
        assert_eq!(match_prefix(b" 2017-02-01T10:42:17 x"), None);
        assert_eq!(match_prefix(b"2017-02-01 10:42:17 x"), None);
        assert_eq!(match_prefix(b"plain text\n"), None);
    }

    #[test]
    fn parses_zone_variants() {
        let utc = Utc.with_ymd_and_hms(2017, 2, 1, 10, 42, 17).unwrap();
        for text in [
            "2017-02-01T10:42:17",
            "2017-02-01T10:42:17Z",
            "2017-02-01T10:42:17+0000",
            "2017-02-01T10:42:17+00:00",
            "2017-02-01T12:42:17+02",
            "2017-02-01T05:42:17-05:00",
        ] {
            assert_eq!(parse_iso(text).unwrap(), utc, "{text}");
        }
    }

    #[test]
    fn keeps_offset_for_formatting() {
        let ts = parse_iso("2017-02-01T10:42:17-0330").unwrap();
        assert_eq!(ts.format("%z").to_string(), "-0330");
    }

    #[test]
    fn parses_fraction() {
        let ts = parse_iso("2017-02-01T10:42:17.250Z").unwrap();
        assert_eq!(ts.nanosecond(), 250_000_000);
        assert_eq!(ts.second(), 17);
    }

    #[test]
    fn ignores_trailing_junk_after_zone() {
        let ts = parse_iso("2017-02-01T10:42:17+0000],").unwrap();
        assert_eq!(ts.day(), 1);
    }

    #[test]
    fn named_zones() {
        let utc = Utc.with_ymd_and_hms(2017, 2, 1, 15, 42, 17).unwrap();
        let est = parse_iso("2017-02-01T10:42:17EST").unwrap();
        assert_eq!(est, utc);
        assert_eq!(est.format("%z").to_string(), "-0500");
        assert_eq!(parse_iso("2017-02-01T15:42:17UTC").unwrap(), utc);
        assert_eq!(parse_iso("2017-02-01T15:42:17gmt").unwrap(), utc);
        assert_eq!(parse_iso("2017-02-01T08:42:17.5PDT").unwrap().hour(), 8);
    }

    #[test]
    fn unknown_zone_name_is_an_error() {
        assert_eq!(
            parse_iso("2017-02-01T10:42:17XYZ"),
            Err(TimestampParseError::Zone("XYZ".to_string()))
        );
        assert!(find_leading(b"2017-02-01T10:42:17ESTX hello\n").is_err());
    }

    #[test]
    fn offset_minutes_must_be_in_range() {
        assert!(matches!(
            parse_iso("2017-02-01T10:42:17+0199"),
            Err(TimestampParseError::Offset(_))
        ));
        assert!(parse_iso("2017-02-01T10:42:17+01:60").is_err());
        assert!(parse_iso("2017-02-01T10:42:17+0159").is_ok());
    }

    #[test]
    fn hour_twenty_four_rolls_over() {
        let next = Utc.with_ymd_and_hms(2017, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_iso("2017-02-28T24:00:00Z").unwrap(), next);
        assert!(parse_iso("2017-02-28T24:00:01Z").is_err());
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(parse_iso("2017-13-01T10:42:17").is_err());
        assert!(parse_iso("2017-02-30T10:42:17").is_err());
        assert!(parse_iso("2017-02-01T25:00:00").is_err());
        assert!(find_leading(b"2017-02-31T00:00:00 x").is_err());
    }

    #[test]
    fn find_leading_reports_length_and_value() {
        let found = find_leading(b"2017-02-01T10:42:17+0000 hello").unwrap().unwrap();
        assert_eq!(found.len, 24);
        assert_eq!(found.value.year(), 2017);
        assert_eq!(find_leading(b"hello").unwrap(), None);
    }

    #[test]
    fn bound_formats() {
        let midnight = Utc.with_ymd_and_hms(2017, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(parse_bound("2017-01-02").unwrap(), midnight);
        assert_eq!(parse_bound("2017-01-02 00:00:00").unwrap(), midnight);
        assert_eq!(parse_bound("2017-01-02T00:00").unwrap(), midnight);
        assert_eq!(parse_bound("2017-01-02T00:00:00Z").unwrap(), midnight);
        assert_eq!(parse_bound("2017-01-02T01:00:00+01:00").unwrap(), midnight);
        assert_eq!(parse_bound("Mon, 2 Jan 2017 00:00:00 +0000").unwrap(), midnight);
        assert!(parse_bound("yesterday").is_err());
        assert!(parse_bound("").is_err());
    }
}
