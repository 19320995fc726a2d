//! Tolerant timestamp handling.
//!
//! Chat exports disagree on date layout, so parsing is a search for the first
//! recognizable `M/D/Y h:mm[:ss] [AM|PM]` or bare `h:mm[:ss] [AM|PM]` fragment.
//! Anything else is treated as "no timestamp".

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static DATE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{1,2})/(\d{1,2})/(\d{2,4}),?\s*(\d{1,2}):(\d{2})(?::(\d{2}))?\s*(AM|PM)?")
        .expect("date-time pattern")
});

static TIME_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{1,2}):(\d{2})(?::(\d{2}))?\s*(AM|PM)?").expect("time pattern")
});

static EXTRACT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\[(\d{1,2}/\d{1,2}/\d{2,4},?\s*\d{1,2}:\d{2}(?::\d{2})?\s*(?:AM|PM)?)\]",
        r"(?i)(\d{1,2}/\d{1,2}/\d{2,4},?\s*\d{1,2}:\d{2}(?::\d{2})?\s*(?:AM|PM)?)",
        r"(?i)(\d{1,2}:\d{2}(?::\d{2})?\s*(?:AM|PM)?)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("extract pattern"))
    .collect()
});

/// Calendar day assumed for bare `h:mm` timestamps
const TIME_ONLY_ANCHOR: (i32, u32, u32) = (2024, 1, 1);

fn number<T: std::str::FromStr>(caps: &Captures<'_>, idx: usize) -> Option<T> {
    caps.get(idx)?.as_str().parse().ok()
}

/// Convert a 12-hour clock reading to 24-hour when a meridiem marker is present
fn to_24h(hour: u32, meridiem: Option<&str>) -> u32 {
    match meridiem.map(str::to_ascii_uppercase).as_deref() {
        Some("PM") if hour != 12 => hour + 12,
        Some("AM") if hour == 12 => 0,
        _ => hour,
    }
}

fn time_from(caps: &Captures<'_>, h: usize, m: usize, s: usize, ampm: usize) -> Option<NaiveTime> {
    let hour: u32 = number(caps, h)?;
    let minute: u32 = number(caps, m)?;
    let second: u32 = number(caps, s).unwrap_or(0);
    let meridiem = caps.get(ampm).map(|x| x.as_str());
    NaiveTime::from_hms_opt(to_24h(hour, meridiem), minute, second)
}

/// Parse a raw transcript timestamp. Returns `None` for anything unrecognizable
/// or out of range (e.g. `13/45/24`).
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Some(caps) = DATE_TIME.captures(raw) {
        let month: u32 = number(&caps, 1)?;
        let day: u32 = number(&caps, 2)?;
        let mut year: i32 = number(&caps, 3)?;
        if year < 100 {
            year += 2000;
        }
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = time_from(&caps, 4, 5, 6, 7)?;
        return Some(NaiveDateTime::new(date, time));
    }
    if let Some(caps) = TIME_ONLY.captures(raw) {
        let (y, m, d) = TIME_ONLY_ANCHOR;
        let date = NaiveDate::from_ymd_opt(y, m, d)?;
        let time = time_from(&caps, 1, 2, 3, 4)?;
        return Some(NaiveDateTime::new(date, time));
    }
    None
}

/// Find the first timestamp-looking fragment in free text (e.g. OCR output).
pub fn extract_timestamp(text: &str) -> Option<String> {
    EXTRACT_PATTERNS.iter().find_map(|re| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_full_date_pm() {
        let ts = parse_timestamp("11/15/24, 9:32 PM").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 11, 15));
        assert_eq!((ts.hour(), ts.minute()), (21, 32));
    }

    #[test]
    fn test_twelve_oclock_edges() {
        assert_eq!(parse_timestamp("1/1/24 12:05 AM").unwrap().hour(), 0);
        assert_eq!(parse_timestamp("1/1/24 12:05 PM").unwrap().hour(), 12);
    }

    #[test]
    fn test_four_digit_year_and_seconds() {
        let ts = parse_timestamp("3/4/2024, 10:05:12 pm").unwrap();
        assert_eq!(ts.year(), 2024);
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (22, 5, 12));
    }

    #[test]
    fn test_bare_time_anchor() {
        let ts = parse_timestamp("18:30").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 1, 1));
        assert_eq!(ts.hour(), 18);
    }

    #[test]
    fn test_garbage_is_none() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("13/45/24 9:00").is_none());
        assert!(parse_timestamp("99:99").is_none());
    }

    #[test]
    fn test_extract_prefers_bracketed() {
        let text = "header 7:00\n[11/15/24, 9:32 PM] Alex: hi";
        assert_eq!(extract_timestamp(text).as_deref(), Some("11/15/24, 9:32 PM"));
        assert_eq!(extract_timestamp("sent at 4:45 PM").as_deref(), Some("4:45 PM"));
        assert_eq!(extract_timestamp("no clock here"), None);
    }
}
