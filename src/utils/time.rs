use chrono::{DateTime, NaiveDate, TimeZone, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Parses an "HH:MM" 24-hour string into minutes since midnight.
pub fn parse_hhmm(raw: &str) -> Option<u32> {
    let bytes = raw.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    if !bytes[0].is_ascii_digit()
        || !bytes[1].is_ascii_digit()
        || !bytes[3].is_ascii_digit()
        || !bytes[4].is_ascii_digit()
    {
        return None;
    }
    let hours = (bytes[0] - b'0') as u32 * 10 + (bytes[1] - b'0') as u32;
    let minutes = (bytes[3] - b'0') as u32 * 10 + (bytes[4] - b'0') as u32;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Instant for `minutes` past midnight on `date`.
pub fn instant_at(date: NaiveDate, minutes: u32) -> DateTime<Utc> {
    let time = date
        .and_hms_opt(minutes / 60, minutes % 60, 0)
        .expect("minutes since midnight within a day");
    Utc.from_utc_datetime(&time)
}

/// Inclusive day boundaries, 00:00:00.000 through 23:59:59.999.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_hms_opt(0, 0, 0).expect("valid start of day");
    let end = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("valid end of day");
    (Utc.from_utc_datetime(&start), Utc.from_utc_datetime(&end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_times() {
        assert_eq!(parse_hhmm("00:00"), Some(0));
        assert_eq!(parse_hhmm("09:30"), Some(570));
        assert_eq!(parse_hhmm("23:59"), Some(1439));
    }

    #[test]
    fn rejects_malformed_times() {
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("12:60"), None);
        assert_eq!(parse_hhmm("9:30"), None);
        assert_eq!(parse_hhmm("09-30"), None);
        assert_eq!(parse_hhmm("09:3a"), None);
        assert_eq!(parse_hhmm(""), None);
    }

    #[test]
    fn day_bounds_cover_the_whole_day() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let (start, end) = day_bounds(date);
        assert_eq!(start.to_rfc3339(), "2026-03-02T00:00:00+00:00");
        assert!(end > instant_at(date, 1439));
    }
}
