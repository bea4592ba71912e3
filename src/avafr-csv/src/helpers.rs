use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

const DATE_TIME_FORMATS: [&str; 4] = [
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Lowercases a header and drops everything that is not alphanumeric, so
/// `" TotalMinutesAsleep"`, `"total_minutes_asleep"` and a BOM-prefixed
/// header all resolve to the same column.
pub fn normalize_header(name: &str) -> String {
    name.trim()
        .trim_start_matches('\u{feff}')
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Parses a calendar day. A trailing time-of-day is accepted and dropped.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| parse_timestamp(value).map(|time| time.date()))
}

/// Parses a full timestamp. A bare date is taken as midnight.
pub fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    parse_timestamp(value).or_else(|| {
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    })
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Whole, non-negative count. Values such as `"420.0"` written by
/// spreadsheet tools are rounded.
pub(crate) fn parse_count(value: &str) -> Option<u32> {
    let value = value.trim();
    if let Ok(count) = value.parse::<u32>() {
        return Some(count);
    }

    let float = value.parse::<f64>().ok()?;
    if !float.is_finite() || float < 0.0 || float > f64::from(u32::MAX) {
        return None;
    }
    Some(float.round() as u32)
}

pub(crate) fn parse_user_id(value: &str) -> Option<i64> {
    let value = value.trim();
    value
        .parse::<i64>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().filter(|v| v.fract() == 0.0).map(|v| v as i64))
}

pub(crate) fn parse_float(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_normalization() {
        assert_eq!(normalize_header(" TotalMinutesAsleep "), "totalminutesasleep");
        assert_eq!(normalize_header("\u{feff}Id"), "id");
        assert_eq!(normalize_header("total_minutes_asleep"), "totalminutesasleep");
    }

    #[test]
    fn parses_fitbit_dates() {
        let day = NaiveDate::from_ymd_opt(2016, 4, 12).unwrap();
        assert_eq!(parse_date("4/12/2016"), Some(day));
        assert_eq!(parse_date("04/12/2016"), Some(day));
        assert_eq!(parse_date("4/12/2016 12:00:00 AM"), Some(day));
        assert_eq!(parse_date("2016-04-12"), Some(day));
        assert_eq!(parse_date("2016-04-12 00:00:00"), Some(day));
        assert_eq!(parse_date("12/4/2016x"), None);
    }

    #[test]
    fn parses_twelve_hour_timestamps() {
        let day = NaiveDate::from_ymd_opt(2016, 4, 12).unwrap();
        assert_eq!(
            parse_date_time("4/12/2016 7:21:00 PM"),
            day.and_hms_opt(19, 21, 0)
        );
        assert_eq!(
            parse_date_time("4/12/2016 12:00:05 AM"),
            day.and_hms_opt(0, 0, 5)
        );
        assert_eq!(parse_date_time("4/12/2016"), day.and_hms_opt(0, 0, 0));
        assert_eq!(parse_date_time("yesterday"), None);
    }

    #[test]
    fn counts() {
        assert_eq!(parse_count("420"), Some(420));
        assert_eq!(parse_count("419.6"), Some(420));
        assert_eq!(parse_count("-3"), None);
        assert_eq!(parse_count("NaN"), None);
        assert_eq!(parse_count(""), None);
    }

    #[test]
    fn user_ids() {
        assert_eq!(parse_user_id("1503960366"), Some(1503960366));
        assert_eq!(parse_user_id("12.0"), Some(12));
        assert_eq!(parse_user_id("12.5"), None);
    }
}
