use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::core::CreatedAt;

pub const INVALID_DATE: &str = "Invalid Date";

const UTC_STRING_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

const OFFSET_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y/%m/%d %H:%M:%S%.f%z",
];

const NAIVE_DATE_TIME_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

/// Formats an instant as `Mon, 01 Jan 2024 00:00:00 GMT`.
pub fn to_utc_string(instant: &DateTime<Utc>) -> String {
    instant.format(UTC_STRING_FORMAT).to_string()
}

pub fn resolve(created_at: &CreatedAt) -> Option<DateTime<Utc>> {
    match created_at {
        CreatedAt::Text(text) => parse(text),
        CreatedAt::EpochMillis(millis) => from_epoch_millis(*millis),
    }
}

fn from_epoch_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(millis.trunc() as i64).single()
}

/// Accepts RFC 3339, ISO 8601 with `+hhmm` offsets, local forms (read as
/// UTC), slash and month-name dates (midnight UTC) and RFC 2822.
fn parse(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    for format in OFFSET_DATE_TIME_FORMATS {
        if let Ok(instant) = DateTime::parse_from_str(text, format) {
            return Some(instant.with_timezone(&Utc));
        }
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    DateTime::parse_from_rfc2822(text)
        .ok()
        .map(|instant| instant.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(created_at: CreatedAt) -> String {
        resolve(&created_at)
            .map(|instant| to_utc_string(&instant))
            .unwrap_or_else(|| INVALID_DATE.to_string())
    }

    #[test]
    fn when_rfc3339_utc_should_render_gmt_string() {
        assert_eq!(
            render(CreatedAt::Text("2024-01-01T00:00:00Z".to_string())),
            "Mon, 01 Jan 2024 00:00:00 GMT"
        );
    }

    #[test]
    fn when_offset_present_should_convert_to_utc() {
        assert_eq!(
            render(CreatedAt::Text("2024-03-15T10:30:00.123+02:00".to_string())),
            "Fri, 15 Mar 2024 08:30:00 GMT"
        );
    }

    #[test]
    fn when_no_offset_should_read_as_utc() {
        assert_eq!(
            render(CreatedAt::Text("2024-03-15T10:30:00".to_string())),
            "Fri, 15 Mar 2024 10:30:00 GMT"
        );
        assert_eq!(
            render(CreatedAt::Text("2024-03-15".to_string())),
            "Fri, 15 Mar 2024 00:00:00 GMT"
        );
    }

    #[test]
    fn when_offset_has_no_colon_should_convert_to_utc() {
        assert_eq!(
            render(CreatedAt::Text("2024-01-01T10:00:00+0000".to_string())),
            "Mon, 01 Jan 2024 10:00:00 GMT"
        );
        assert_eq!(
            render(CreatedAt::Text("2024-01-01T12:00:00+0200".to_string())),
            "Mon, 01 Jan 2024 10:00:00 GMT"
        );
    }

    #[test]
    fn when_slash_date_should_read_as_midnight_utc() {
        assert_eq!(
            render(CreatedAt::Text("2024/01/01".to_string())),
            "Mon, 01 Jan 2024 00:00:00 GMT"
        );
        assert_eq!(
            render(CreatedAt::Text("01/15/2024".to_string())),
            "Mon, 15 Jan 2024 00:00:00 GMT"
        );
        assert_eq!(
            render(CreatedAt::Text("01/15/2024 08:30".to_string())),
            "Mon, 15 Jan 2024 08:30:00 GMT"
        );
    }

    #[test]
    fn when_month_name_date_should_parse() {
        assert_eq!(
            render(CreatedAt::Text("January 1, 2024".to_string())),
            "Mon, 01 Jan 2024 00:00:00 GMT"
        );
        assert_eq!(
            render(CreatedAt::Text("Jan 15 2024".to_string())),
            "Mon, 15 Jan 2024 00:00:00 GMT"
        );
    }

    #[test]
    fn when_rfc2822_should_parse() {
        assert_eq!(
            render(CreatedAt::Text("Tue, 1 Jul 2003 10:52:37 +0200".to_string())),
            "Tue, 01 Jul 2003 08:52:37 GMT"
        );
    }

    #[test]
    fn when_epoch_millis_should_parse() {
        assert_eq!(
            render(CreatedAt::EpochMillis(1_704_067_200_000.0)),
            "Mon, 01 Jan 2024 00:00:00 GMT"
        );
    }

    #[test]
    fn when_unparseable_should_be_invalid() {
        assert_eq!(render(CreatedAt::Text("yesterday".to_string())), INVALID_DATE);
        assert_eq!(render(CreatedAt::Text(String::new())), INVALID_DATE);
        assert_eq!(render(CreatedAt::EpochMillis(f64::NAN)), INVALID_DATE);
    }
}
