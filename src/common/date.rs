//! Calendar dates on the wire.
//!
//! Dates are written as `YYYY-MM-DD`. On read, a full RFC 3339 timestamp
//! such as `2024-03-15T00:00:00.000Z` is also accepted and reduced to its
//! calendar date in the timestamp's own offset. Use with
//! `#[serde(with = "crate::common::date")]`.
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serializer};

const FORMAT: &str = "%Y-%m-%d";

pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format(FORMAT))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse(&s).map_err(serde::de::Error::custom)
}

pub fn parse(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
        .map_err(|e| format!("invalid date {s:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Serialize, serde::Deserialize)]
    struct Dated {
        #[serde(with = "crate::common::date")]
        on: NaiveDate,
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_dates_and_timestamps() {
        assert_eq!(parse("2024-03-15"), Ok(ymd(2024, 3, 15)));
        assert_eq!(parse("2024-03-15T00:00:00.000Z"), Ok(ymd(2024, 3, 15)));
        assert_eq!(parse("2024-03-15T23:30:00-05:00"), Ok(ymd(2024, 3, 15)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("15/03/2024").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn writes_calendar_date_only() {
        let json = serde_json::to_string(&Dated {
            on: ymd(2024, 1, 2),
        })
        .unwrap();
        assert_eq!(json, r#"{"on":"2024-01-02"}"#);

        let back: Dated = serde_json::from_str(r#"{"on":"2024-01-02T00:00:00.000Z"}"#).unwrap();
        assert_eq!(back.on, ymd(2024, 1, 2));
    }
}
