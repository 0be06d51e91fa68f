//! The single timestamp shape SPDX 2 allows: `YYYY-MM-DDThh:mm:ssZ`.

use chrono::{DateTime, NaiveDateTime, Utc};

const SPDX_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parses an SPDX timestamp. Fractional seconds and offsets are rejected.
pub fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, String> {
    NaiveDateTime::parse_from_str(raw.trim(), SPDX_DATETIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            format!(
                "Could not parse value {raw} as a datetime; expected format YYYY-MM-DDThh:mm:ssZ"
            )
        })
}

#[must_use]
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format(SPDX_DATETIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_round_trip() {
        let parsed = parse_datetime("2022-12-01T00:00:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2022, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(format_datetime(&parsed), "2022-12-01T00:00:00Z");
    }

    #[test]
    fn test_rejects_other_shapes() {
        for bad in [
            "2022-12-01",
            "2022-12-01T00:00:00",
            "2022-12-01T00:00:00+01:00",
            "2022-12-01T00:00:00.123Z",
        ] {
            assert!(parse_datetime(bad).is_err(), "{bad} should be rejected");
        }
    }
}
