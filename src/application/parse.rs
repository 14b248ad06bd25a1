//! Resolve a classified timestamp to an absolute instant.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::domain::{DisplayZone, Timestamp, TimestampError, TimestampValue, classify};

/// Wall-clock layouts tried after the offset-carrying formats fail.
/// They carry no zone, so the display zone supplies one.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Classify `value` and resolve it to an instant.
///
/// Zone-less date-time strings are read as wall-clock time in `zone`.
pub fn to_instant(
    value: &TimestampValue,
    zone: &DisplayZone,
) -> Result<DateTime<Utc>, TimestampError> {
    resolve(&classify(value), zone)
}

pub fn resolve(timestamp: &Timestamp, zone: &DisplayZone) -> Result<DateTime<Utc>, TimestampError> {
    match timestamp {
        // micros / 1_000_000 seconds, kept exact to the microsecond
        Timestamp::MicroEpoch(micros) => DateTime::from_timestamp_micros(*micros)
            .ok_or_else(|| TimestampError::OutOfRange(format!("{} microseconds", micros))),
        Timestamp::EpochMillis(millis) => DateTime::from_timestamp_millis(*millis)
            .ok_or_else(|| TimestampError::OutOfRange(format!("{} milliseconds", millis))),
        Timestamp::EncodedInstant(text) => parse_encoded(text, zone),
    }
}

/// Permissive date-time parser for encoded-instant strings.
pub fn parse_encoded(raw: &str, zone: &DisplayZone) -> Result<DateTime<Utc>, TimestampError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(TimestampError::parse(raw, "empty value"));
    }

    let rfc3339_err = match DateTime::parse_from_rfc3339(text) {
        Ok(dt) => return Ok(dt.with_timezone(&Utc)),
        Err(err) => err,
    };

    if let Some(with_t) = space_to_t(text)
        && let Ok(dt) = DateTime::parse_from_rfc3339(&with_t)
    {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            log::debug!("reading zone-less {:?} in {} zone", text, zone);
            return in_zone(raw, &naive, zone);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return in_zone(raw, &midnight, zone);
    }

    Err(TimestampError::parse(
        raw,
        format!("expected an ISO-8601 date-time ({})", rfc3339_err),
    ))
}

fn in_zone(
    raw: &str,
    naive: &NaiveDateTime,
    zone: &DisplayZone,
) -> Result<DateTime<Utc>, TimestampError> {
    zone.resolve_naive(naive)
        .ok_or_else(|| TimestampError::parse(raw, format!("{} does not exist in zone {}", naive, zone)))
}

// "2024-01-01 10:00:00Z" -> "2024-01-01T10:00:00Z"
fn space_to_t(text: &str) -> Option<String> {
    if text.len() > 11 && text.is_char_boundary(10) && text.as_bytes()[10] == b' ' {
        return Some(format!("{}T{}", &text[..10], &text[11..]));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn micro_epoch_divides_by_one_million() {
        let instant = to_instant(&"1700000000000000".into(), &DisplayZone::Utc).unwrap();
        assert_eq!(instant, utc(2023, 11, 14, 22, 13, 20));
    }

    #[test]
    fn micro_epoch_keeps_sub_second_precision() {
        let instant = to_instant(&"1700000000123456".into(), &DisplayZone::Utc).unwrap();
        assert_eq!(instant.timestamp(), 1_700_000_000);
        assert_eq!(instant.timestamp_subsec_micros(), 123_456);
    }

    #[test]
    fn micro_epoch_recovers_fixture_instants() {
        for seconds in [1_000_000_000_i64, 1_234_567_890, 1_700_000_000, 2_000_000_000] {
            let micros = seconds * 1_000_000 + 7;
            let instant = to_instant(&TimestampValue::Integer(micros), &DisplayZone::Utc).unwrap();
            assert_eq!(instant.timestamp_micros(), micros);
        }
    }

    #[test]
    fn iso_strings_with_offsets() {
        let zone = DisplayZone::Utc;
        assert_eq!(
            parse_encoded("2024-01-01T00:00:00Z", &zone).unwrap(),
            utc(2024, 1, 1, 0, 0, 0)
        );
        assert_eq!(
            parse_encoded("2024-01-01T02:00:00+02:00", &zone).unwrap(),
            utc(2024, 1, 1, 0, 0, 0)
        );
        assert_eq!(
            parse_encoded("2024-01-01 00:00:00Z", &zone).unwrap(),
            utc(2024, 1, 1, 0, 0, 0)
        );
        assert_eq!(
            parse_encoded("2024-01-01T05:30:00+0530", &zone).unwrap(),
            utc(2024, 1, 1, 0, 0, 0)
        );
        assert_eq!(
            parse_encoded("  2024-01-01T00:00:00.250Z ", &zone)
                .unwrap()
                .timestamp_subsec_millis(),
            250
        );
    }

    #[test]
    fn rfc2822_is_accepted() {
        assert_eq!(
            parse_encoded("Mon, 01 Jan 2024 00:00:00 +0000", &DisplayZone::Utc).unwrap(),
            utc(2024, 1, 1, 0, 0, 0)
        );
    }

    #[test]
    fn zone_less_strings_use_display_zone() {
        let plus_one = DisplayZone::Fixed(FixedOffset::east_opt(3600).unwrap());
        assert_eq!(
            parse_encoded("2024-01-01T01:00:00", &plus_one).unwrap(),
            utc(2024, 1, 1, 0, 0, 0)
        );
        assert_eq!(
            parse_encoded("2024-01-01 01:00", &plus_one).unwrap(),
            utc(2024, 1, 1, 0, 0, 0)
        );
        assert_eq!(
            parse_encoded("2024-01-02", &plus_one).unwrap(),
            utc(2024, 1, 1, 23, 0, 0)
        );
    }

    #[test]
    fn garbage_is_a_typed_parse_error() {
        let err = to_instant(&"yesterday-ish".into(), &DisplayZone::Utc).unwrap_err();
        match err {
            TimestampError::Parse { value, .. } => assert_eq!(value, "yesterday-ish"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            to_instant(&"".into(), &DisplayZone::Utc),
            Err(TimestampError::Parse { .. })
        ));
    }

    #[test]
    fn numeric_text_of_other_lengths_is_not_a_date() {
        assert!(to_instant(&"1700000000000".into(), &DisplayZone::Utc).is_err());
    }

    #[test]
    fn plain_numbers_are_epoch_millis() {
        let instant =
            to_instant(&TimestampValue::Integer(1_700_000_000_000), &DisplayZone::Utc).unwrap();
        assert_eq!(instant, utc(2023, 11, 14, 22, 13, 20));
    }

    #[test]
    fn unrepresentable_millis_are_out_of_range() {
        assert!(matches!(
            to_instant(&TimestampValue::Integer(i64::MAX), &DisplayZone::Utc),
            Err(TimestampError::OutOfRange(_))
        ));
    }
}
