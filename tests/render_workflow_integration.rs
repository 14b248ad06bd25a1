//! Integration tests for classification and rendering
//! These tests drive the public API the way a host view would

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use stampview::application::{TimestampFormatter, to_instant};
use stampview::domain::{
    DisplayPattern, DisplayZone, TimestampError, TimestampKind, TimestampValue, is_micro_epoch,
};
use stampview::infra::clock::FixedClock;
use std::sync::Arc;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn formatter(zone: DisplayZone) -> TimestampFormatter {
    TimestampFormatter::new()
        .with_zone(zone)
        .with_clock(Arc::new(FixedClock::at(fixed_now())))
}

#[test]
fn test_micro_epoch_fixture_renders_in_utc() {
    let pattern = DisplayPattern::new("%Y-%m-%d %H:%M:%S").unwrap();
    let rendered = formatter(DisplayZone::Utc)
        .with_pattern(pattern)
        .render("1700000000000000")
        .unwrap();

    assert_eq!(rendered.utc, "2023-11-14 22:13:20");
    assert_eq!(rendered.relative, "7 months ago");
    assert_eq!(rendered.raw, "1700000000000000");
    assert_eq!(rendered.kind, Some(TimestampKind::MicroEpoch));
}

#[test]
fn test_micro_epoch_fixture_default_pattern() {
    let rendered = formatter(DisplayZone::Utc)
        .render(1_700_000_000_000_000_i64)
        .unwrap();
    assert_eq!(rendered.utc, "14 Nov  22:13:20");
    assert_eq!(rendered.raw, "1700000000000000");
}

#[test]
fn test_iso_fixture_default_pattern() {
    let rendered = formatter(DisplayZone::Utc)
        .render("2024-01-01T00:00:00Z")
        .unwrap();
    assert_eq!(rendered.utc, "01 Jan  00:00:00");
    assert_eq!(rendered.kind, Some(TimestampKind::EncodedInstant));
}

#[test]
fn test_every_field_populated_for_well_formed_input() {
    let inputs: Vec<TimestampValue> = vec![
        "2024-01-01T00:00:00Z".into(),
        "2024-02-29T23:59:59.999+05:30".into(),
        "1700000000000000".into(),
        "0000000000000001".into(),
        TimestampValue::Integer(1_234_567_890_123_456),
        TimestampValue::Integer(1_700_000_000_000),
        "2024-07-04".into(),
    ];

    for zone in [
        DisplayZone::Local,
        DisplayZone::Utc,
        DisplayZone::Fixed(FixedOffset::west_opt(3 * 3600).unwrap()),
    ] {
        let f = formatter(zone);
        for input in &inputs {
            let rendered = f
                .render(input.clone())
                .unwrap_or_else(|err| panic!("{input} failed in {zone}: {err}"));
            assert!(!rendered.local.is_empty());
            assert!(!rendered.utc.is_empty());
            assert!(!rendered.relative.is_empty());
            assert_eq!(rendered.raw, input.to_string());
            assert!(!rendered.zone.is_empty());
        }
    }
}

#[test]
fn test_local_and_utc_denote_same_instant() {
    let pattern = DisplayPattern::new("%Y-%m-%dT%H:%M:%S").unwrap();
    let offset = FixedOffset::east_opt(9 * 3600).unwrap();
    let f = formatter(DisplayZone::Fixed(offset)).with_pattern(pattern.clone());

    for input in ["2024-01-01T00:00:00Z", "1700000000000000", "2023-03-26T01:30:00+01:00"] {
        let rendered = f.render(input).unwrap();
        let local = NaiveDateTime::parse_from_str(&rendered.local, pattern.as_str()).unwrap();
        let utc = NaiveDateTime::parse_from_str(&rendered.utc, pattern.as_str()).unwrap();
        assert_eq!((local - utc).num_seconds(), 9 * 3600, "{input}");
        assert_eq!(rendered.zone, "UTC+09:00");
    }
}

#[test]
fn test_to_instant_is_left_inverse_of_fixture_encoding() {
    for seconds in [1_000_000_000.0_f64, 1_500_000_000.25, 1_700_000_000.123456] {
        let micros = (seconds * 1_000_000.0).round() as i64;
        let encoded = micros.to_string();
        assert_eq!(encoded.len(), 16);
        assert!(is_micro_epoch(&encoded.as_str().into()));

        let instant = to_instant(&encoded.as_str().into(), &DisplayZone::Utc).unwrap();
        let expected = DateTime::from_timestamp_micros(micros).unwrap();
        let drift = (instant - expected).num_microseconds().unwrap().abs();
        assert!(drift <= 1, "{encoded} drifted {drift}us");
    }
}

#[test]
fn test_unparseable_input_is_typed() {
    let f = formatter(DisplayZone::Utc);
    match f.render("31/31/2024") {
        Err(TimestampError::Parse { value, .. }) => assert_eq!(value, "31/31/2024"),
        other => panic!("expected parse error, got {other:?}"),
    }

    let fallback = f.render_or_placeholder("31/31/2024");
    assert_eq!(fallback.utc, "Invalid Date");
    assert_eq!(fallback.raw, "31/31/2024");
}

#[test]
fn test_rendered_serializes_with_snake_case_kind() {
    let rendered = formatter(DisplayZone::Utc)
        .render("1700000000000000")
        .unwrap();
    let json = serde_json::to_value(&rendered).unwrap();
    assert_eq!(json["kind"], "micro_epoch");
    assert_eq!(json["raw"], "1700000000000000");
}
