//! Multi-form rendering of a single timestamp.

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use super::parse::resolve;
use super::relative::relative_phrase;
use crate::domain::{
    DisplayPattern, DisplayZone, RenderedTimestamp, TimestampError, TimestampKind, TimestampValue,
    classify,
};
use crate::infra::clock::{Clock, SystemClock};

/// Shown in place of the clock values when a timestamp cannot be resolved.
pub const INVALID_PLACEHOLDER: &str = "Invalid Date";

/// Renders timestamps as local, UTC, relative and raw strings.
#[derive(Clone)]
pub struct TimestampFormatter {
    pattern: DisplayPattern,
    zone: DisplayZone,
    clock: Arc<dyn Clock>,
    placeholder: String,
}

impl TimestampFormatter {
    pub fn new() -> Self {
        Self {
            pattern: DisplayPattern::default(),
            zone: DisplayZone::Local,
            clock: Arc::new(SystemClock),
            placeholder: INVALID_PLACEHOLDER.to_string(),
        }
    }

    pub fn with_pattern(mut self, pattern: DisplayPattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_zone(mut self, zone: DisplayZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn pattern(&self) -> &DisplayPattern {
        &self.pattern
    }

    pub fn zone(&self) -> DisplayZone {
        self.zone
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Resolve `value` and render all forms of it.
    pub fn render(
        &self,
        value: impl Into<TimestampValue>,
    ) -> Result<RenderedTimestamp, TimestampError> {
        let value = value.into();
        let timestamp = classify(&value);
        let instant = resolve(&timestamp, &self.zone)?;
        Ok(self.render_instant(&instant, value.to_string(), Some(timestamp.kind())))
    }

    /// Like [`render`](Self::render), but unresolvable input yields the
    /// placeholder in every clock field instead of an error.
    pub fn render_or_placeholder(&self, value: impl Into<TimestampValue>) -> RenderedTimestamp {
        let value = value.into();
        match self.render(value.clone()) {
            Ok(rendered) => rendered,
            Err(err) => {
                log::debug!("rendering placeholder for {:?}: {}", value.to_string(), err);
                RenderedTimestamp {
                    local: self.placeholder.clone(),
                    utc: self.placeholder.clone(),
                    relative: self.placeholder.clone(),
                    raw: value.to_string(),
                    zone: String::new(),
                    kind: None,
                }
            }
        }
    }

    pub fn render_instant(
        &self,
        instant: &DateTime<Utc>,
        raw: String,
        kind: Option<TimestampKind>,
    ) -> RenderedTimestamp {
        RenderedTimestamp {
            local: self.zone.format(instant, &self.pattern),
            utc: DisplayZone::Utc.format(instant, &self.pattern),
            relative: relative_phrase(instant, &self.clock.now()),
            raw,
            zone: self.zone.label(instant),
            kind,
        }
    }
}

impl Default for TimestampFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TimestampFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimestampFormatter")
            .field("pattern", &self.pattern)
            .field("zone", &self.zone)
            .field("clock", &self.clock.name())
            .field("placeholder", &self.placeholder)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::clock::FixedClock;
    use chrono::{FixedOffset, NaiveDateTime, TimeZone};

    fn formatter(zone: DisplayZone) -> TimestampFormatter {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 3, 0).unwrap();
        TimestampFormatter::new()
            .with_zone(zone)
            .with_clock(Arc::new(FixedClock::at(now)))
    }

    #[test]
    fn iso_input_renders_default_pattern() {
        let rendered = formatter(DisplayZone::Utc)
            .render("2024-01-01T00:00:00Z")
            .unwrap();
        assert_eq!(rendered.utc, "01 Jan  00:00:00");
        assert_eq!(rendered.local, "01 Jan  00:00:00");
        assert_eq!(rendered.relative, "3 minutes ago");
        assert_eq!(rendered.raw, "2024-01-01T00:00:00Z");
        assert_eq!(rendered.zone, "UTC");
        assert_eq!(rendered.kind, Some(TimestampKind::EncodedInstant));
    }

    #[test]
    fn micro_epoch_input_renders_custom_pattern() {
        let pattern = DisplayPattern::new("%Y-%m-%d %H:%M:%S").unwrap();
        let rendered = formatter(DisplayZone::Utc)
            .with_pattern(pattern)
            .render("1700000000000000")
            .unwrap();
        assert_eq!(rendered.utc, "2023-11-14 22:13:20");
        assert!(rendered.relative.ends_with(" ago"));
        assert_eq!(rendered.kind, Some(TimestampKind::MicroEpoch));
    }

    #[test]
    fn local_and_utc_differ_by_the_zone_offset() {
        let pattern = DisplayPattern::new("%Y-%m-%d %H:%M:%S").unwrap();
        for offset_secs in [-8 * 3600, 0, 5 * 3600 + 1800, 14 * 3600] {
            let offset = FixedOffset::east_opt(offset_secs).unwrap();
            let rendered = formatter(DisplayZone::Fixed(offset))
                .with_pattern(pattern.clone())
                .render("1700000000000000")
                .unwrap();
            let local = NaiveDateTime::parse_from_str(&rendered.local, pattern.as_str()).unwrap();
            let utc = NaiveDateTime::parse_from_str(&rendered.utc, pattern.as_str()).unwrap();
            assert_eq!((local - utc).num_seconds(), i64::from(offset_secs));
        }
    }

    #[test]
    fn invalid_input_is_an_error_or_a_placeholder() {
        let f = formatter(DisplayZone::Utc);
        assert!(matches!(
            f.render("not a date"),
            Err(TimestampError::Parse { .. })
        ));

        let rendered = f.render_or_placeholder("not a date");
        assert_eq!(rendered.local, INVALID_PLACEHOLDER);
        assert_eq!(rendered.utc, INVALID_PLACEHOLDER);
        assert_eq!(rendered.relative, INVALID_PLACEHOLDER);
        assert_eq!(rendered.raw, "not a date");
        assert_eq!(rendered.kind, None);
    }

    #[test]
    fn custom_placeholder() {
        let rendered = formatter(DisplayZone::Utc)
            .with_placeholder("n/a")
            .render_or_placeholder("");
        assert_eq!(rendered.local, "n/a");
        assert_eq!(rendered.raw, "");
    }

    #[test]
    fn debug_names_the_clock() {
        let debug = format!("{:?}", formatter(DisplayZone::Utc));
        assert!(debug.contains("fixed"));
    }
}
