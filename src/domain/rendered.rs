use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::str::FromStr;

use super::error::TimestampError;
use super::timestamp::TimestampKind;

/// Day-of-month, short month name, two spaces, 24-hour clock.
pub const DEFAULT_PATTERN: &str = "%d %b  %H:%M:%S";

/// A strftime pattern that is known to format without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayPattern(String);

impl DisplayPattern {
    pub fn new(pattern: impl Into<String>) -> Result<Self, TimestampError> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(TimestampError::InvalidPattern(pattern));
        }
        // Some specifiers parse but refuse to format (`%#z`).
        if let Some(sample) = DateTime::from_timestamp(0, 0)
            && try_format(&sample.fixed_offset(), &pattern).is_none()
        {
            return Err(TimestampError::InvalidPattern(pattern));
        }
        Ok(Self(pattern))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DisplayPattern {
    fn default() -> Self {
        Self(DEFAULT_PATTERN.to_string())
    }
}

impl FromStr for DisplayPattern {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Timezone the `local` field is rendered in.
///
/// `Local` follows the process's configured zone; tests and callers who
/// need determinism pass `Utc` or a `Fixed` offset instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl DisplayZone {
    /// Offset from UTC in effect at `instant`.
    pub fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset {
        match self {
            DisplayZone::Local => instant.with_timezone(&Local).offset().fix(),
            DisplayZone::Utc => Utc.fix(),
            DisplayZone::Fixed(offset) => *offset,
        }
    }

    /// Render `instant` in this zone. A pattern chrono cannot format yields
    /// an empty string.
    pub fn format(&self, instant: &DateTime<Utc>, pattern: &DisplayPattern) -> String {
        let formatted = match self {
            DisplayZone::Local => try_format(&instant.with_timezone(&Local), pattern.as_str()),
            DisplayZone::Utc => try_format(instant, pattern.as_str()),
            DisplayZone::Fixed(offset) => {
                try_format(&instant.with_timezone(offset), pattern.as_str())
            }
        };
        formatted.unwrap_or_else(|| {
            log::warn!("Pattern {:?} failed to format {}", pattern.as_str(), instant);
            String::new()
        })
    }

    /// Human label for the zone at `instant`, e.g. `UTC` or `UTC+02:00`.
    pub fn label(&self, instant: &DateTime<Utc>) -> String {
        match self {
            DisplayZone::Utc => "UTC".to_string(),
            zone => format!("UTC{}", zone.offset_at(instant)),
        }
    }

    /// Interpret a wall-clock date-time as being in this zone.
    ///
    /// Ambiguous local times (DST fold) resolve to the earlier instant;
    /// times skipped by a DST gap have no instant and yield `None`.
    pub fn resolve_naive(&self, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            DisplayZone::Local => earliest_instant(Local.from_local_datetime(naive)),
            DisplayZone::Utc => Some(Utc.from_utc_datetime(naive)),
            DisplayZone::Fixed(offset) => earliest_instant(offset.from_local_datetime(naive)),
        }
    }
}

impl FromStr for DisplayZone {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "local" => return Ok(DisplayZone::Local),
            "utc" | "z" => return Ok(DisplayZone::Utc),
            _ => {}
        }

        parse_offset(trimmed)
            .map(DisplayZone::Fixed)
            .ok_or_else(|| TimestampError::InvalidZone(s.to_string()))
    }
}

impl fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayZone::Local => f.write_str("local"),
            DisplayZone::Utc => f.write_str("utc"),
            DisplayZone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

fn earliest_instant<Tz: TimeZone>(mapped: LocalResult<DateTime<Tz>>) -> Option<DateTime<Utc>> {
    mapped.earliest().map(|dt| dt.with_timezone(&Utc))
}

fn try_format<Tz: TimeZone>(dt: &DateTime<Tz>, pattern: &str) -> Option<String>
where
    Tz::Offset: fmt::Display,
{
    let mut out = String::new();
    write!(out, "{}", dt.format(pattern)).ok()?;
    Some(out)
}

// Accepts +HH:MM, -HH:MM, +HHMM and +HH.
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (
            digits[..2].parse::<i32>().ok()?,
            digits[2..].parse::<i32>().ok()?,
        ),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// The four display forms of one instant, plus the zone label and the
/// classification that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedTimestamp {
    pub local: String,
    pub utc: String,
    pub relative: String,
    pub raw: String,
    pub zone: String,
    /// `None` only for placeholder renders of unresolvable input.
    pub kind: Option<TimestampKind>,
}

impl RenderedTimestamp {
    /// The `local` form annotated with the zone name.
    pub fn local_with_zone(&self) -> String {
        if self.zone.is_empty() {
            return self.local.clone();
        }
        format!("{} ({})", self.local, self.zone)
    }
}
