//! Timestamp values as they arrive from callers, and their classification.
//!
//! A value is either an encoded-instant string (ISO-8601 and friends) or a
//! micro-epoch: a number whose decimal form is exactly 16 characters long,
//! counting microseconds since 1970-01-01T00:00:00Z. The heuristic is purely
//! "16 characters and numeric"; it is applied once, here, and the result is a
//! tagged [`Timestamp`] the rest of the crate matches on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of characters in the decimal form of a micro-epoch value.
pub const MICRO_EPOCH_LEN: usize = 16;

/// Raw input accepted by the formatter: a string or a number.
#[derive(Debug, Clone, PartialEq)]
pub enum TimestampValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl TimestampValue {
    /// Coerce to a number the way a loose numeric conversion would.
    ///
    /// Text is trimmed before parsing; anything unparseable is `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TimestampValue::Text(s) => s.trim().parse::<f64>().ok(),
            TimestampValue::Integer(n) => Some(*n as f64),
            TimestampValue::Float(f) => Some(*f),
        }
    }

    /// Length of the value's default string representation, in characters.
    pub fn display_len(&self) -> usize {
        match self {
            TimestampValue::Text(s) => s.chars().count(),
            other => other.to_string().chars().count(),
        }
    }
}

impl fmt::Display for TimestampValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampValue::Text(s) => f.write_str(s),
            TimestampValue::Integer(n) => write!(f, "{}", n),
            TimestampValue::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for TimestampValue {
    fn from(value: &str) -> Self {
        TimestampValue::Text(value.to_string())
    }
}

impl From<String> for TimestampValue {
    fn from(value: String) -> Self {
        TimestampValue::Text(value)
    }
}

impl From<i64> for TimestampValue {
    fn from(value: i64) -> Self {
        TimestampValue::Integer(value)
    }
}

impl From<f64> for TimestampValue {
    fn from(value: f64) -> Self {
        TimestampValue::Float(value)
    }
}

/// Which representation a value was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampKind {
    EncodedInstant,
    MicroEpoch,
    EpochMillis,
}

impl TimestampKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampKind::EncodedInstant => "encoded_instant",
            TimestampKind::MicroEpoch => "micro_epoch",
            TimestampKind::EpochMillis => "epoch_millis",
        }
    }
}

impl fmt::Display for TimestampKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified timestamp, validated at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Timestamp {
    /// A date-time string handed to the permissive parser.
    EncodedInstant(String),
    /// Microseconds since the Unix epoch.
    MicroEpoch(i64),
    /// A number that is not micro-epoch shaped; read as milliseconds.
    EpochMillis(i64),
}

impl Timestamp {
    pub fn kind(&self) -> TimestampKind {
        match self {
            Timestamp::EncodedInstant(_) => TimestampKind::EncodedInstant,
            Timestamp::MicroEpoch(_) => TimestampKind::MicroEpoch,
            Timestamp::EpochMillis(_) => TimestampKind::EpochMillis,
        }
    }
}

/// True iff the value coerces to a finite number and its string form is
/// exactly 16 characters long.
///
/// Leading zeros, signs and decimal points all count as characters, so
/// `"-170000000000000"` qualifies and `"170000000000000"` does not.
pub fn is_micro_epoch(value: &TimestampValue) -> bool {
    let finite = value.as_number().is_some_and(f64::is_finite);
    finite && value.display_len() == MICRO_EPOCH_LEN
}

/// Route a raw value into the tagged [`Timestamp`] union.
pub fn classify(value: &TimestampValue) -> Timestamp {
    if is_micro_epoch(value) {
        let micros = match value {
            TimestampValue::Integer(n) => *n,
            TimestampValue::Text(s) => match s.trim().parse::<i64>() {
                Ok(n) => n,
                // Fractional text such as "1.00000000000000": nearest microsecond.
                Err(_) => value.as_number().map(|f| f.round() as i64).unwrap_or_default(),
            },
            TimestampValue::Float(f) => f.round() as i64,
        };
        log::debug!("classified {} as micro-epoch ({} us)", value, micros);
        return Timestamp::MicroEpoch(micros);
    }

    let classified = match value {
        TimestampValue::Text(s) => Timestamp::EncodedInstant(s.clone()),
        TimestampValue::Integer(n) => Timestamp::EpochMillis(*n),
        TimestampValue::Float(f) if f.is_finite() => Timestamp::EpochMillis(f.trunc() as i64),
        TimestampValue::Float(f) => Timestamp::EncodedInstant(f.to_string()),
    };
    log::debug!("classified {} as {}", value, classified.kind());
    classified
}
