//! Domain types: timestamp values, their classification, and rendered output.

pub mod error;
pub mod rendered;
pub mod timestamp;

pub use error::{ClipboardError, DomainError, TimestampError};
pub use rendered::{DEFAULT_PATTERN, DisplayPattern, DisplayZone, RenderedTimestamp};
pub use timestamp::{
    MICRO_EPOCH_LEN, Timestamp, TimestampKind, TimestampValue, classify, is_micro_epoch,
};
