//! Application layer (use-cases, policies).
//!
//! Orchestrates classification, instant resolution and rendering without
//! depending on the tooltip shell or the CLI.

pub mod formatter;
pub mod parse;
pub mod relative;

pub use formatter::{INVALID_PLACEHOLDER, TimestampFormatter};
pub use parse::{parse_encoded, resolve, to_instant};
pub use relative::relative_phrase;
