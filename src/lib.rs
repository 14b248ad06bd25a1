pub mod application;
pub mod domain;
pub mod infra;
pub mod ui;

pub use application::TimestampFormatter;
pub use domain::{DomainError, RenderedTimestamp, TimestampError, TimestampValue};
