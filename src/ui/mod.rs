//! UI layer - headless widgets driven by host events

pub mod tooltip;
