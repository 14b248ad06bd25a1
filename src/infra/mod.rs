//! Infrastructure layer (adapters/implementations).
//!
//! This module contains the ambient collaborators: clock, clipboard and
//! on-disk configuration.

pub mod app_config;
pub mod clipboard;
pub mod clock;
