use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::TimestampFormatter;
use crate::domain::{DisplayPattern, DisplayZone};

/// How long a copied row shows its acknowledgement.
pub const DEFAULT_COPY_ACK: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub pattern: Option<String>,
    pub zone: Option<String>,
    pub copy_ack_millis: Option<u64>,
    pub placeholder: Option<String>,
}

impl AppConfig {
    /// Build a formatter from the configured values.
    ///
    /// Values that fail validation are logged and replaced by defaults.
    pub fn formatter(&self) -> TimestampFormatter {
        let mut formatter = TimestampFormatter::new();

        if let Some(pattern) = &self.pattern {
            match DisplayPattern::new(pattern.clone()) {
                Ok(pattern) => formatter = formatter.with_pattern(pattern),
                Err(err) => log::warn!("Ignoring configured pattern: {}", err),
            }
        }

        if let Some(zone) = &self.zone {
            match zone.parse::<DisplayZone>() {
                Ok(zone) => formatter = formatter.with_zone(zone),
                Err(err) => log::warn!("Ignoring configured zone: {}", err),
            }
        }

        if let Some(placeholder) = &self.placeholder {
            formatter = formatter.with_placeholder(placeholder.clone());
        }

        formatter
    }

    pub fn copy_ack(&self) -> Duration {
        self.copy_ack_millis
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_COPY_ACK)
    }
}

pub fn load_config() -> AppConfig {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> AppConfig {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return AppConfig::default();
    };
    toml::from_str(&contents).unwrap_or_else(|err| {
        log::warn!("Invalid config at {}: {}", path.display(), err);
        AppConfig::default()
    })
}

pub fn save_config(config: &AppConfig) -> std::io::Result<()> {
    save_config_to(config, &config_path())
}

pub fn save_config_to(config: &AppConfig, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(config).unwrap_or_default();
    std::fs::write(path, contents)
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("STAMPVIEW_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    dirs::config_dir()
        .unwrap_or_else(|| {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(".stampview")
        })
        .join("stampview")
        .join("config.toml")
}
