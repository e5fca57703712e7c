//! # Configuration
//!
//! Capacities and feedback delays, read from a TOML file. Every key is optional:
//!
//! ```toml
//! mailbox_capacity = 32
//! store_capacity = 32
//! document_capacity = 64
//!
//! [feedback]
//! short_delay_ms = 200   # upload, add link
//! long_delay_ms = 3000   # everything else
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, io};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0} must be greater than zero")]
    ZeroCapacity(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedbackDelays {
    pub short_delay_ms: u64,
    pub long_delay_ms: u64,
}

impl Default for FeedbackDelays {
    fn default() -> Self {
        Self {
            short_delay_ms: 200,
            long_delay_ms: 3000,
        }
    }
}

impl FeedbackDelays {
    pub fn short(&self) -> Duration {
        Duration::from_millis(self.short_delay_ms)
    }

    pub fn long(&self) -> Duration {
        Duration::from_millis(self.long_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Pending events per widget.
    pub mailbox_capacity: usize,
    /// Pending requests to the module store.
    pub store_capacity: usize,
    /// Pointer events buffered per listener.
    pub document_capacity: usize,
    pub feedback: FeedbackDelays,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 32,
            store_capacity: 32,
            document_capacity: 64,
            feedback: FeedbackDelays::default(),
        }
    }
}

impl WidgetConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, falling back to the defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(raw) => {
                let config = Self::from_toml_str(&raw)?;
                info!(path = %path.display(), "Config loaded");
                Ok(config)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    // tokio channels panic on a zero capacity
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("mailbox_capacity", self.mailbox_capacity),
            ("store_capacity", self.store_capacity),
            ("document_capacity", self.document_capacity),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroCapacity(name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = WidgetConfig::from_toml_str("").unwrap();
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.feedback.short(), Duration::from_millis(200));
        assert_eq!(config.feedback.long(), Duration::from_millis(3000));
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = WidgetConfig::from_toml_str(
            r#"
            mailbox_capacity = 8

            [feedback]
            long_delay_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.mailbox_capacity, 8);
        assert_eq!(config.store_capacity, 32);
        assert_eq!(config.feedback.short_delay_ms, 200);
        assert_eq!(config.feedback.long_delay_ms, 500);
    }

    #[test]
    fn zero_capacity_is_refused() {
        let err = WidgetConfig::from_toml_str("store_capacity = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroCapacity("store_capacity")));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            WidgetConfig::from_toml_str("mailbox_capacity = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_reads_a_file_or_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = WidgetConfig::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(missing, WidgetConfig::default());

        let path = dir.path().join("widget.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[feedback]\nshort_delay_ms = 50").unwrap();
        let loaded = WidgetConfig::load(&path).unwrap();
        assert_eq!(loaded.feedback.short_delay_ms, 50);
    }
}
