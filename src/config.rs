//! Table configuration.
//!
//! Loaded from a TOML file, then overridden by CLI flags. Every field has a
//! default, so an empty file (or no file) gives the classic five-seat table
//! with 1-5 second think and eat times.
//!
//! ```toml
//! seats = 5
//! second_wait_ms = 250   # omit to probe the second utensil without waiting
//!
//! [timing]
//! think_min_ms = 1000
//! think_max_ms = 5000
//! eat_min_ms = 1000
//! eat_max_ms = 5000
//! ```

use crate::framework::TableError;
use crate::philosopher_actor::{RandomDuration, SecondAcquire, Timing};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_seats")]
    pub seats: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_wait_ms: Option<u64>,

    #[serde(default)]
    pub timing: TimingConfig,
}

/// Think/eat ranges in milliseconds, inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_min_ms")]
    pub think_min_ms: u64,
    #[serde(default = "default_max_ms")]
    pub think_max_ms: u64,
    #[serde(default = "default_min_ms")]
    pub eat_min_ms: u64,
    #[serde(default = "default_max_ms")]
    pub eat_max_ms: u64,
}

fn default_seats() -> usize {
    5
}

fn default_min_ms() -> u64 {
    1000
}

fn default_max_ms() -> u64 {
    5000
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seats: default_seats(),
            second_wait_ms: None,
            timing: TimingConfig::default(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            think_min_ms: default_min_ms(),
            think_max_ms: default_max_ms(),
            eat_min_ms: default_min_ms(),
            eat_max_ms: default_max_ms(),
        }
    }
}

impl TableConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, TableError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub async fn load_from_file(path: &Path) -> Result<Self, TableError> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|source| TableError::ConfigRead {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String, TableError> {
        Ok(toml::to_string(self)?)
    }

    /// Rejects tables that could never start.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.seats < 2 {
            return Err(TableError::InvalidSeatCount(self.seats));
        }
        self.timing()?;
        Ok(())
    }

    /// Random think/eat sources for these ranges.
    pub fn timing(&self) -> Result<Timing, TableError> {
        let t = &self.timing;
        let think = RandomDuration::new(
            "think",
            Duration::from_millis(t.think_min_ms),
            Duration::from_millis(t.think_max_ms),
        )?;
        let eat = RandomDuration::new(
            "eat",
            Duration::from_millis(t.eat_min_ms),
            Duration::from_millis(t.eat_max_ms),
        )?;
        Ok(Timing::new(think, eat))
    }

    pub fn second_acquire(&self) -> SecondAcquire {
        match self.second_wait_ms {
            Some(ms) => SecondAcquire::Bounded(Duration::from_millis(ms)),
            None => SecondAcquire::Probe,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_classic_table() {
        let config = TableConfig::from_toml_str("").unwrap();
        assert_eq!(config, TableConfig::default());
        assert_eq!(config.seats, 5);
        assert_eq!(config.second_acquire(), SecondAcquire::Probe);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = TableConfig::from_toml_str(
            r#"
            seats = 2
            second_wait_ms = 40

            [timing]
            eat_max_ms = 20
            eat_min_ms = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.seats, 2);
        assert_eq!(config.timing.think_min_ms, 1000);
        assert_eq!(config.timing.eat_max_ms, 20);
        assert_eq!(
            config.second_acquire(),
            SecondAcquire::Bounded(Duration::from_millis(40))
        );
    }

    #[test]
    fn test_validation_failures() {
        let mut config = TableConfig {
            seats: 1,
            ..TableConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TableError::InvalidSeatCount(1))
        ));

        config.seats = 3;
        config.timing.think_min_ms = 10;
        config.timing.think_max_ms = 5;
        assert!(matches!(
            config.validate(),
            Err(TableError::InvalidDurationRange { name: "think", .. })
        ));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = TableConfig::from_toml_str("seats = \"many\"").unwrap_err();
        assert!(matches!(err, TableError::ConfigParse(_)));
    }

    #[test]
    fn test_written_config_reads_back() {
        let config = TableConfig {
            seats: 7,
            second_wait_ms: Some(15),
            timing: TimingConfig {
                think_min_ms: 1,
                think_max_ms: 2,
                eat_min_ms: 3,
                eat_max_ms: 4,
            },
        };
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("[timing]"));
        assert_eq!(TableConfig::from_toml_str(&text).unwrap(), config);
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let err = TableConfig::load_from_file(Path::new("/nonexistent/dining.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, TableError::ConfigRead { .. }));
    }
}
