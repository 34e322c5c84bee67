use parlor_execution::SessionConfig;
use parlor_types::casino::{DECK_COUNT_OPTIONS, DEFAULT_DECK_COUNT, STARTING_CHIPS};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing::Level;

/// Configuration for the [crate::Simulator], read from YAML.
///
/// Every field is optional in the file.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json_logs: bool,

    #[serde(default = "default_starting_chips")]
    pub starting_chips: u64,
    #[serde(default = "default_deck_count")]
    pub deck_count: u8,
    /// Seed for every session's RNG; sessions draw from entropy when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: u64 },
    #[error("deck_count must be one of {options:?} (got {value})")]
    InvalidDeckCount { value: u8, options: [u8; 5] },
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Clone, Debug)]
pub struct ValidatedConfig {
    pub port: u16,
    pub log_level: Level,
    pub json_logs: bool,
    pub session: SessionConfig,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_starting_chips() -> u64 {
    STARTING_CHIPS
}

fn default_deck_count() -> u8 {
    DEFAULT_DECK_COUNT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            log_level: default_log_level(),
            json_logs: false,
            starting_chips: default_starting_chips(),
            deck_count: default_deck_count(),
            seed: None,
        }
    }
}

impl Config {
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        if self.starting_chips == 0 {
            return Err(ConfigError::InvalidNonZero {
                field: "starting_chips",
                value: self.starting_chips,
            });
        }
        if !DECK_COUNT_OPTIONS.contains(&self.deck_count) {
            return Err(ConfigError::InvalidDeckCount {
                value: self.deck_count,
                options: DECK_COUNT_OPTIONS,
            });
        }

        let log_level =
            Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel {
                value: self.log_level.clone(),
            })?;

        Ok(ValidatedConfig {
            port: self.port,
            log_level,
            json_logs: self.json_logs,
            session: SessionConfig {
                starting_chips: self.starting_chips,
                deck_count: self.deck_count,
                seed: self.seed,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap().validate().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, Level::INFO);
        assert!(!config.json_logs);
        assert_eq!(config.session, SessionConfig::default());
    }

    #[test]
    fn test_yaml_overrides() {
        let yaml = "port: 9000\nlog_level: debug\njson_logs: true\nstarting_chips: 250\ndeck_count: 2\nseed: 7\n";
        let config = Config::from_yaml(yaml).unwrap().validate().unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_level, Level::DEBUG);
        assert!(config.json_logs);
        assert_eq!(
            config.session,
            SessionConfig {
                starting_chips: 250,
                deck_count: 2,
                seed: Some(7),
            }
        );
    }

    #[test]
    fn test_invalid_values() {
        let config = Config {
            deck_count: 3,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDeckCount { value: 3, .. })
        ));

        let config = Config {
            starting_chips: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidNonZero {
                field: "starting_chips",
                ..
            })
        ));

        let config = Config {
            log_level: "loud".to_string(),
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid log level: loud");

        assert!(matches!(
            Config::from_yaml("port: [1, 2]"),
            Err(ConfigError::Parse(_))
        ));
    }
}
