//! Application timing and behavior configuration.
//!
//! # Responsibility
//! - Hold every tunable delay, interval and limit used by the core.
//! - Parse host-provided JSON overrides on top of defaults.
//!
//! # Invariants
//! - `validate()` succeeds for every config handed to `AppBuilder`.
//! - All durations are milliseconds on the scheduler clock.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Product name used for document titles and log lines.
pub const APP_NAME: &str = "Velox Suite";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Simulated latency before page content is resolved.
    pub page_load_delay_ms: u64,
    /// Fade-out duration before content swap.
    pub page_fade_ms: u64,
    /// How long the `page-enter` transition flag stays set after the swap.
    pub page_enter_ms: u64,
    /// Minimum time the loading screen stays visible at startup.
    pub min_load_ms: u64,
    pub toast_duration_ms: u64,
    pub notification_poll_interval_ms: u64,
    /// Chance per poll tick that a synthetic notification is injected.
    pub synthetic_notification_probability: f64,
    pub autosave_interval_ms: u64,
    pub search_debounce_ms: u64,
    pub command_debounce_ms: u64,
    pub counter_animation_ms: u64,
    pub search_result_limit: usize,
    /// Viewport widths at or below this value use the mobile sidebar.
    pub mobile_breakpoint_px: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_load_delay_ms: 300,
            page_fade_ms: 150,
            page_enter_ms: 500,
            min_load_ms: 1_500,
            toast_duration_ms: 3_000,
            notification_poll_interval_ms: 30_000,
            synthetic_notification_probability: 0.1,
            autosave_interval_ms: 30_000,
            search_debounce_ms: 300,
            command_debounce_ms: 200,
            counter_animation_ms: 2_000,
            search_result_limit: 10,
            mobile_breakpoint_px: 1_024,
        }
    }
}

impl AppConfig {
    /// Parses a JSON document; missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.synthetic_notification_probability) {
            return Err(ConfigError::InvalidProbability(
                self.synthetic_notification_probability,
            ));
        }
        if self.notification_poll_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("notification_poll_interval_ms"));
        }
        if self.autosave_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("autosave_interval_ms"));
        }
        if self.search_result_limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    InvalidProbability(f64),
    /// Interval timers cannot fire every 0 ms.
    ZeroInterval(&'static str),
    ZeroLimit,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid config json: {message}"),
            Self::InvalidProbability(value) => {
                write!(f, "probability must be within 0.0..=1.0, got {value}")
            }
            Self::ZeroInterval(field) => write!(f, "`{field}` must be greater than zero"),
            Self::ZeroLimit => write!(f, "`search_result_limit` must be greater than zero"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError};

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().expect("defaults validate");
        assert_eq!(config.search_result_limit, 10);
        assert_eq!(config.min_load_ms, 1_500);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = AppConfig::from_json(r#"{ "min_load_ms": 0, "page_fade_ms": 10 }"#)
            .expect("partial config parses");
        assert_eq!(config.min_load_ms, 0);
        assert_eq!(config.page_fade_ms, 10);
        assert_eq!(config.toast_duration_ms, 3_000);
    }

    #[test]
    fn rejects_unknown_fields_and_bad_values() {
        assert!(matches!(
            AppConfig::from_json(r#"{ "min_load": 1 }"#),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(
            AppConfig::from_json(r#"{ "synthetic_notification_probability": 1.5 }"#),
            Err(ConfigError::InvalidProbability(1.5))
        );
        assert_eq!(
            AppConfig::from_json(r#"{ "autosave_interval_ms": 0 }"#),
            Err(ConfigError::ZeroInterval("autosave_interval_ms"))
        );
    }
}
