use crate::error::{HrError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub default_prize: String,
    pub allow_duplicates: bool,
    pub default_group_size: usize,
    pub default_group_count: usize,
    pub reveal: RevealConfig,
    pub export_prefix: String,
}

/// Cadence of the cosmetic name reveal shown before a draw settles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub duration_ms: u64,
    pub interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_prize: "Grand Prize".to_string(),
            allow_duplicates: false,
            default_group_size: 4,
            default_group_count: 3,
            reveal: RevealConfig::default(),
            export_prefix: "grouping_results".to_string(),
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000, // 2 seconds
            interval_ms: 80,
        }
    }
}

impl RevealConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(HrError::config("Reveal interval must be greater than 0"));
        }

        if self.interval_ms > self.duration_ms {
            return Err(HrError::config(format!(
                "Reveal interval ({} ms) cannot exceed the reveal duration ({} ms)",
                self.interval_ms, self.duration_ms
            )));
        }

        Ok(())
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_prize.trim().is_empty() {
            return Err(HrError::config("Default prize label cannot be empty"));
        }

        if self.default_group_size == 0 {
            return Err(HrError::config("Default group size must be greater than 0"));
        }

        if self.default_group_count == 0 {
            return Err(HrError::config(
                "Default group count must be greater than 0",
            ));
        }

        if self.export_prefix.trim().is_empty() {
            return Err(HrError::config("Export file prefix cannot be empty"));
        }

        self.reveal.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.default_group_size = 0;
        assert!(matches!(config.validate(), Err(HrError::Config(_))));

        let mut config = AppConfig::default();
        config.default_prize = "   ".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.reveal.interval_ms = 5000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"default_group_size": 6}"#).unwrap();
        assert_eq!(config.default_group_size, 6);
        assert_eq!(config.default_group_count, 3);
        assert_eq!(config.reveal.interval_ms, 80);
    }
}
