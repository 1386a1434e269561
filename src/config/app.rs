//! Main application configuration
//!
//! This module defines the primary configuration structures for the league
//! engine, including environment variable and TOML file loading and validation.

use crate::config::analytics::AnalyticsSettings;
use crate::config::rating::{FactorPolicy, RatingSettings};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingSettings,
    pub analytics: AnalyticsSettings,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "court-league".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still override it
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Rating settings
        if let Ok(baseline) = env::var("BASELINE_RATING") {
            self.rating.baseline_rating = baseline
                .parse()
                .map_err(|_| anyhow!("Invalid BASELINE_RATING value: {}", baseline))?;
        }
        if let Ok(divisor) = env::var("NORMALIZATION_DIVISOR") {
            self.rating.normalization_divisor = divisor
                .parse()
                .map_err(|_| anyhow!("Invalid NORMALIZATION_DIVISOR value: {}", divisor))?;
        }

        // Analytics settings
        if let Ok(podium) = env::var("PODIUM_SIZE") {
            self.analytics.podium_size = podium
                .parse()
                .map_err(|_| anyhow!("Invalid PODIUM_SIZE value: {}", podium))?;
        }
        if let Ok(min_matches) = env::var("MIN_MATCHES") {
            self.analytics.min_matches = min_matches
                .parse()
                .map_err(|_| anyhow!("Invalid MIN_MATCHES value: {}", min_matches))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    // Validate rating settings
    if !config.rating.baseline_rating.is_finite() {
        return Err(anyhow!("Baseline rating must be finite"));
    }
    if !config.rating.normalization_divisor.is_finite()
        || config.rating.normalization_divisor <= 0.0
    {
        return Err(anyhow!("Normalization divisor must be positive"));
    }
    if let FactorPolicy::CappedLinear {
        gap_scale,
        max_factor,
    } = config.rating.factor
    {
        if gap_scale <= 0.0 {
            return Err(anyhow!("Factor gap scale must be positive"));
        }
        if max_factor < 1.0 {
            return Err(anyhow!("Factor cap must be at least 1.0"));
        }
    }

    // Validate analytics settings
    if config.analytics.podium_size == 0 {
        return Err(anyhow!("Podium size must be greater than 0"));
    }
    let weights = config.analytics.win_rate_weight + config.analytics.game_share_weight;
    if config.analytics.win_rate_weight < 0.0
        || config.analytics.game_share_weight < 0.0
        || (weights - 1.0).abs() > 1e-9
    {
        return Err(anyhow!(
            "Efficiency weights must be non-negative and sum to 1.0, got {}",
            weights
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.analytics.min_matches, 3);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_invalid_weights() {
        let mut config = AppConfig::default();
        config.analytics.win_rate_weight = 0.9;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_invalid_divisor() {
        let mut config = AppConfig::default();
        config.rating.normalization_divisor = 0.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [service]
            log_level = "debug"

            [analytics]
            podium_size = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.service.log_level, "debug");
        assert_eq!(config.service.name, "court-league");
        assert_eq!(config.analytics.podium_size, 5);
        assert_eq!(config.analytics.min_matches, 3);
        assert!(validate_config(&config).is_ok());
    }
}
