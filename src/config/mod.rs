//! Configuration management for the court-league engine
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values.

pub mod analytics;
pub mod app;
pub mod rating;

// Re-export commonly used types
pub use analytics::AnalyticsSettings;
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use rating::{FactorPolicy, RatingSettings};
