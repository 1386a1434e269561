//! Rating system configuration

use crate::error::Result;
use crate::rating::formula::{
    CappedLinearFactor, FlatFactor, PointsFormula, UnderdogFactor, DEFAULT_NORMALIZATION_DIVISOR,
};
use crate::rating::replay::RatingEngine;
use crate::types::DEFAULT_BASELINE_RATING;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Underdog factor policy selectable from configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FactorPolicy {
    Flat,
    CappedLinear { gap_scale: f64, max_factor: f64 },
}

impl Default for FactorPolicy {
    fn default() -> Self {
        let factor = CappedLinearFactor::default();
        FactorPolicy::CappedLinear {
            gap_scale: factor.gap_scale(),
            max_factor: factor.max_factor(),
        }
    }
}

impl FactorPolicy {
    /// Build the policy, validating its parameters
    pub fn build(&self) -> Result<Arc<dyn UnderdogFactor>> {
        match *self {
            FactorPolicy::Flat => Ok(Arc::new(FlatFactor)),
            FactorPolicy::CappedLinear {
                gap_scale,
                max_factor,
            } => Ok(Arc::new(CappedLinearFactor::new(gap_scale, max_factor)?)),
        }
    }
}

/// Rating settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    /// Rating every player starts a replay from
    pub baseline_rating: f64,
    /// Divisor applied to the four summed ratings to get the base award
    pub normalization_divisor: f64,
    pub factor: FactorPolicy,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            baseline_rating: DEFAULT_BASELINE_RATING,
            normalization_divisor: DEFAULT_NORMALIZATION_DIVISOR,
            factor: FactorPolicy::default(),
        }
    }
}

impl RatingSettings {
    /// Build a replay engine from these settings
    pub fn build_engine(&self) -> Result<RatingEngine> {
        let formula = PointsFormula::new(self.normalization_divisor, self.factor.build()?)?;
        RatingEngine::new(self.baseline_rating, formula)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_engine_matches_defaults() {
        let engine = RatingSettings::default().build_engine().unwrap();
        assert_eq!(engine.baseline_rating(), 1000.0);
        assert_eq!(engine.formula().normalization_divisor(), 100.0);
        assert_eq!(engine.formula().factor_policy().factor(400.0), 2.0);
    }

    #[test]
    fn test_factor_policy_toml() {
        let settings: RatingSettings = toml::from_str(
            r#"
            baseline_rating = 1200.0

            [factor]
            type = "flat"
            "#,
        )
        .unwrap();

        assert_eq!(settings.baseline_rating, 1200.0);
        assert_eq!(settings.normalization_divisor, 100.0);
        assert_eq!(settings.factor, FactorPolicy::Flat);
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let settings = RatingSettings {
            factor: FactorPolicy::CappedLinear {
                gap_scale: -1.0,
                max_factor: 2.0,
            },
            ..Default::default()
        };
        assert!(settings.build_engine().is_err());
    }
}
