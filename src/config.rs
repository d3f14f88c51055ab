use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{PlannerError, Result};
use crate::types::Strategy;

/// defaults and bounds applied to planning requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub default_strategy: Strategy,
    pub default_max_months: u32,
    pub min_max_months: u32,
    pub max_max_months: u32,
    /// largest absolute amount accepted from a request
    pub max_amount: Decimal,
    /// largest apr accepted from a request (1000 = 100,000%)
    pub max_apr: Decimal,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_strategy: Strategy::Hybrid,
            default_max_months: 120,
            min_max_months: 1,
            max_max_months: 360,
            max_amount: dec!(1_000_000_000_000_000),
            max_apr: dec!(1000),
        }
    }
}

impl PlannerConfig {
    /// mortgage-style plans that default to the full 30-year horizon
    pub fn long_horizon() -> Self {
        Self {
            default_max_months: 360,
            ..Self::default()
        }
    }

    /// check a requested month cap against the configured bounds
    pub fn validate_horizon(&self, max_months: u32) -> Result<u32> {
        if max_months < self.min_max_months || max_months > self.max_max_months {
            return Err(PlannerError::InvalidHorizon {
                max_months,
                min: self.min_max_months,
                max: self.max_max_months,
            });
        }
        Ok(max_months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.default_strategy, Strategy::Hybrid);
        assert_eq!(config.default_max_months, 120);
        assert_eq!(PlannerConfig::long_horizon().default_max_months, 360);
        assert_eq!(config.max_amount, Decimal::from(10_i64.pow(15)));
    }

    #[test]
    fn test_horizon_bounds() {
        let config = PlannerConfig::default();
        assert!(config.validate_horizon(0).is_err());
        assert_eq!(config.validate_horizon(1).unwrap(), 1);
        assert_eq!(config.validate_horizon(360).unwrap(), 360);
        assert!(matches!(
            config.validate_horizon(361),
            Err(PlannerError::InvalidHorizon { max_months: 361, .. })
        ));
    }
}
