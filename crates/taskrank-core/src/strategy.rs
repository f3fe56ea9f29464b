//! Strategy weight profiles.
//!
//! A strategy is plain data: a named row in a weight table. Selecting one is a
//! lookup, and configuration may override any row.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CoreError};
use crate::task::Factor;

/// Allowed slack when checking that weights sum to 1.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Built-in strategy names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyName {
    #[default]
    SmartBalance,
    FastestWins,
    DeadlineDriven,
    HighImpact,
}

impl StrategyName {
    pub const ALL: [StrategyName; 4] = [
        StrategyName::SmartBalance,
        StrategyName::FastestWins,
        StrategyName::DeadlineDriven,
        StrategyName::HighImpact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyName::SmartBalance => "smart_balance",
            StrategyName::FastestWins => "fastest_wins",
            StrategyName::DeadlineDriven => "deadline_driven",
            StrategyName::HighImpact => "high_impact",
        }
    }

    /// Built-in weights for this strategy.
    pub fn default_weights(self) -> StrategyWeights {
        match self {
            StrategyName::SmartBalance => StrategyWeights::new(0.25, 0.25, 0.25, 0.25),
            StrategyName::FastestWins => StrategyWeights::new(0.15, 0.15, 0.55, 0.15),
            StrategyName::DeadlineDriven => StrategyWeights::new(0.70, 0.10, 0.10, 0.10),
            StrategyName::HighImpact => StrategyWeights::new(0.10, 0.65, 0.10, 0.15),
        }
    }
}

impl fmt::Display for StrategyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| CoreError::UnknownStrategy(s.to_string()))
    }
}

/// Per-factor weights; the four sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyWeights {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependencies: f64,
}

impl StrategyWeights {
    pub const fn new(urgency: f64, importance: f64, effort: f64, dependencies: f64) -> Self {
        Self {
            urgency,
            importance,
            effort,
            dependencies,
        }
    }

    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Urgency => self.urgency,
            Factor::Importance => self.importance,
            Factor::Effort => self.effort,
            Factor::Dependencies => self.dependencies,
        }
    }

    /// Urgency/importance/effort weights rescaled to sum to 1 among themselves.
    pub fn base_weights(&self) -> (f64, f64, f64) {
        let total = self.urgency + self.importance + self.effort;
        (
            self.urgency / total,
            self.importance / total,
            self.effort / total,
        )
    }

    /// Check the invariants a profile must satisfy. `key` names the profile in errors.
    pub fn validate(&self, key: &str) -> Result<(), ConfigError> {
        let weights = [self.urgency, self.importance, self.effort, self.dependencies];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "weights must be finite and non-negative".into(),
            });
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("weights must sum to 1.0, got {sum}"),
            });
        }
        if self.urgency + self.importance + self.effort <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "urgency, importance and effort cannot all be zero".into(),
            });
        }
        Ok(())
    }
}

/// A named, immutable weight profile as used for one call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrategyProfile {
    pub name: StrategyName,
    pub weights: StrategyWeights,
}

impl StrategyProfile {
    pub fn builtin(name: StrategyName) -> Self {
        Self {
            name,
            weights: name.default_weights(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles_are_valid() {
        for name in StrategyName::ALL {
            name.default_weights()
                .validate(name.as_str())
                .unwrap_or_else(|e| panic!("{name}: {e}"));
        }
    }

    #[test]
    fn test_parse_roundtrip() {
        for name in StrategyName::ALL {
            assert_eq!(name.as_str().parse::<StrategyName>().unwrap(), name);
        }
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let err = "balanced".parse::<StrategyName>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownStrategy(ref s) if s == "balanced"));
    }

    #[test]
    fn test_serde_names_match_wire_names() {
        let json = serde_json::to_string(&StrategyName::DeadlineDriven).unwrap();
        assert_eq!(json, "\"deadline_driven\"");
    }

    #[test]
    fn test_base_weights_renormalize() {
        let (u, i, e) = StrategyName::SmartBalance.default_weights().base_weights();
        assert!((u - 1.0 / 3.0).abs() < 1e-12);
        assert!((u + i + e - 1.0).abs() < 1e-12);

        let (u, _, _) = StrategyName::DeadlineDriven.default_weights().base_weights();
        assert!((u - 0.7 / 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_bad_sums() {
        assert!(StrategyWeights::new(0.5, 0.5, 0.5, 0.0).validate("x").is_err());
        assert!(StrategyWeights::new(-0.1, 0.6, 0.5, 0.0).validate("x").is_err());
        assert!(StrategyWeights::new(0.0, 0.0, 0.0, 1.0).validate("x").is_err());
    }
}
