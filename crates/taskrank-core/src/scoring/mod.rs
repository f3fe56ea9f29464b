//! Per-factor scoring curves.
//!
//! Each scorer maps one task attribute to a 0-100 score:
//! - Urgency: days until due, continuous and strictly decreasing
//! - Importance: convex power curve over the 1-10 rating
//! - Effort: inverted hyperbola over estimated hours
//! - Dependencies: saturating curve over the number of blocked tasks
//!
//! All shape constants live in [`CurveParams`] so they can be tuned from
//! configuration without touching the formulas.

pub mod dependency;
pub mod effort;
pub mod importance;
pub mod urgency;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub use dependency::dependency_score;
pub use effort::effort_score;
pub use importance::importance_score;
pub use urgency::urgency_score;

/// Tunable constants for the scoring curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveParams {
    /// Gap below 100 at the moment a task falls due (due today scores `100 - this`).
    #[serde(default = "default_overdue_amplitude")]
    pub overdue_amplitude: f64,
    /// Exponential rate at which overdue urgency approaches 100.
    #[serde(default = "default_overdue_rate")]
    pub overdue_rate: f64,
    /// Length of the linear near-term window, in days.
    #[serde(default = "default_near_term_days")]
    pub near_term_days: f64,
    /// Urgency at the end of the near-term window.
    #[serde(default = "default_near_term_end_score")]
    pub near_term_end_score: f64,
    /// Baseline that long-term urgency decays toward.
    #[serde(default = "default_long_term_floor")]
    pub long_term_floor: f64,
    /// Decay constant of the long-term branch, in days.
    #[serde(default = "default_long_term_decay_days")]
    pub long_term_decay_days: f64,
    #[serde(default = "default_importance_exponent")]
    pub importance_exponent: f64,
    /// Hours at which the effort score is exactly 50.
    #[serde(default = "default_effort_half_hours")]
    pub effort_half_hours: f64,
    /// Saturation rate of the dependency score per blocked task.
    #[serde(default = "default_blocking_rate")]
    pub blocking_rate: f64,
}

fn default_overdue_amplitude() -> f64 {
    5.0
}
fn default_overdue_rate() -> f64 {
    0.3
}
fn default_near_term_days() -> f64 {
    7.0
}
fn default_near_term_end_score() -> f64 {
    50.0
}
fn default_long_term_floor() -> f64 {
    10.0
}
fn default_long_term_decay_days() -> f64 {
    10.0
}
fn default_importance_exponent() -> f64 {
    1.5
}
fn default_effort_half_hours() -> f64 {
    4.0
}
fn default_blocking_rate() -> f64 {
    0.4
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            overdue_amplitude: default_overdue_amplitude(),
            overdue_rate: default_overdue_rate(),
            near_term_days: default_near_term_days(),
            near_term_end_score: default_near_term_end_score(),
            long_term_floor: default_long_term_floor(),
            long_term_decay_days: default_long_term_decay_days(),
            importance_exponent: default_importance_exponent(),
            effort_half_hours: default_effort_half_hours(),
            blocking_rate: default_blocking_rate(),
        }
    }
}

impl CurveParams {
    /// Urgency at the instant a task falls due.
    pub fn due_today_score(&self) -> f64 {
        100.0 - self.overdue_amplitude
    }

    /// Reject parameter sets that would break monotonicity or the 0-100 range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("curves.overdue_rate", self.overdue_rate),
            ("curves.near_term_days", self.near_term_days),
            ("curves.long_term_decay_days", self.long_term_decay_days),
            ("curves.importance_exponent", self.importance_exponent),
            ("curves.effort_half_hours", self.effort_half_hours),
            ("curves.blocking_rate", self.blocking_rate),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(key, format!("must be a positive number, got {value}")));
            }
        }

        if !(self.overdue_amplitude > 0.0 && self.overdue_amplitude < 100.0) {
            return Err(invalid(
                "curves.overdue_amplitude",
                format!("must be in (0, 100), got {}", self.overdue_amplitude),
            ));
        }
        if !(self.long_term_floor >= 0.0) {
            return Err(invalid(
                "curves.long_term_floor",
                format!("must be non-negative, got {}", self.long_term_floor),
            ));
        }
        if !(self.near_term_end_score > self.long_term_floor
            && self.near_term_end_score < self.due_today_score())
        {
            return Err(invalid(
                "curves.near_term_end_score",
                format!(
                    "must lie between long_term_floor ({}) and the due-today score ({}), got {}",
                    self.long_term_floor,
                    self.due_today_score(),
                    self.near_term_end_score
                ),
            ));
        }
        Ok(())
    }
}

fn invalid(key: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        assert!(CurveParams::default().validate().is_ok());
        assert_eq!(CurveParams::default().due_today_score(), 95.0);
    }

    #[test]
    fn test_rejects_non_monotonic_join() {
        let params = CurveParams {
            near_term_end_score: 97.0,
            ..CurveParams::default()
        };
        assert!(params.validate().is_err());

        let params = CurveParams {
            long_term_floor: 60.0,
            ..CurveParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_rates() {
        let params = CurveParams {
            blocking_rate: 0.0,
            ..CurveParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let params: CurveParams = toml::from_str("effort_half_hours = 2.0").unwrap();
        assert_eq!(params.effort_half_hours, 2.0);
        assert_eq!(params.overdue_rate, 0.3);
    }
}
