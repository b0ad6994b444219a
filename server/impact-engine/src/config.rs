//! Engine configuration with the dashboard's default weights and caps.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Impact score weights. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactWeights {
  pub retention: f64,
  pub health: f64,
  pub mentorship: f64,
  pub growth: f64,
}

impl ImpactWeights {
  pub fn sum(&self) -> f64 {
    self.retention + self.health + self.mentorship + self.growth
  }
}

impl Default for ImpactWeights {
  fn default() -> Self {
    Self {
      retention: 0.3,
      health: 0.3,
      mentorship: 0.2,
      growth: 0.2,
    }
  }
}

/// Divisors for the six repository health factors; each factor is value / cap, clamped to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthCaps {
  pub star_growth: f64,
  pub fork_growth: f64,
  pub issues_resolved: f64,
  pub prs_merged: f64,
  pub contributor_growth: f64,
  pub activity_growth: f64,
}

impl Default for HealthCaps {
  fn default() -> Self {
    Self {
      star_growth: 100.0,
      fork_growth: 100.0,
      issues_resolved: 50.0,
      prs_merged: 20.0,
      contributor_growth: 50.0,
      activity_growth: 100.0,
    }
  }
}

/// Tunable weights, caps and projection factors. Missing JSON fields take defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
  pub weights: ImpactWeights,
  pub health_caps: HealthCaps,
  /// Multiplier applied to the current score for every projection.
  pub projection_base: f64,
  /// Trend-slope multiplier for the medium-term projection.
  pub medium_term_periods: f64,
  /// Trend-slope multiplier for the long-term projection.
  pub long_term_periods: f64,
  /// Number of consecutive days in the fixed daily window.
  pub daily_window_days: u32,
}

impl Config {
  /// Reject weights that do not sum to 1.0, negative weights and an empty daily window.
  pub fn validate(&self) -> Result<(), EngineError> {
    let w = &self.weights;
    if [w.retention, w.health, w.mentorship, w.growth]
      .iter()
      .any(|v| !v.is_finite() || *v < 0.0)
    {
      return Err(EngineError::config("impact weights must be finite and non-negative"));
    }
    if (w.sum() - 1.0).abs() > 1e-9 {
      return Err(EngineError::config(format!(
        "impact weights must sum to 1.0, got {}",
        w.sum()
      )));
    }
    if self.daily_window_days == 0 {
      return Err(EngineError::config("daily window must cover at least one day"));
    }
    Ok(())
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      weights: ImpactWeights::default(),
      health_caps: HealthCaps::default(),
      projection_base: 1.1,
      medium_term_periods: 6.0,
      long_term_periods: 12.0,
      daily_window_days: 30,
    }
  }
}
