//! Impact score: weighted combination of retention, repository health, mentorship and growth.

use crate::config::{Config, ImpactWeights};
use crate::health::repository_health;
use crate::projection::project;
use crate::types::{
  ActivitySummary, ContributorSummary, ImpactInputs, ImpactMetrics, MentorshipSummary,
  RepositoryHealthScore,
};

fn ratio(numerator: u32, denominator: u32) -> f64 {
  if denominator == 0 {
    0.0
  } else {
    f64::from(numerator) / f64::from(denominator)
  }
}

fn unit(v: f64) -> f64 {
  if v.is_finite() {
    v.clamp(0.0, 1.0)
  } else {
    0.0
  }
}

/// Share of last window's contributors still active, in [0, 1].
pub fn retention_rate(c: &ContributorSummary) -> f64 {
  unit(ratio(c.retained_contributors, c.previous_contributors))
}

/// Relative change in activity; may be negative or exceed 1.
pub fn growth_rate(a: &ActivitySummary) -> f64 {
  if a.previous_period == 0 {
    return 0.0;
  }
  (f64::from(a.current_period) - f64::from(a.previous_period)) / f64::from(a.previous_period)
}

pub fn mentorship_score(m: &MentorshipSummary) -> f64 {
  unit(ratio(m.successful_mentees, m.mentees))
}

/// Weighted sum of the four sub-scores, each clamped to [0, 1] first.
pub fn weighted_score(
  retention: f64,
  health: f64,
  mentorship: f64,
  growth: f64,
  weights: &ImpactWeights,
) -> f64 {
  unit(retention) * weights.retention
    + unit(health) * weights.health
    + unit(mentorship) * weights.mentorship
    + unit(growth) * weights.growth
}

/// Compute all impact metrics. `history` holds earlier overall scores, oldest first.
pub fn compute(inputs: &ImpactInputs, history: &[f64], config: &Config) -> ImpactMetrics {
  let repository_health: Vec<RepositoryHealthScore> = inputs
    .repositories
    .iter()
    .map(|r| RepositoryHealthScore {
      repository: r.repository.clone(),
      score: repository_health(r, &config.health_caps),
    })
    .collect();
  let health_score = if repository_health.is_empty() {
    0.0
  } else {
    repository_health.iter().map(|r| r.score).sum::<f64>() / repository_health.len() as f64
  };

  let retention_rate = retention_rate(&inputs.contributors);
  let growth_rate = growth_rate(&inputs.activity);
  let mentorship_score = mentorship_score(&inputs.mentorship);
  let overall_score = weighted_score(
    retention_rate,
    health_score,
    mentorship_score,
    growth_rate,
    &config.weights,
  );

  ImpactMetrics {
    retention_rate,
    growth_rate,
    health_score,
    mentorship_score,
    overall_score,
    projections: project(overall_score, history, config),
    repository_health,
  }
}
