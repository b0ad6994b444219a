//! Repository health scoring and snapshot-to-snapshot improvement.

use crate::config::HealthCaps;
use crate::types::{HealthImprovement, RepositoryHealthInput, RepositoryMetrics};

/// value / cap clamped to [0, 1]; a non-positive cap contributes 0.
fn capped(value: f64, cap: f64) -> f64 {
  if cap <= 0.0 || !value.is_finite() {
    return 0.0;
  }
  (value / cap).clamp(0.0, 1.0)
}

/// Unweighted mean of the six capped factors.
pub fn repository_health(input: &RepositoryHealthInput, caps: &HealthCaps) -> f64 {
  let factors = [
    capped(input.star_growth, caps.star_growth),
    capped(input.fork_growth, caps.fork_growth),
    capped(input.issues_resolved, caps.issues_resolved),
    capped(input.prs_merged, caps.prs_merged),
    capped(input.contributor_growth, caps.contributor_growth),
    capped(input.activity_growth, caps.activity_growth),
  ];
  factors.iter().sum::<f64>() / factors.len() as f64
}

/// Percent change from `before` to `after`; a zero `before` counts as no growth.
pub fn percent_change(before: u32, after: u32) -> f64 {
  if before == 0 {
    return 0.0;
  }
  (f64::from(after) - f64::from(before)) / f64::from(before) * 100.0
}

pub fn improvement(before: &RepositoryMetrics, after: &RepositoryMetrics) -> HealthImprovement {
  let star_growth = percent_change(before.stars, after.stars);
  let fork_growth = percent_change(before.forks, after.forks);
  let contributor_growth = percent_change(before.contributors, after.contributors);
  let issue_reduction = -percent_change(before.open_issues, after.open_issues);
  let overall = (star_growth + fork_growth + contributor_growth + issue_reduction) / 4.0;
  HealthImprovement {
    star_growth,
    fork_growth,
    contributor_growth,
    issue_reduction,
    overall,
  }
}
