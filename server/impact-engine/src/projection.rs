//! Linear projections of the overall impact score.

use crate::config::Config;
use crate::types::Projection;

/// (last - first) / len over the historical series; 0 with fewer than two points.
pub fn trend_slope(history: &[f64]) -> f64 {
  match (history.first(), history.last()) {
    (Some(first), Some(last)) if history.len() >= 2 => (last - first) / history.len() as f64,
    _ => 0.0,
  }
}

pub fn project(current: f64, history: &[f64], config: &Config) -> Projection {
  let slope = trend_slope(history);
  Projection {
    short_term: current * config.projection_base,
    medium_term: current * (config.projection_base + slope * config.medium_term_periods),
    long_term: current * (config.projection_base + slope * config.long_term_periods),
  }
}
