//! Engine facade: holds the validated config and dispatches requests.

use chrono::NaiveDate;

use crate::config::Config;
use crate::error::EngineError;
use crate::health;
use crate::heatmap;
use crate::impact;
use crate::normalize::normalize_samples;
use crate::period::parse_date;
use crate::trend;
use crate::types::*;

/// Stateless aggregation engine. Every call is a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct Engine {
  config: Config,
}

impl Engine {
  /// Build an engine, rejecting inconsistent tunables.
  pub fn new(config: Config) -> Result<Self, EngineError> {
    config.validate()?;
    Ok(Self { config })
  }

  pub fn with_defaults() -> Self {
    Self {
      config: Config::default(),
    }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn trends(&self, samples: &[ScoredSample], granularity: Granularity) -> Vec<SentimentTrend> {
    trend::aggregate(samples, granularity)
  }

  /// The fixed window of `daily_window_days` days ending at `end`.
  pub fn daily(&self, samples: &[ScoredSample], end: NaiveDate) -> Vec<SentimentTrend> {
    trend::daily_window(samples, end, self.config.daily_window_days)
  }

  pub fn heatmap(&self, samples: &[ScoredSample]) -> Vec<RepositoryHeatmapEntry> {
    heatmap::build(samples)
  }

  pub fn impact(&self, inputs: &ImpactInputs, history: &[f64]) -> ImpactMetrics {
    impact::compute(inputs, history, &self.config)
  }

  pub fn health_improvement(
    &self,
    before: &RepositoryMetrics,
    after: &RepositoryMetrics,
  ) -> HealthImprovement {
    health::improvement(before, after)
  }

  /// Handle one request line.
  pub fn handle(&self, request: &Request) -> Result<Response, EngineError> {
    match request {
      Request::Trends {
        samples,
        granularity,
      } => {
        let samples = normalize_samples(samples)?;
        Ok(Response::Trends(self.trends(&samples, *granularity)))
      }
      Request::Daily { samples, end_date } => {
        let end = parse_date(end_date)
          .ok_or_else(|| EngineError::validation("end_date", "expected YYYY-MM-DD"))?;
        let samples = normalize_samples(samples)?;
        Ok(Response::Daily(self.daily(&samples, end)))
      }
      Request::Heatmap { samples } => {
        let samples = normalize_samples(samples)?;
        Ok(Response::Heatmap(self.heatmap(&samples)))
      }
      Request::Impact { inputs, history } => {
        if history.iter().any(|v| !v.is_finite()) {
          return Err(EngineError::validation("history", "must contain finite numbers"));
        }
        Ok(Response::Impact(self.impact(inputs, history)))
      }
      Request::HealthImprovement { before, after } => {
        Ok(Response::HealthImprovement(self.health_improvement(before, after)))
      }
    }
  }
}

impl Default for Engine {
  fn default() -> Self {
    Self::with_defaults()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::ImpactWeights;
  use sentiment_engine::Sentiment;

  fn inbound(ts: &str, repo: &str, sentiment: Sentiment, score: f64) -> InboundSample {
    InboundSample {
      timestamp: ts.into(),
      repository: repo.into(),
      sentiment,
      score,
    }
  }

  #[test]
  fn new_rejects_bad_weights() {
    let config = Config {
      weights: ImpactWeights {
        growth: 0.0,
        ..ImpactWeights::default()
      },
      ..Config::default()
    };
    assert!(Engine::new(config).is_err());
  }

  #[test]
  fn trends_request_normalizes_then_aggregates() {
    let engine = Engine::with_defaults();
    let request = Request::Trends {
      samples: vec![
        inbound("2024-05-01T10:00:00Z", "a/b", Sentiment::Positive, 0.4),
        inbound("2024-05-02T10:00:00Z", "a/b", Sentiment::Positive, 0.2),
        inbound("2024-05-20", "a/c", Sentiment::Negative, -0.3),
      ],
      granularity: Granularity::Month,
    };
    match engine.handle(&request).unwrap() {
      Response::Trends(t) => {
        assert_eq!(t.len(), 1);
        assert_eq!(t[0].count, 3);
      }
      other => panic!("unexpected {:?}", other),
    }
  }

  #[test]
  fn daily_request_requires_valid_end_date() {
    let engine = Engine::with_defaults();
    let request = Request::Daily {
      samples: vec![],
      end_date: "31/03/2024".into(),
    };
    let err = engine.handle(&request).unwrap_err();
    assert_eq!(err.field(), Some("end_date"));
  }

  #[test]
  fn daily_window_length_follows_config() {
    let engine = Engine::new(Config {
      daily_window_days: 7,
      ..Config::default()
    })
    .unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
    assert_eq!(engine.daily(&[], end).len(), 7);
  }

  #[test]
  fn impact_request_rejects_nan_history() {
    let engine = Engine::with_defaults();
    let request = Request::Impact {
      inputs: ImpactInputs::default(),
      history: vec![0.1, f64::NAN],
    };
    assert!(engine.handle(&request).is_err());
  }
}
