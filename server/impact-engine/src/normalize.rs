//! Normalize inbound samples into ScoredSample values.

use crate::error::EngineError;
use crate::period::parse_timestamp;
use crate::types::{InboundSample, ScoredSample};

/// Validate and parse one inbound sample. `index` is used in error field names.
pub fn normalize_sample(raw: &InboundSample, index: usize) -> Result<ScoredSample, EngineError> {
  let timestamp = parse_timestamp(&raw.timestamp).ok_or_else(|| {
    EngineError::validation(
      format!("samples[{}].timestamp", index),
      "expected RFC3339 or YYYY-MM-DD",
    )
  })?;

  let repository = raw.repository.trim();
  if repository.is_empty() {
    return Err(EngineError::validation(
      format!("samples[{}].repository", index),
      "must not be empty",
    ));
  }
  if !raw.score.is_finite() {
    return Err(EngineError::validation(
      format!("samples[{}].score", index),
      "must be a finite number",
    ));
  }

  Ok(ScoredSample {
    timestamp,
    repository: repository.to_string(),
    sentiment: raw.sentiment,
    score: raw.score,
  })
}

pub fn normalize_samples(raw: &[InboundSample]) -> Result<Vec<ScoredSample>, EngineError> {
  raw
    .iter()
    .enumerate()
    .map(|(i, s)| normalize_sample(s, i))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use sentiment_engine::Sentiment;

  fn inbound(ts: &str, repo: &str) -> InboundSample {
    InboundSample {
      timestamp: ts.into(),
      repository: repo.into(),
      sentiment: Sentiment::Positive,
      score: 0.5,
    }
  }

  #[test]
  fn valid_samples_normalize() {
    let out = normalize_samples(&[inbound("2024-05-01T10:00:00Z", " octo/widgets ")]).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].repository, "octo/widgets");
  }

  #[test]
  fn bad_timestamp_names_the_field() {
    let err = normalize_samples(&[
      inbound("2024-05-01", "octo/widgets"),
      inbound("not-a-date", "octo/widgets"),
    ])
    .unwrap_err();
    assert_eq!(err.field(), Some("samples[1].timestamp"));
  }

  #[test]
  fn empty_repository_rejected() {
    let err = normalize_sample(&inbound("2024-05-01", "  "), 0).unwrap_err();
    assert!(err.to_string().contains("repository"));
  }

  #[test]
  fn nan_score_rejected() {
    let mut s = inbound("2024-05-01", "octo/widgets");
    s.score = f64::NAN;
    assert!(normalize_sample(&s, 0).is_err());
  }
}
