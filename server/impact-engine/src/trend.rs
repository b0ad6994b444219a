//! Sentiment trend buckets: sparse calendar buckets and a fixed zero-filled daily window.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use sentiment_engine::Sentiment;

use crate::period::bucket_key;
use crate::types::{Granularity, ScoredSample, SentimentTrend};

/// Running counts for one bucket.
#[derive(Debug, Clone, Default)]
struct Tally {
  positive: u32,
  neutral: u32,
  negative: u32,
  score_sum: f64,
}

impl Tally {
  fn record(&mut self, sample: &ScoredSample) {
    match sample.sentiment {
      Sentiment::Positive => self.positive += 1,
      Sentiment::Neutral => self.neutral += 1,
      Sentiment::Negative => self.negative += 1,
    }
    self.score_sum += sample.score;
  }

  fn finish(self, period: String) -> SentimentTrend {
    let count = self.positive + self.neutral + self.negative;
    let average_score = if count > 0 {
      self.score_sum / count as f64
    } else {
      0.0
    };
    SentimentTrend {
      period,
      positive: self.positive,
      neutral: self.neutral,
      negative: self.negative,
      count,
      average_score,
    }
  }
}

/// One bucket per period that has at least one sample, oldest first.
pub fn aggregate(samples: &[ScoredSample], granularity: Granularity) -> Vec<SentimentTrend> {
  let mut ordered: Vec<&ScoredSample> = samples.iter().collect();
  ordered.sort_by_key(|s| s.timestamp);

  let mut index: HashMap<String, usize> = HashMap::new();
  let mut buckets: Vec<(String, Tally)> = Vec::new();
  for sample in ordered {
    let key = bucket_key(&sample.timestamp, granularity);
    let slot = *index.entry(key.clone()).or_insert_with(|| {
      buckets.push((key, Tally::default()));
      buckets.len() - 1
    });
    buckets[slot].1.record(sample);
  }

  buckets
    .into_iter()
    .map(|(period, tally)| tally.finish(period))
    .collect()
}

/// Exactly `days` consecutive daily buckets ending at `end` (inclusive), oldest first.
/// Days without samples are zero-filled; samples outside the window are ignored.
pub fn daily_window(samples: &[ScoredSample], end: NaiveDate, days: u32) -> Vec<SentimentTrend> {
  if days == 0 {
    return Vec::new();
  }
  let start = end - Duration::days(i64::from(days) - 1);

  let mut tallies: HashMap<NaiveDate, Tally> = HashMap::new();
  for sample in samples {
    let day = sample.timestamp.date_naive();
    if day < start || day > end {
      continue;
    }
    tallies.entry(day).or_default().record(sample);
  }

  (0..i64::from(days))
    .map(|offset| {
      let day = start + Duration::days(offset);
      let tally = tallies.remove(&day).unwrap_or_default();
      tally.finish(day.format("%Y-%m-%d").to_string())
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{TimeZone, Utc};

  fn sample(y: i32, m: u32, d: u32, sentiment: Sentiment, score: f64) -> ScoredSample {
    ScoredSample {
      timestamp: Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap(),
      repository: "octo/widgets".into(),
      sentiment,
      score,
    }
  }

  #[test]
  fn same_month_collapses_into_one_bucket() {
    let samples = vec![
      sample(2024, 5, 1, Sentiment::Positive, 0.5),
      sample(2024, 5, 15, Sentiment::Negative, -0.25),
      sample(2024, 5, 31, Sentiment::Neutral, 0.0),
    ];
    let trends = aggregate(&samples, Granularity::Month);
    assert_eq!(trends.len(), 1);
    let t = &trends[0];
    assert_eq!(t.period, "2024-05");
    assert_eq!(t.count, 3);
    assert_eq!((t.positive, t.neutral, t.negative), (1, 1, 1));
    assert!((t.average_score - 0.25 / 3.0).abs() < 1e-9);
  }

  #[test]
  fn buckets_are_sparse_and_chronological() {
    let samples = vec![
      sample(2024, 9, 2, Sentiment::Positive, 0.5),
      sample(2024, 1, 3, Sentiment::Positive, 0.5),
      sample(2024, 10, 7, Sentiment::Negative, -0.5),
    ];
    let trends = aggregate(&samples, Granularity::Week);
    let periods: Vec<&str> = trends.iter().map(|t| t.period.as_str()).collect();
    // Chronological, not lexicographic ("2024-41" after "2024-36").
    assert_eq!(periods, vec!["2024-1", "2024-36", "2024-41"]);
  }

  #[test]
  fn year_granularity() {
    let samples = vec![
      sample(2023, 12, 31, Sentiment::Positive, 1.0),
      sample(2024, 1, 1, Sentiment::Positive, 1.0),
    ];
    let trends = aggregate(&samples, Granularity::Year);
    assert_eq!(trends.len(), 2);
    assert_eq!(trends[0].period, "2023");
    assert_eq!(trends[1].period, "2024");
  }

  #[test]
  fn no_samples_no_buckets() {
    assert!(aggregate(&[], Granularity::Day).is_empty());
  }

  #[test]
  fn daily_window_always_has_exact_length() {
    let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
    let samples = vec![
      sample(2024, 3, 31, Sentiment::Positive, 0.5),
      sample(2024, 3, 31, Sentiment::Positive, 0.3),
      sample(2024, 3, 2, Sentiment::Negative, -0.2),
      // Outside the window.
      sample(2024, 3, 1, Sentiment::Negative, -1.0),
      sample(2024, 4, 1, Sentiment::Negative, -1.0),
    ];
    let days = daily_window(&samples, end, 30);
    assert_eq!(days.len(), 30);
    assert_eq!(days[0].period, "2024-03-02");
    assert_eq!(days[0].negative, 1);
    assert_eq!(days[29].period, "2024-03-31");
    assert_eq!(days[29].positive, 2);
    assert!((days[29].average_score - 0.4).abs() < 1e-9);

    let empty_days = days.iter().filter(|d| d.count == 0).count();
    assert_eq!(empty_days, 28);
    assert_eq!(days.iter().map(|d| d.count).sum::<u32>(), 3);
  }

  #[test]
  fn daily_window_without_samples_is_zero_filled() {
    let end = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
    let days = daily_window(&[], end, 30);
    assert_eq!(days.len(), 30);
    assert!(days.iter().all(|d| d.count == 0 && d.average_score == 0.0));
    assert_eq!(days[0].period, "2024-01-12");
  }
}
