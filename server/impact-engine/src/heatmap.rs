//! Per-repository sentiment heatmap.

use std::collections::BTreeMap;

use crate::types::{RepositoryHeatmapEntry, ScoredSample};

/// Collapse a mean score into -1 / 0 / 1.
pub fn classify(mean: f64) -> i8 {
  if mean > 0.0 {
    1
  } else if mean < 0.0 {
    -1
  } else {
    0
  }
}

/// One entry per distinct repository, sorted by repository name.
pub fn build(samples: &[ScoredSample]) -> Vec<RepositoryHeatmapEntry> {
  let mut by_repo: BTreeMap<&str, (u32, f64)> = BTreeMap::new();
  for sample in samples {
    let entry = by_repo.entry(sample.repository.as_str()).or_insert((0, 0.0));
    entry.0 += 1;
    entry.1 += sample.score;
  }

  by_repo
    .into_iter()
    .map(|(repository, (count, sum))| {
      let average_score = sum / count as f64;
      RepositoryHeatmapEntry {
        repository: repository.to_string(),
        sentiment: classify(average_score),
        review_count: count,
        average_score,
      }
    })
    .collect()
}
