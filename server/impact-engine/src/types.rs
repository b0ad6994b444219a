//! Core types for the impact engine (JSON contracts + internal models).

use chrono::{DateTime, Utc};
use sentiment_engine::{Sentiment, SentimentResult};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Inbound types (JSON contract: what the caller sends)
// ---------------------------------------------------------------------------

/// One scored sample as sent by a caller. Unknown fields are silently ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InboundSample {
  pub timestamp: String,
  pub repository: String,
  pub sentiment: Sentiment,
  pub score: f64,
}

// ---------------------------------------------------------------------------
// Internal normalized types
// ---------------------------------------------------------------------------

/// A sentiment result pinned to a time and repository.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSample {
  pub timestamp: DateTime<Utc>,
  pub repository: String,
  pub sentiment: Sentiment,
  pub score: f64,
}

impl ScoredSample {
  pub fn from_result(
    result: &SentimentResult,
    repository: impl Into<String>,
    timestamp: DateTime<Utc>,
  ) -> Self {
    Self {
      timestamp,
      repository: repository.into(),
      sentiment: result.sentiment,
      score: result.score,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
  Day,
  Week,
  #[default]
  Month,
  Year,
}

impl Granularity {
  pub fn parse(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "day" | "daily" => Some(Self::Day),
      "week" | "weekly" => Some(Self::Week),
      "month" | "monthly" => Some(Self::Month),
      "year" | "yearly" => Some(Self::Year),
      _ => None,
    }
  }
}

// ---------------------------------------------------------------------------
// Aggregation output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentTrend {
  pub period: String,
  pub positive: u32,
  pub neutral: u32,
  pub negative: u32,
  pub count: u32,
  pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryHeatmapEntry {
  pub repository: String,
  /// -1, 0 or 1.
  pub sentiment: i8,
  pub review_count: u32,
  pub average_score: f64,
}

// ---------------------------------------------------------------------------
// Impact inputs
// ---------------------------------------------------------------------------

/// Contributor counts across two consecutive windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContributorSummary {
  pub previous_contributors: u32,
  pub retained_contributors: u32,
  pub new_contributors: u32,
}

/// Maintainer activity counts across two consecutive windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivitySummary {
  pub current_period: u32,
  pub previous_period: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MentorshipSummary {
  /// Distinct contributors whose work the maintainer reviewed.
  pub mentees: u32,
  /// Of those, contributors with at least one merged pull request.
  pub successful_mentees: u32,
}

/// Raw per-repository growth figures for one window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepositoryHealthInput {
  pub repository: String,
  pub star_growth: f64,
  pub fork_growth: f64,
  pub issues_resolved: f64,
  pub prs_merged: f64,
  pub contributor_growth: f64,
  /// Percent change in repository activity.
  pub activity_growth: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImpactInputs {
  pub contributors: ContributorSummary,
  pub repositories: Vec<RepositoryHealthInput>,
  pub mentorship: MentorshipSummary,
  pub activity: ActivitySummary,
}

// ---------------------------------------------------------------------------
// Impact output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
  pub short_term: f64,
  pub medium_term: f64,
  pub long_term: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryHealthScore {
  pub repository: String,
  pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactMetrics {
  pub retention_rate: f64,
  pub growth_rate: f64,
  pub health_score: f64,
  pub mentorship_score: f64,
  pub overall_score: f64,
  pub projections: Projection,
  pub repository_health: Vec<RepositoryHealthScore>,
}

// ---------------------------------------------------------------------------
// Repository health improvement
// ---------------------------------------------------------------------------

/// Point-in-time repository counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepositoryMetrics {
  pub stars: u32,
  pub forks: u32,
  pub contributors: u32,
  pub open_issues: u32,
}

/// Percent changes between two snapshots. A zero "before" value yields 0 %.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthImprovement {
  pub star_growth: f64,
  pub fork_growth: f64,
  pub contributor_growth: f64,
  /// Positive when open issues went down.
  pub issue_reduction: f64,
  pub overall: f64,
}

// ---------------------------------------------------------------------------
// Request / response stream wrappers
// ---------------------------------------------------------------------------

/// One request line on stdin.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
  Trends {
    samples: Vec<InboundSample>,
    #[serde(default)]
    granularity: Granularity,
  },
  Daily {
    samples: Vec<InboundSample>,
    /// Last day of the window, `YYYY-MM-DD`.
    end_date: String,
  },
  Heatmap {
    samples: Vec<InboundSample>,
  },
  Impact {
    inputs: ImpactInputs,
    #[serde(default)]
    history: Vec<f64>,
  },
  HealthImprovement {
    before: RepositoryMetrics,
    after: RepositoryMetrics,
  },
}

/// One response line on stdout.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "op", content = "data", rename_all = "snake_case")]
pub enum Response {
  Trends(Vec<SentimentTrend>),
  Daily(Vec<SentimentTrend>),
  Heatmap(Vec<RepositoryHeatmapEntry>),
  Impact(ImpactMetrics),
  HealthImprovement(HealthImprovement),
}

/// Structured error output for invalid input lines.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}
