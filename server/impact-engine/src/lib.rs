//! Maintainer Insights Impact Engine: deterministic aggregation (no AI, no DB, no network).
//!
//! Buckets scored samples into sentiment trends and per-repository heatmaps,
//! combines contributor, repository health, mentorship and activity figures
//! into a weighted impact score, and projects it forward.

pub mod config;
pub mod engine;
pub mod error;
pub mod health;
pub mod heatmap;
pub mod impact;
pub mod normalize;
pub mod period;
pub mod projection;
pub mod trend;
pub mod types;

pub use config::{Config, HealthCaps, ImpactWeights};
pub use engine::Engine;
pub use error::EngineError;
pub use types::{
  ActivitySummary, ContributorSummary, Granularity, HealthImprovement, ImpactInputs,
  ImpactMetrics, InboundSample, MentorshipSummary, Projection, RepositoryHealthInput,
  RepositoryHeatmapEntry, RepositoryMetrics, Request, Response, ScoredSample, SentimentTrend,
};
