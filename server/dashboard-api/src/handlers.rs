//! HTTP handlers. Each one validates its inputs, gathers data through the
//! shared state and wraps the result in the success envelope.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use impact_engine::period::{parse_date, parse_timestamp};
use impact_engine::{
  Granularity, HealthImprovement, ImpactInputs, ImpactMetrics, RepositoryMetrics,
};
use sentiment_engine::{Analysis, Strategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::github;
use crate::insights::{
  self, IssueFilter, IssueTriage, Priority, ReviewFilter, ReviewSummary, SentimentReport,
  TextSample,
};
use crate::response::{ok, ApiResponse};
use crate::state::AppState;
use crate::store::ImpactSnapshot;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Snapshots fed into projections.
const PROJECTION_HISTORY: i64 = 12;
const DEFAULT_HISTORY_LIMIT: i64 = 30;
const MAX_HISTORY_LIMIT: i64 = 365;

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
  payload
    .map(|Json(v)| v)
    .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

fn required(value: Option<&str>, name: &str) -> Result<String, ApiError> {
  match value.map(str::trim).filter(|v| !v.is_empty()) {
    Some(v) => Ok(v.to_string()),
    None => Err(ApiError::bad_request(format!("{} is required", name))),
  }
}

/// The `username` query value, rejected unless it is a well-formed GitHub login.
fn login(value: Option<&str>) -> Result<String, ApiError> {
  let name = required(value, "username")?;
  if !github::is_valid_login(&name) {
    return Err(ApiError::bad_request(format!("invalid username: {}", name)));
  }
  Ok(name)
}

fn optional(value: Option<&str>) -> Option<String> {
  value
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .map(str::to_string)
}

fn granularity(value: Option<&str>) -> Result<Granularity, ApiError> {
  match optional(value) {
    Some(v) => Granularity::parse(&v)
      .ok_or_else(|| ApiError::bad_request(format!("invalid period: {}", v))),
    None => Ok(Granularity::default()),
  }
}

fn flag(value: Option<&str>) -> bool {
  matches!(
    value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
    Some("1" | "true" | "yes")
  )
}

pub async fn health() -> Json<ApiResponse<&'static str>> {
  ok("ok")
}

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
  pub text: String,
  #[serde(default)]
  pub strategy: Strategy,
}

pub async fn analyze(
  State(state): State<Arc<AppState>>,
  payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<Analysis> {
  let request = body(payload)?;
  let analysis = state.analyzer().analyze(request.strategy, &request.text);
  Ok(ok(analysis))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSample {
  pub text: String,
  pub timestamp: String,
  pub repository: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
  pub samples: Vec<BatchSample>,
  #[serde(default)]
  pub granularity: Option<String>,
  /// Last day of the daily window (YYYY-MM-DD); defaults to today.
  #[serde(default)]
  pub end_date: Option<String>,
}

pub async fn batch(
  State(state): State<Arc<AppState>>,
  payload: Result<Json<BatchRequest>, JsonRejection>,
) -> ApiResult<SentimentReport> {
  let request = body(payload)?;
  let granularity = granularity(request.granularity.as_deref())?;
  let today = match optional(request.end_date.as_deref()) {
    Some(v) => parse_date(&v)
      .ok_or_else(|| ApiError::bad_request(format!("invalid endDate: {}", v)))?,
    None => state.now().date_naive(),
  };

  let mut samples = Vec::with_capacity(request.samples.len());
  for (i, s) in request.samples.into_iter().enumerate() {
    let timestamp = parse_timestamp(s.timestamp.trim()).ok_or_else(|| {
      ApiError::bad_request(format!("samples[{}].timestamp: invalid timestamp", i))
    })?;
    let repository = s.repository.trim().to_string();
    if repository.is_empty() {
      return Err(ApiError::bad_request(format!(
        "samples[{}].repository: must not be empty",
        i
      )));
    }
    samples.push(TextSample {
      text: s.text,
      timestamp,
      repository,
    });
  }

  let report = {
    let mut analyzer = state.analyzer();
    insights::sentiment_report(&state.engine, &mut analyzer, &samples, granularity, today)
  };
  Ok(ok(report))
}

// ---------------------------------------------------------------------------
// Maintainer views
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SentimentQuery {
  pub username: Option<String>,
  pub period: Option<String>,
  pub repo: Option<String>,
  pub refresh: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MaintainerSentiment {
  pub username: String,
  #[serde(flatten)]
  pub report: SentimentReport,
}

pub async fn maintainer_sentiment(
  State(state): State<Arc<AppState>>,
  Query(q): Query<SentimentQuery>,
) -> ApiResult<MaintainerSentiment> {
  let username = login(q.username.as_deref())?;
  let granularity = granularity(q.period.as_deref())?;
  let repo = optional(q.repo.as_deref());

  let activity = state.activity(&username, flag(q.refresh.as_deref())).await?;
  let samples = insights::text_samples(&activity, &username, repo.as_deref());
  let today = state.now().date_naive();
  let report = {
    let mut analyzer = state.analyzer();
    insights::sentiment_report(&state.engine, &mut analyzer, &samples, granularity, today)
  };

  Ok(ok(MaintainerSentiment {
    username: activity.user.login,
    report,
  }))
}

#[derive(Debug, Deserialize)]
pub struct ReviewsQuery {
  pub username: Option<String>,
  pub repo: Option<String>,
  pub state: Option<String>,
  pub refresh: Option<String>,
}

pub async fn maintainer_reviews(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ReviewsQuery>,
) -> ApiResult<ReviewSummary> {
  let username = login(q.username.as_deref())?;
  let review_state = optional(q.state.as_deref()).map(|s| s.to_ascii_lowercase());
  if let Some(s) = &review_state {
    if !matches!(s.as_str(), "approved" | "changes_requested" | "commented" | "dismissed") {
      return Err(ApiError::bad_request(format!("invalid state: {}", s)));
    }
  }
  let filter = ReviewFilter {
    repo: optional(q.repo.as_deref()),
    state: review_state,
  };

  let activity = state.activity(&username, flag(q.refresh.as_deref())).await?;
  Ok(ok(insights::review_summary(&activity, &username, &filter)))
}

#[derive(Debug, Deserialize)]
pub struct IssuesQuery {
  pub username: Option<String>,
  pub repo: Option<String>,
  pub state: Option<String>,
  pub priority: Option<String>,
  /// Comma-separated; every label must match.
  pub labels: Option<String>,
  pub refresh: Option<String>,
}

pub async fn maintainer_issues(
  State(state): State<Arc<AppState>>,
  Query(q): Query<IssuesQuery>,
) -> ApiResult<IssueTriage> {
  let username = login(q.username.as_deref())?;
  let issue_state = match optional(q.state.as_deref()).map(|s| s.to_ascii_lowercase()) {
    None => None,
    Some(s) if s == "all" => None,
    Some(s) if s == "open" || s == "closed" => Some(s),
    Some(s) => return Err(ApiError::bad_request(format!("invalid state: {}", s))),
  };
  let priority = match optional(q.priority.as_deref()) {
    Some(p) => Some(
      Priority::parse(&p).ok_or_else(|| ApiError::bad_request(format!("invalid priority: {}", p)))?,
    ),
    None => None,
  };
  let labels = q
    .labels
    .as_deref()
    .map(|l| {
      l.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
    })
    .unwrap_or_default();
  let filter = IssueFilter {
    repo: optional(q.repo.as_deref()),
    state: issue_state,
    priority,
    labels,
  };

  let activity = state.activity(&username, flag(q.refresh.as_deref())).await?;
  Ok(ok(insights::issue_triage(&activity, &filter)))
}

#[derive(Debug, Deserialize)]
pub struct ImpactQuery {
  pub username: Option<String>,
  pub refresh: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReport {
  pub username: String,
  pub inputs: ImpactInputs,
  pub metrics: ImpactMetrics,
  /// Set when the computation was stored.
  pub snapshot_id: Option<Uuid>,
}

pub async fn maintainer_impact(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ImpactQuery>,
) -> ApiResult<ImpactReport> {
  let username = login(q.username.as_deref())?;
  let activity = state.activity(&username, flag(q.refresh.as_deref())).await?;
  let now = state.now();

  let mut previous = HashMap::new();
  let mut history = Vec::new();
  if let Some(store) = &state.store {
    for repo in &activity.repositories {
      let name = &repo.repository.full_name;
      if let Some(metrics) = store.latest_repository(name).await? {
        previous.insert(name.clone(), metrics);
      }
    }
    history = store
      .impact_history(&username, PROJECTION_HISTORY)
      .await?
      .into_iter()
      .map(|s| s.overall_score)
      .collect();
  }

  let inputs = insights::impact_inputs(
    &activity,
    &username,
    &previous,
    now,
    state.settings.activity_window_days,
  );
  let metrics = state.engine.impact(&inputs, &history);

  let snapshot_id = match &state.store {
    Some(store) => {
      let id = store.record_impact(&username, &metrics, now).await?;
      for repo in &activity.repositories {
        let current = insights::repository_metrics(repo);
        store
          .record_repository(&repo.repository.full_name, &current, now)
          .await?;
      }
      Some(id)
    }
    None => None,
  };
  tracing::info!(
    username = %username,
    overall = metrics.overall_score,
    stored = snapshot_id.is_some(),
    "impact computed"
  );

  Ok(ok(ImpactReport {
    username: activity.user.login,
    inputs,
    metrics,
    snapshot_id,
  }))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
  pub username: Option<String>,
  pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImpactHistory {
  pub username: String,
  pub snapshots: Vec<ImpactSnapshot>,
}

pub async fn impact_history(
  State(state): State<Arc<AppState>>,
  Query(q): Query<HistoryQuery>,
) -> ApiResult<ImpactHistory> {
  let username = login(q.username.as_deref())?;
  let limit = match optional(q.limit.as_deref()) {
    Some(v) => match v.parse::<i64>() {
      Ok(n) if (1..=MAX_HISTORY_LIMIT).contains(&n) => n,
      _ => {
        return Err(ApiError::bad_request(format!(
          "limit must be between 1 and {}",
          MAX_HISTORY_LIMIT
        )))
      }
    },
    None => DEFAULT_HISTORY_LIMIT,
  };

  let snapshots = match &state.store {
    Some(store) => store.impact_history(&username, limit).await?,
    None => Vec::new(),
  };
  Ok(ok(ImpactHistory {
    username,
    snapshots,
  }))
}

// ---------------------------------------------------------------------------
// Direct computations
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
  pub inputs: ImpactInputs,
  /// Earlier overall scores, oldest first.
  #[serde(default)]
  pub history: Vec<f64>,
}

pub async fn calculate_impact(
  State(state): State<Arc<AppState>>,
  payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> ApiResult<ImpactMetrics> {
  let request = body(payload)?;
  Ok(ok(state.engine.impact(&request.inputs, &request.history)))
}

#[derive(Debug, Deserialize)]
pub struct HealthImprovementRequest {
  pub before: RepositoryMetrics,
  pub after: RepositoryMetrics,
}

pub async fn health_improvement(
  State(state): State<Arc<AppState>>,
  payload: Result<Json<HealthImprovementRequest>, JsonRejection>,
) -> ApiResult<HealthImprovement> {
  let request = body(payload)?;
  Ok(ok(
    state
      .engine
      .health_improvement(&request.before, &request.after),
  ))
}
