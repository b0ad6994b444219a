//! Router tests against the mock source, a temp cache directory and a fixed clock.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use dashboard_api::clock::FixedClock;
use dashboard_api::config::DataSourceKind;
use dashboard_api::source::Source;
use dashboard_api::{router, AppState, Settings};

fn app() -> (tempfile::TempDir, Router) {
  let dir = tempfile::tempdir().unwrap();
  let settings = Settings {
    data_source: DataSourceKind::Mock,
    cache_dir: dir.path().to_path_buf(),
    ..Settings::default()
  };
  let clock = Arc::new(FixedClock::new(
    Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap(),
  ));
  let state = AppState::new(settings, Source::mock().unwrap(), None, clock);
  (dir, router(Arc::new(state)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
  let response = app.oneshot(request).await.unwrap();
  let status = response.status();
  let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .unwrap();
  let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
  (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
  let (_dir, app) = app();
  send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
  let (_dir, app) = app();
  let request = Request::post(uri)
    .header("content-type", "application/json")
    .body(Body::from(body.to_string()))
    .unwrap();
  send(app, request).await
}

#[tokio::test]
async fn health_is_ok() {
  let (status, body) = get("/health").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "success": true, "data": "ok" }));
}

#[tokio::test]
async fn missing_username_is_bad_request() {
  for uri in [
    "/api/maintainer/sentiment",
    "/api/maintainer/reviews?username=",
    "/api/maintainer/issues",
    "/api/maintainer/impact",
    "/api/maintainer/impact/history",
  ] {
    let (status, body) = get(uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    assert_eq!(body, json!({ "error": "username is required" }));
  }
}

#[tokio::test]
async fn path_segments_in_username_are_rejected() {
  for uri in [
    "/api/maintainer/sentiment?username=..%2Frepos%2Frust-lang%2Frust%2Fcollaborators",
    "/api/maintainer/reviews?username=octo%2Fevents",
    "/api/maintainer/impact?username=octo%3Fper_page%3D1",
  ] {
    let (status, body) = get(uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    assert!(body["error"].as_str().unwrap().starts_with("invalid username"));
  }
}

#[tokio::test]
async fn unknown_user_is_not_found() {
  let (status, body) = get("/api/maintainer/sentiment?username=ghost").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(body["error"].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn maintainer_sentiment_report() {
  let (status, body) = get("/api/maintainer/sentiment?username=octo-maintainer").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], json!(true));
  let data = &body["data"];
  assert_eq!(data["username"], "octo-maintainer");
  assert_eq!(data["totalSamples"], 10);
  assert_eq!(data["granularity"], "month");
  assert_eq!(data["trends"].as_array().unwrap().len(), 2);
  assert_eq!(data["trends"][0]["period"], "2024-12");
  assert_eq!(data["daily"].as_array().unwrap().len(), 30);
  assert_eq!(data["heatmap"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn maintainer_sentiment_rejects_unknown_period() {
  let (status, body) = get("/api/maintainer/sentiment?username=octo-maintainer&period=fortnight").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "invalid period: fortnight");
}

#[tokio::test]
async fn activity_is_written_to_the_cache() {
  let (dir, app) = app();
  let request = Request::get("/api/maintainer/reviews?username=octo-maintainer")
    .body(Body::empty())
    .unwrap();
  let (status, _) = send(app, request).await;
  assert_eq!(status, StatusCode::OK);
  let entries = std::fs::read_dir(dir.path()).unwrap().count();
  assert_eq!(entries, 1);
}

#[tokio::test]
async fn review_summary() {
  let (status, body) = get("/api/maintainer/reviews?username=octo-maintainer").await;
  assert_eq!(status, StatusCode::OK);
  let data = &body["data"];
  assert_eq!(data["totalReviews"], 7);
  assert_eq!(data["approved"], 4);
  assert_eq!(data["changesRequested"], 2);
  assert_eq!(data["dismissed"], 0);
  assert_eq!(data["reviewedPulls"], 6);

  let (status, _) = get("/api/maintainer/reviews?username=octo-maintainer&state=merged").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn issue_triage_filters() {
  let (status, body) =
    get("/api/maintainer/issues?username=octo-maintainer&priority=critical").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["total"], 1);
  assert_eq!(body["data"]["issues"][0]["priority"], "critical");

  let (status, body) =
    get("/api/maintainer/issues?username=octo-maintainer&state=closed&labels=bug").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["total"], 1);
  assert_eq!(body["data"]["issues"][0]["number"], 50);

  let (status, _) = get("/api/maintainer/issues?username=octo-maintainer&priority=urgent").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn maintainer_impact_without_store() {
  let (status, body) = get("/api/maintainer/impact?username=octo-maintainer").await;
  assert_eq!(status, StatusCode::OK);
  let data = &body["data"];
  assert_eq!(data["snapshotId"], Value::Null);
  assert_eq!(data["inputs"]["mentorship"]["mentees"], 4);
  let metrics = &data["metrics"];
  assert_eq!(metrics["retentionRate"], 1.0);
  assert_eq!(metrics["mentorshipScore"], 0.75);
  let overall = metrics["overallScore"].as_f64().unwrap();
  assert!((overall - 0.70575).abs() < 1e-9, "{}", overall);
  assert_eq!(metrics["repositoryHealth"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn impact_history_is_empty_without_store() {
  let (status, body) = get("/api/maintainer/impact/history?username=octo-maintainer").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["snapshots"], json!([]));

  let (status, _) = get("/api/maintainer/impact/history?username=octo-maintainer&limit=0").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analyze_keyword_default() {
  let (status, body) = post(
    "/api/sentiment/analyze",
    json!({ "text": "This is great work, thanks!" }),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  let data = &body["data"];
  assert_eq!(data["strategy"], "keyword");
  assert_eq!(data["sentiment"], "POSITIVE");
  assert!(data["score"].as_f64().unwrap() > 0.0);
  assert!(data["personality"]["encouragement"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn analyze_lexicon_strategy() {
  let (status, body) = post(
    "/api/sentiment/analyze",
    json!({ "text": "Awesome work, thanks!", "strategy": "lexicon" }),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["strategy"], "lexicon");
  assert_eq!(body["data"]["tier"], "very_positive");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
  let (_dir, app) = app();
  let request = Request::post("/api/sentiment/analyze")
    .header("content-type", "application/json")
    .body(Body::from("{\"text\": "))
    .unwrap();
  let (status, body) = send(app, request).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn batch_scores_and_aggregates() {
  let (status, body) = post(
    "/api/sentiment/batch",
    json!({
      "samples": [
        { "text": "Great work, thanks!", "timestamp": "2024-01-01T10:00:00Z", "repository": "a/b" },
        { "text": "This is broken and wrong", "timestamp": "2024-01-02", "repository": "a/b" },
        { "text": "Merged", "timestamp": "2024-01-03T09:00:00Z", "repository": "a/c" }
      ],
      "granularity": "week",
      "endDate": "2024-01-31"
    }),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  let data = &body["data"];
  assert_eq!(data["totalSamples"], 3);
  assert_eq!(data["results"].as_array().unwrap().len(), 3);
  assert_eq!(data["trends"][0]["period"], "2024-1");
  assert_eq!(data["trends"][0]["count"], 3);
  assert_eq!(data["daily"].as_array().unwrap().len(), 30);
  assert_eq!(data["heatmap"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn batch_names_the_bad_sample() {
  let (status, body) = post(
    "/api/sentiment/batch",
    json!({
      "samples": [
        { "text": "ok", "timestamp": "2024-01-01", "repository": "a/b" },
        { "text": "ok", "timestamp": "yesterday", "repository": "a/b" }
      ]
    }),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().starts_with("samples[1].timestamp"));
}

#[tokio::test]
async fn calculate_impact_all_ones() {
  let (status, body) = post(
    "/api/impact/calculate",
    json!({
      "inputs": {
        "contributors": { "previousContributors": 10, "retainedContributors": 10, "newContributors": 3 },
        "repositories": [{
          "repository": "a/b", "starGrowth": 100, "forkGrowth": 100, "issuesResolved": 50,
          "prsMerged": 20, "contributorGrowth": 50, "activityGrowth": 100
        }],
        "mentorship": { "mentees": 4, "successfulMentees": 4 },
        "activity": { "currentPeriod": 20, "previousPeriod": 10 }
      }
    }),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  let overall = body["data"]["overallScore"].as_f64().unwrap();
  assert!((overall - 1.0).abs() < 1e-9);
  let short = body["data"]["projections"]["shortTerm"].as_f64().unwrap();
  assert!((short - 1.1).abs() < 1e-9);
}

#[tokio::test]
async fn health_improvement_from_zero_stars() {
  let (status, body) = post(
    "/api/repositories/health-improvement",
    json!({
      "before": { "stars": 0, "forks": 10, "contributors": 4, "openIssues": 20 },
      "after": { "stars": 15, "forks": 15, "contributors": 6, "openIssues": 10 }
    }),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  let data = &body["data"];
  assert_eq!(data["starGrowth"], 0.0);
  assert_eq!(data["forkGrowth"], 50.0);
  assert_eq!(data["contributorGrowth"], 50.0);
  assert_eq!(data["issueReduction"], 50.0);
  assert_eq!(data["overall"], 37.5);
}
