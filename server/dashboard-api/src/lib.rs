//! Maintainer Insights Dashboard API
//!
//! HTTP service over a maintainer's GitHub activity: sentiment of their review
//! and comment text, review and issue summaries, and impact scores.
//! Bind to 127.0.0.1 by default (internal only).

pub mod activity;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod github;
pub mod handlers;
pub mod insights;
pub mod response;
pub mod source;
pub mod state;
pub mod store;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::Settings;
pub use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(handlers::health))
    .route("/api/sentiment/analyze", post(handlers::analyze))
    .route("/api/sentiment/batch", post(handlers::batch))
    .route("/api/maintainer/sentiment", get(handlers::maintainer_sentiment))
    .route("/api/maintainer/reviews", get(handlers::maintainer_reviews))
    .route("/api/maintainer/issues", get(handlers::maintainer_issues))
    .route("/api/maintainer/impact", get(handlers::maintainer_impact))
    .route("/api/maintainer/impact/history", get(handlers::impact_history))
    .route("/api/impact/calculate", post(handlers::calculate_impact))
    .route(
      "/api/repositories/health-improvement",
      post(handlers::health_improvement),
    )
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}
