//! Optional PostgreSQL persistence: impact snapshots and per-repository counters.
//!
//! Tables are append-only. History feeds projections; the latest repository
//! row feeds star and fork growth on the next computation.

use chrono::{DateTime, Utc};
use impact_engine::{ImpactMetrics, RepositoryMetrics};
use serde::Serialize;
use sqlx_core::query::query;
use sqlx_core::row::Row;
use sqlx_postgres::{PgPool, PgPoolOptions, PgRow, Postgres};
use uuid::Uuid;

const SCHEMA: &[&str] = &[
  r#"
  CREATE TABLE IF NOT EXISTS impact_snapshots (
    id UUID PRIMARY KEY,
    username TEXT NOT NULL,
    retention_rate DOUBLE PRECISION NOT NULL,
    growth_rate DOUBLE PRECISION NOT NULL,
    health_score DOUBLE PRECISION NOT NULL,
    mentorship_score DOUBLE PRECISION NOT NULL,
    overall_score DOUBLE PRECISION NOT NULL,
    computed_at TIMESTAMPTZ NOT NULL
  )
  "#,
  "CREATE INDEX IF NOT EXISTS impact_snapshots_user_time ON impact_snapshots (username, computed_at)",
  r#"
  CREATE TABLE IF NOT EXISTS repository_snapshots (
    id UUID PRIMARY KEY,
    full_name TEXT NOT NULL,
    stars BIGINT NOT NULL,
    forks BIGINT NOT NULL,
    contributors BIGINT NOT NULL,
    open_issues BIGINT NOT NULL,
    captured_at TIMESTAMPTZ NOT NULL
  )
  "#,
  "CREATE INDEX IF NOT EXISTS repository_snapshots_name_time ON repository_snapshots (full_name, captured_at)",
];

/// One stored impact computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactSnapshot {
  pub id: Uuid,
  pub username: String,
  pub retention_rate: f64,
  pub growth_rate: f64,
  pub health_score: f64,
  pub mentorship_score: f64,
  pub overall_score: f64,
  pub computed_at: DateTime<Utc>,
}

impl ImpactSnapshot {
  fn from_row(row: &PgRow) -> Result<Self, sqlx_core::Error> {
    Ok(Self {
      id: row.try_get("id")?,
      username: row.try_get("username")?,
      retention_rate: row.try_get("retention_rate")?,
      growth_rate: row.try_get("growth_rate")?,
      health_score: row.try_get("health_score")?,
      mentorship_score: row.try_get("mentorship_score")?,
      overall_score: row.try_get("overall_score")?,
      computed_at: row.try_get("computed_at")?,
    })
  }
}

fn to_u32(v: i64) -> u32 {
  u32::try_from(v.max(0)).unwrap_or(u32::MAX)
}

#[derive(Clone)]
pub struct SnapshotStore {
  pool: PgPool,
}

impl SnapshotStore {
  pub async fn connect(database_url: &str) -> Result<Self, sqlx_core::Error> {
    let pool = PgPoolOptions::new()
      .max_connections(5)
      .connect(database_url)
      .await?;
    let store = Self { pool };
    store.ensure_schema().await?;
    Ok(store)
  }

  pub async fn ensure_schema(&self) -> Result<(), sqlx_core::Error> {
    for statement in SCHEMA {
      query::<Postgres>(statement).execute(&self.pool).await?;
    }
    Ok(())
  }

  pub async fn record_impact(
    &self,
    username: &str,
    metrics: &ImpactMetrics,
    computed_at: DateTime<Utc>,
  ) -> Result<Uuid, sqlx_core::Error> {
    let id = Uuid::new_v4();
    query::<Postgres>(
      r#"
      INSERT INTO impact_snapshots
        (id, username, retention_rate, growth_rate, health_score, mentorship_score, overall_score, computed_at)
      VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
      "#,
    )
    .bind(id)
    .bind(username.to_ascii_lowercase())
    .bind(metrics.retention_rate)
    .bind(metrics.growth_rate)
    .bind(metrics.health_score)
    .bind(metrics.mentorship_score)
    .bind(metrics.overall_score)
    .bind(computed_at)
    .execute(&self.pool)
    .await?;
    Ok(id)
  }

  /// The latest `limit` snapshots for `username`, oldest first.
  pub async fn impact_history(
    &self,
    username: &str,
    limit: i64,
  ) -> Result<Vec<ImpactSnapshot>, sqlx_core::Error> {
    let rows = query::<Postgres>(
      r#"
      SELECT id, username, retention_rate, growth_rate, health_score, mentorship_score,
             overall_score, computed_at
      FROM impact_snapshots
      WHERE username = $1
      ORDER BY computed_at DESC
      LIMIT $2
      "#,
    )
    .bind(username.to_ascii_lowercase())
    .bind(limit)
    .fetch_all(&self.pool)
    .await?;

    let mut snapshots = rows
      .iter()
      .map(ImpactSnapshot::from_row)
      .collect::<Result<Vec<_>, _>>()?;
    snapshots.reverse();
    Ok(snapshots)
  }

  pub async fn record_repository(
    &self,
    full_name: &str,
    metrics: &RepositoryMetrics,
    captured_at: DateTime<Utc>,
  ) -> Result<(), sqlx_core::Error> {
    query::<Postgres>(
      r#"
      INSERT INTO repository_snapshots
        (id, full_name, stars, forks, contributors, open_issues, captured_at)
      VALUES ($1, $2, $3, $4, $5, $6, $7)
      "#,
    )
    .bind(Uuid::new_v4())
    .bind(full_name)
    .bind(i64::from(metrics.stars))
    .bind(i64::from(metrics.forks))
    .bind(i64::from(metrics.contributors))
    .bind(i64::from(metrics.open_issues))
    .bind(captured_at)
    .execute(&self.pool)
    .await?;
    Ok(())
  }

  pub async fn latest_repository(
    &self,
    full_name: &str,
  ) -> Result<Option<RepositoryMetrics>, sqlx_core::Error> {
    let row = query::<Postgres>(
      r#"
      SELECT stars, forks, contributors, open_issues
      FROM repository_snapshots
      WHERE full_name = $1
      ORDER BY captured_at DESC
      LIMIT 1
      "#,
    )
    .bind(full_name)
    .fetch_optional(&self.pool)
    .await?;

    row
      .map(|r| -> Result<RepositoryMetrics, sqlx_core::Error> {
        Ok(RepositoryMetrics {
          stars: to_u32(r.try_get("stars")?),
          forks: to_u32(r.try_get("forks")?),
          contributors: to_u32(r.try_get("contributors")?),
          open_issues: to_u32(r.try_get("open_issues")?),
        })
      })
      .transpose()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn negative_counters_clamp_to_zero() {
    assert_eq!(to_u32(-3), 0);
    assert_eq!(to_u32(42), 42);
    assert_eq!(to_u32(i64::MAX), u32::MAX);
  }

  #[test]
  fn schema_is_idempotent() {
    assert!(SCHEMA.iter().all(|s| s.contains("IF NOT EXISTS")));
  }
}
