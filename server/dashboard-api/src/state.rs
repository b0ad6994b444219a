//! Shared application state: data source, caches, engines and optional store.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use impact_engine::Engine;
use sentiment_engine::Analyzer;

use crate::activity::MaintainerActivity;
use crate::cache::FileCache;
use crate::clock::{Clock, SystemClock};
use crate::config::{DataSourceKind, Settings};
use crate::error::ApiError;
use crate::github::GithubClient;
use crate::source::Source;
use crate::store::SnapshotStore;

pub struct AppState {
  pub settings: Settings,
  pub source: Source,
  pub cache: FileCache,
  pub engine: Engine,
  pub store: Option<SnapshotStore>,
  analyzer: Mutex<Analyzer>,
  clock: Arc<dyn Clock>,
}

impl AppState {
  pub fn new(
    settings: Settings,
    source: Source,
    store: Option<SnapshotStore>,
    clock: Arc<dyn Clock>,
  ) -> Self {
    let cache = FileCache::new(settings.cache_dir.clone(), settings.cache_ttl, clock.clone());
    Self {
      analyzer: Mutex::new(Analyzer::new(settings.memo_capacity)),
      engine: Engine::with_defaults(),
      settings,
      source,
      cache,
      store,
      clock,
    }
  }

  /// Build the source and (when `DATABASE_URL` is set) connect the store.
  pub async fn from_settings(
    settings: Settings,
  ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
    let source = match settings.data_source {
      DataSourceKind::Github => Source::Github(GithubClient::new(
        settings.github_api_url.clone(),
        settings.github_token.clone(),
      )?),
      DataSourceKind::Mock => Source::mock()?,
    };
    let store = match &settings.database_url {
      Some(url) => Some(SnapshotStore::connect(url).await?),
      None => None,
    };
    let state = Self::new(settings, source, store, Arc::new(SystemClock));
    tracing::info!(
      source = state.source.name(),
      persistence = state.store.is_some(),
      cache_dir = %state.cache.dir().display(),
      "state initialized"
    );
    Ok(state)
  }

  pub fn now(&self) -> DateTime<Utc> {
    self.clock.now()
  }

  /// The memoizing analyzer. A poisoned lock is recovered; the memo holds no invariants.
  pub fn analyzer(&self) -> MutexGuard<'_, Analyzer> {
    self.analyzer.lock().unwrap_or_else(|e| e.into_inner())
  }

  /// Maintainer activity, served from the file cache while fresh. `refresh`
  /// drops the cached copy first.
  pub async fn activity(
    &self,
    username: &str,
    refresh: bool,
  ) -> Result<MaintainerActivity, ApiError> {
    let key = format!("activity:{}:{}", self.source.name(), username.to_ascii_lowercase());
    if refresh {
      self.cache.invalidate(&key).await;
    } else if let Some(cached) = self.cache.get::<MaintainerActivity>(&key).await {
      tracing::debug!(username, "activity cache hit");
      return Ok(cached);
    }

    let activity = self
      .source
      .maintainer_activity(username, self.settings.max_repositories, self.now())
      .await?;
    tracing::info!(
      username,
      repositories = activity.repositories.len(),
      "fetched maintainer activity"
    );
    self.cache.put(&key, &activity).await;
    Ok(activity)
  }
}
