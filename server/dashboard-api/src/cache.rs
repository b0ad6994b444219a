//! File-backed TTL cache for fetched GitHub activity.
//!
//! Entries live at `<dir>/<blake3(key)>.json`. Reads are a two-step read then
//! validate against the injected clock; a stale, unreadable or mismatched entry
//! is a miss. Concurrent writers may race, which can only cause staleness.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheEntry<T> {
  key: String,
  stored_at: DateTime<Utc>,
  ttl_secs: i64,
  data: T,
}

#[derive(Clone)]
pub struct FileCache {
  dir: PathBuf,
  ttl: Duration,
  clock: Arc<dyn Clock>,
}

impl FileCache {
  pub fn new(dir: impl Into<PathBuf>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
    Self {
      dir: dir.into(),
      ttl,
      clock,
    }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn path_for(&self, key: &str) -> PathBuf {
    let hash = blake3::hash(key.as_bytes());
    self.dir.join(format!("{}.json", &hash.to_hex()[..32]))
  }

  /// Fresh cached value for `key`, if any.
  pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
    let path = self.path_for(key);
    let raw = tokio::fs::read(&path).await.ok()?;
    let entry: CacheEntry<T> = match serde_json::from_slice(&raw) {
      Ok(e) => e,
      Err(e) => {
        tracing::warn!(key, error = %e, "discarding unreadable cache entry");
        return None;
      }
    };
    if entry.key != key {
      return None;
    }
    let expires = entry.stored_at + Duration::seconds(entry.ttl_secs);
    if self.clock.now() >= expires {
      return None;
    }
    Some(entry.data)
  }

  /// Store `value`; failures are logged and otherwise ignored.
  pub async fn put<T: Serialize>(&self, key: &str, value: &T) {
    let entry = CacheEntry {
      key: key.to_string(),
      stored_at: self.clock.now(),
      ttl_secs: self.ttl.num_seconds(),
      data: value,
    };
    let bytes = match serde_json::to_vec(&entry) {
      Ok(b) => b,
      Err(e) => {
        tracing::warn!(key, error = %e, "cache serialize failed");
        return;
      }
    };
    if let Err(e) = tokio::fs::create_dir_all(&self.dir).await {
      tracing::warn!(dir = %self.dir.display(), error = %e, "cache dir unavailable");
      return;
    }
    if let Err(e) = tokio::fs::write(self.path_for(key), bytes).await {
      tracing::warn!(key, error = %e, "cache write failed");
    }
  }

  pub async fn invalidate(&self, key: &str) {
    let _ = tokio::fs::remove_file(self.path_for(key)).await;
  }
}
