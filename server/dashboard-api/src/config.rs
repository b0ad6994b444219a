//! Service settings read from the environment (`.env` is loaded by main).

use std::env;
use std::path::PathBuf;

use chrono::Duration;

use crate::error::ConfigError;

/// Upper bound for `ACTIVITY_WINDOW_DAYS`; two windows must stay well inside chrono's range.
pub const MAX_ACTIVITY_WINDOW_DAYS: i64 = 3650;

/// Where maintainer activity comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceKind {
  Github,
  Mock,
}

#[derive(Debug, Clone)]
pub struct Settings {
  pub port: u16,
  pub data_source: DataSourceKind,
  pub github_api_url: String,
  pub github_token: Option<String>,
  pub database_url: Option<String>,
  pub cache_dir: PathBuf,
  pub cache_ttl: Duration,
  /// Repositories fetched concurrently per request.
  pub max_repositories: usize,
  /// Length of the current (and previous) activity window.
  pub activity_window_days: i64,
  pub memo_capacity: usize,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      port: 5005,
      data_source: DataSourceKind::Github,
      github_api_url: "https://api.github.com".into(),
      github_token: None,
      database_url: None,
      cache_dir: PathBuf::from(".cache/maintainer-insights"),
      cache_ttl: Duration::seconds(3600),
      max_repositories: 5,
      activity_window_days: 30,
      memo_capacity: 1024,
    }
  }
}

impl Settings {
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Build settings from any key lookup; unset or blank keys keep their defaults.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let mut settings = Self::default();

    if let Some(v) = get("PORT") {
      settings.port = parse("PORT", &v)?;
    }
    if let Some(v) = get("DATA_SOURCE") {
      settings.data_source = match v.to_ascii_lowercase().as_str() {
        "github" => DataSourceKind::Github,
        "mock" => DataSourceKind::Mock,
        _ => return Err(ConfigError::invalid("DATA_SOURCE", "expected github|mock")),
      };
    }
    if let Some(v) = get("GITHUB_API_URL") {
      settings.github_api_url = v.trim_end_matches('/').to_string();
    }
    settings.github_token = get("GITHUB_TOKEN");
    settings.database_url = get("DATABASE_URL");
    if let Some(v) = get("CACHE_DIR") {
      settings.cache_dir = PathBuf::from(v);
    }
    if let Some(v) = get("CACHE_TTL_SECS") {
      let secs: i64 = parse("CACHE_TTL_SECS", &v)?;
      settings.cache_ttl = Duration::try_seconds(secs)
        .filter(|ttl| *ttl >= Duration::zero())
        .ok_or_else(|| ConfigError::invalid("CACHE_TTL_SECS", "must be a non-negative number of seconds"))?;
    }
    if let Some(v) = get("MAX_REPOSITORIES") {
      settings.max_repositories = parse("MAX_REPOSITORIES", &v)?;
      if settings.max_repositories == 0 {
        return Err(ConfigError::invalid("MAX_REPOSITORIES", "must be at least 1"));
      }
    }
    if let Some(v) = get("ACTIVITY_WINDOW_DAYS") {
      settings.activity_window_days = parse("ACTIVITY_WINDOW_DAYS", &v)?;
      if !(1..=MAX_ACTIVITY_WINDOW_DAYS).contains(&settings.activity_window_days) {
        return Err(ConfigError::invalid(
          "ACTIVITY_WINDOW_DAYS",
          &format!("must be between 1 and {}", MAX_ACTIVITY_WINDOW_DAYS),
        ));
      }
    }
    if let Some(v) = get("MEMO_CAPACITY") {
      settings.memo_capacity = parse("MEMO_CAPACITY", &v)?;
    }

    Ok(settings)
  }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
  value
    .parse()
    .map_err(|_| ConfigError::invalid(key, &format!("cannot parse {:?}", value)))
}
