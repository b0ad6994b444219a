//! Minimal GitHub REST client: authenticated GETs with page-number pagination.
//! No retries; callers decide whether a failure is fatal or defaults to empty.

mod models;

pub use models::*;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const PER_PAGE: usize = 100;
const USER_AGENT: &str = "maintainer-insights-dashboard";

#[derive(Debug, Error)]
pub enum GithubError {
  #[error("request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("rate limited: {0}")]
  RateLimited(String),

  #[error("unexpected status {status} from {url}")]
  Status { status: u16, url: String },
}

/// Whether another page should be requested after receiving `received` items on `page`.
pub fn has_next_page(received: usize, page: u32, max_pages: u32) -> bool {
  received >= PER_PAGE && page < max_pages
}

/// GitHub login syntax: 1 to 39 ASCII alphanumerics or hyphens, not starting or
/// ending with a hyphen. Logins are interpolated into request paths.
pub fn is_valid_login(login: &str) -> bool {
  (1..=39).contains(&login.len())
    && login.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    && !login.starts_with('-')
    && !login.ends_with('-')
}

#[derive(Clone)]
pub struct GithubClient {
  http: Client,
  base_url: String,
  token: Option<String>,
}

impl GithubClient {
  pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, GithubError> {
    let http = Client::builder().user_agent(USER_AGENT).build()?;
    Ok(Self {
      http,
      base_url: base_url.into().trim_end_matches('/').to_string(),
      token,
    })
  }

  pub fn url(&self, path: &str) -> String {
    format!("{}/{}", self.base_url, path.trim_start_matches('/'))
  }

  async fn get_json<T: DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, String)],
  ) -> Result<T, GithubError> {
    let url = self.url(path);
    let mut request = self
      .http
      .get(&url)
      .query(query)
      .header(ACCEPT, "application/vnd.github+json");
    if let Some(token) = &self.token {
      request = request.header(AUTHORIZATION, format!("token {}", token));
    }

    let response = request.send().await?;
    match response.status() {
      s if s.is_success() => Ok(response.json::<T>().await?),
      StatusCode::NOT_FOUND => Err(GithubError::NotFound(path.to_string())),
      StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
        Err(GithubError::RateLimited(path.to_string()))
      }
      s => Err(GithubError::Status {
        status: s.as_u16(),
        url,
      }),
    }
  }

  /// Fetch pages 1..=max_pages, stopping at the first short page.
  async fn get_paginated<T: DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, String)],
    max_pages: u32,
  ) -> Result<Vec<T>, GithubError> {
    let mut all = Vec::new();
    let mut page = 1;
    loop {
      let mut q = query.to_vec();
      q.push(("per_page", PER_PAGE.to_string()));
      q.push(("page", page.to_string()));
      let batch: Vec<T> = self.get_json(path, &q).await?;
      let received = batch.len();
      all.extend(batch);
      if !has_next_page(received, page, max_pages) {
        break;
      }
      page += 1;
    }
    tracing::debug!(path, pages = page, items = all.len(), "github pagination done");
    Ok(all)
  }

  pub async fn user(&self, username: &str) -> Result<GithubUser, GithubError> {
    self.get_json(&format!("users/{}", username), &[]).await
  }

  pub async fn user_repos(&self, username: &str) -> Result<Vec<Repository>, GithubError> {
    let query = [
      ("sort", "pushed".to_string()),
      ("type", "owner".to_string()),
    ];
    self
      .get_paginated(&format!("users/{}/repos", username), &query, 3)
      .await
  }

  pub async fn pulls(&self, full_name: &str, state: &str) -> Result<Vec<PullRequest>, GithubError> {
    let query = [
      ("state", state.to_string()),
      ("sort", "updated".to_string()),
      ("direction", "desc".to_string()),
    ];
    self
      .get_paginated(&format!("repos/{}/pulls", full_name), &query, 2)
      .await
  }

  pub async fn pull_reviews(&self, full_name: &str, number: u64) -> Result<Vec<Review>, GithubError> {
    self
      .get_paginated(&format!("repos/{}/pulls/{}/reviews", full_name, number), &[], 1)
      .await
  }

  pub async fn issues(&self, full_name: &str, state: &str) -> Result<Vec<Issue>, GithubError> {
    let query = [("state", state.to_string())];
    self
      .get_paginated(&format!("repos/{}/issues", full_name), &query, 2)
      .await
  }

  pub async fn issue_comments(&self, full_name: &str) -> Result<Vec<IssueComment>, GithubError> {
    let query = [
      ("sort", "created".to_string()),
      ("direction", "desc".to_string()),
    ];
    self
      .get_paginated(&format!("repos/{}/issues/comments", full_name), &query, 2)
      .await
  }

  pub async fn contributors(&self, full_name: &str) -> Result<Vec<Contributor>, GithubError> {
    self
      .get_paginated(&format!("repos/{}/contributors", full_name), &[], 1)
      .await
  }

  pub async fn user_events(&self, username: &str) -> Result<Vec<Event>, GithubError> {
    self
      .get_paginated(&format!("users/{}/events", username), &[], 3)
      .await
  }
}
