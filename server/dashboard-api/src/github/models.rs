//! GitHub REST payloads (only the fields the dashboard reads).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
  pub login: String,
  #[serde(default)]
  pub avatar_url: Option<String>,
  #[serde(rename = "type", default)]
  pub account_type: Option<String>,
}

impl Account {
  pub fn is_bot(&self) -> bool {
    self.account_type.as_deref() == Some("Bot") || self.login.ends_with("[bot]")
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubUser {
  pub id: i64,
  pub login: String,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub avatar_url: Option<String>,
  #[serde(default)]
  pub public_repos: Option<u32>,
  #[serde(default)]
  pub followers: Option<u32>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
  pub id: i64,
  pub name: String,
  pub full_name: String,
  pub owner: Account,
  #[serde(default)]
  pub fork: bool,
  #[serde(default)]
  pub archived: bool,
  #[serde(default)]
  pub stargazers_count: u32,
  #[serde(default)]
  pub forks_count: u32,
  #[serde(default)]
  pub open_issues_count: u32,
  #[serde(default)]
  pub pushed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
  pub number: u64,
  pub title: String,
  pub state: String,
  pub user: Option<Account>,
  #[serde(default)]
  pub body: Option<String>,
  pub created_at: DateTime<Utc>,
  #[serde(default)]
  pub closed_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
  pub id: i64,
  pub user: Option<Account>,
  /// APPROVED, CHANGES_REQUESTED, COMMENTED, DISMISSED or PENDING.
  pub state: String,
  #[serde(default)]
  pub body: Option<String>,
  #[serde(default)]
  pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
  pub number: u64,
  pub title: String,
  pub state: String,
  pub user: Option<Account>,
  #[serde(default)]
  pub labels: Vec<Label>,
  #[serde(default)]
  pub comments: u32,
  pub created_at: DateTime<Utc>,
  #[serde(default)]
  pub closed_at: Option<DateTime<Utc>>,
  /// Present when the "issue" is really a pull request.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pull_request: Option<serde_json::Value>,
}

impl Issue {
  pub fn is_pull_request(&self) -> bool {
    self.pull_request.is_some()
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueComment {
  pub id: i64,
  pub user: Option<Account>,
  #[serde(default)]
  pub body: Option<String>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
  pub login: String,
  pub contributions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRepo {
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
  #[serde(rename = "type")]
  pub event_type: String,
  pub repo: EventRepo,
  pub created_at: DateTime<Utc>,
}
