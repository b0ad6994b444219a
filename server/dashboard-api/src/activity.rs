//! Maintainer activity snapshot and how it is gathered from a data source.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::github::{
  Contributor, Event, GithubClient, GithubError, GithubUser, Issue, IssueComment, PullRequest,
  Repository, Review,
};

/// Reviews are fetched for at most this many recent pulls per repository.
pub const MAX_REVIEWED_PULLS: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullWithReviews {
  pub pull: PullRequest,
  #[serde(default)]
  pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryActivity {
  pub repository: Repository,
  #[serde(default)]
  pub pulls: Vec<PullWithReviews>,
  #[serde(default)]
  pub issues: Vec<Issue>,
  #[serde(default)]
  pub comments: Vec<IssueComment>,
  #[serde(default)]
  pub contributors: Vec<Contributor>,
}

/// Everything the dashboard knows about one maintainer, as of `fetched_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintainerActivity {
  pub user: GithubUser,
  #[serde(default)]
  pub repositories: Vec<RepositoryActivity>,
  #[serde(default)]
  pub events: Vec<Event>,
  pub fetched_at: DateTime<Utc>,
}

/// Log a failed optional call and fall back to an empty result.
fn or_empty<T>(what: &str, repo: &str, result: Result<Vec<T>, GithubError>) -> Vec<T> {
  match result {
    Ok(v) => v,
    Err(e) => {
      tracing::warn!(what, repo, error = %e, "github call failed; using empty result");
      Vec::new()
    }
  }
}

async fn collect_repository(client: &GithubClient, repository: Repository) -> RepositoryActivity {
  let name = repository.full_name.clone();
  let (pulls, issues, comments, contributors) = tokio::join!(
    client.pulls(&name, "all"),
    client.issues(&name, "all"),
    client.issue_comments(&name),
    client.contributors(&name),
  );
  let pulls = or_empty("pulls", &name, pulls);

  let reviews = join_all(
    pulls
      .iter()
      .take(MAX_REVIEWED_PULLS)
      .map(|p| client.pull_reviews(&name, p.number)),
  )
  .await;
  let mut reviews = reviews.into_iter();

  let pulls = pulls
    .into_iter()
    .map(|pull| {
      let reviews = match reviews.next() {
        Some(r) => or_empty("reviews", &name, r),
        None => Vec::new(),
      };
      PullWithReviews { pull, reviews }
    })
    .collect();

  RepositoryActivity {
    repository,
    pulls,
    issues: or_empty("issues", &name, issues),
    comments: or_empty("comments", &name, comments),
    contributors: or_empty("contributors", &name, contributors),
  }
}

/// Fetch a maintainer's activity from GitHub. Only the user lookup is fatal;
/// every other call defaults to empty on failure. Repositories are fetched
/// concurrently, capped at `max_repositories`.
pub async fn collect_from_github(
  client: &GithubClient,
  username: &str,
  max_repositories: usize,
  now: DateTime<Utc>,
) -> Result<MaintainerActivity, GithubError> {
  let user = client.user(username).await?;

  let (repos, events) = tokio::join!(client.user_repos(username), client.user_events(username));
  let repos: Vec<Repository> = or_empty("repos", username, repos)
    .into_iter()
    .filter(|r| !r.fork && !r.archived)
    .take(max_repositories)
    .collect();

  let repositories = join_all(repos.into_iter().map(|r| collect_repository(client, r))).await;

  Ok(MaintainerActivity {
    user,
    repositories,
    events: or_empty("events", username, events),
    fetched_at: now,
  })
}
